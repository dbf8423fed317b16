// src/services/dashboard_service.rs

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::{error::AppError, month::YearMonth},
    models::{
        dashboard::{FinancialMetrics, RevenueSummary, VariableCostBreakdown},
        finance::{FixedCost, Revenue, SporadicCost, VariableCost},
    },
    services::aggregator::{self, MonthlySnapshot},
};

/// Interface de consulta dos registros consumida pelo dashboard.
#[async_trait]
pub trait FinanceRecordSource: Send + Sync {
    async fn list_fixed_costs(&self, user_id: &str) -> Result<Vec<FixedCost>, AppError>;

    async fn list_sporadic_costs(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Vec<SporadicCost>, AppError>;

    async fn get_variable_cost(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Option<VariableCost>, AppError>;

    async fn get_revenue(&self, user_id: &str, month: YearMonth) -> Result<Option<Revenue>, AppError>;

    async fn get_payment_statuses(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<HashMap<Uuid, bool>, AppError>;
}

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn FinanceRecordSource>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn FinanceRecordSource>) -> Self {
        Self { source }
    }

    /// Carrega o snapshot do mês. Cada categoria é uma consulta
    /// independente; não há transação entre elas.
    pub async fn load_snapshot(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<MonthlySnapshot, AppError> {
        let (fixed_costs, sporadic_costs, variable_cost, revenue, payment_statuses) = tokio::try_join!(
            self.source.list_fixed_costs(user_id),
            self.source.list_sporadic_costs(user_id, month),
            self.source.get_variable_cost(user_id, month),
            self.source.get_revenue(user_id, month),
            self.source.get_payment_statuses(user_id, month),
        )?;

        Ok(MonthlySnapshot {
            fixed_costs,
            sporadic_costs,
            variable_cost,
            revenue,
            payment_statuses,
        })
    }

    pub async fn get_metrics(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<FinancialMetrics, AppError> {
        let snapshot = self.load_snapshot(user_id, month).await?;
        let metrics = aggregator::aggregate(month, &snapshot);

        tracing::debug!(
            %month,
            fixed = snapshot.fixed_costs.len(),
            sporadic = snapshot.sporadic_costs.len(),
            total_costs = %metrics.total_costs(),
            net_profit = %metrics.net_profit,
            "métricas do mês calculadas"
        );

        Ok(metrics)
    }

    pub async fn get_revenue_summary(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<RevenueSummary, AppError> {
        let revenue = self.source.get_revenue(user_id, month).await?;
        Ok(aggregator::revenue_summary(revenue.as_ref()))
    }

    pub async fn get_variable_cost_breakdown(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<VariableCostBreakdown, AppError> {
        let variable = self.source.get_variable_cost(user_id, month).await?;
        Ok(aggregator::variable_cost_breakdown(variable.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregator::tests::{fixed, reference_snapshot, revenue, sporadic, variable};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Fonte em memória que aplica os mesmos filtros do Postgres.
    #[derive(Default)]
    struct MemorySource {
        fixed: Vec<FixedCost>,
        sporadic: Vec<SporadicCost>,
        variable: Vec<VariableCost>,
        revenue: Vec<Revenue>,
        payments: HashMap<(Uuid, YearMonth), bool>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl MemorySource {
        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl FinanceRecordSource for MemorySource {
        async fn list_fixed_costs(&self, user_id: &str) -> Result<Vec<FixedCost>, AppError> {
            self.record("fixed");
            Ok(self
                .fixed
                .iter()
                .filter(|c| c.user_id == user_id && c.is_active)
                .cloned()
                .collect())
        }

        async fn list_sporadic_costs(
            &self,
            user_id: &str,
            month: YearMonth,
        ) -> Result<Vec<SporadicCost>, AppError> {
            self.record("sporadic");
            Ok(self
                .sporadic
                .iter()
                .filter(|c| c.user_id == user_id && month.contains(c.date))
                .cloned()
                .collect())
        }

        async fn get_variable_cost(
            &self,
            user_id: &str,
            month: YearMonth,
        ) -> Result<Option<VariableCost>, AppError> {
            self.record("variable");
            Ok(self
                .variable
                .iter()
                .find(|v| v.user_id == user_id && v.month == month.first_day())
                .cloned())
        }

        async fn get_revenue(
            &self,
            user_id: &str,
            month: YearMonth,
        ) -> Result<Option<Revenue>, AppError> {
            self.record("revenue");
            Ok(self
                .revenue
                .iter()
                .find(|r| r.user_id == user_id && r.month == month.first_day())
                .cloned())
        }

        async fn get_payment_statuses(
            &self,
            _user_id: &str,
            month: YearMonth,
        ) -> Result<HashMap<Uuid, bool>, AppError> {
            self.record("payments");
            Ok(self
                .payments
                .iter()
                .filter(|((_, m), _)| *m == month)
                .map(|((id, _), paid)| (*id, *paid))
                .collect())
        }
    }

    fn january() -> YearMonth {
        YearMonth::new(2025, 1).unwrap()
    }

    fn reference_source() -> MemorySource {
        let snapshot = reference_snapshot();
        MemorySource {
            fixed: snapshot.fixed_costs,
            sporadic: snapshot.sporadic_costs,
            variable: snapshot.variable_cost.into_iter().collect(),
            revenue: snapshot.revenue.into_iter().collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn metrics_for_reference_month() {
        let service = DashboardService::new(Arc::new(reference_source()));
        let metrics = service.get_metrics("test-user", january()).await.unwrap();

        assert_eq!(metrics.net_profit, dec!(7370));
        assert_eq!(metrics.profit_per_partner, dec!(3685));
        assert_eq!(metrics.traffic_roi, dec!(400));
        assert_eq!(metrics.month, january());
    }

    #[tokio::test]
    async fn other_month_only_sees_recurring_fixed_costs() {
        let service = DashboardService::new(Arc::new(reference_source()));
        let february = YearMonth::new(2025, 2).unwrap();
        let metrics = service.get_metrics("test-user", february).await.unwrap();

        // Custos fixos recorrem em todos os meses
        assert_eq!(metrics.total_fixed_costs, dec!(300));
        assert_eq!(metrics.total_sporadic_costs, Decimal::ZERO);
        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert_eq!(metrics.net_profit, dec!(-300));
    }

    #[tokio::test]
    async fn inactive_fixed_costs_and_out_of_month_sporadic_are_ignored() {
        let mut inactive = fixed(dec!(1000));
        inactive.is_active = false;
        let mut march = sporadic(dec!(80));
        march.date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let source = MemorySource {
            fixed: vec![fixed(dec!(50)), inactive],
            sporadic: vec![sporadic(dec!(20)), march],
            ..Default::default()
        };
        let metrics = DashboardService::new(Arc::new(source))
            .get_metrics("test-user", january())
            .await
            .unwrap();

        assert_eq!(metrics.total_fixed_costs, dec!(50));
        assert_eq!(metrics.total_sporadic_costs, dec!(20));
    }

    #[tokio::test]
    async fn paid_statuses_are_scoped_to_the_month() {
        let cost = fixed(dec!(99));
        let mut payments = HashMap::new();
        payments.insert((cost.id, january()), true);

        let source = MemorySource {
            fixed: vec![cost],
            payments,
            ..Default::default()
        };
        let service = DashboardService::new(Arc::new(source));

        let jan = service.get_metrics("test-user", january()).await.unwrap();
        let feb = service
            .get_metrics("test-user", YearMonth::new(2025, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(jan.unpaid_fixed_costs, 0);
        assert_eq!(feb.unpaid_fixed_costs, 1);
    }

    #[tokio::test]
    async fn snapshot_queries_every_category() {
        let source = Arc::new(MemorySource::default());
        let service = DashboardService::new(source.clone());
        service.get_metrics("test-user", january()).await.unwrap();

        let mut calls = source.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec!["fixed", "payments", "revenue", "sporadic", "variable"]);
    }

    #[tokio::test]
    async fn breakdown_and_summary_use_month_records() {
        let source = MemorySource {
            variable: vec![variable(dec!(100), dec!(50), 2, dec!(200))],
            revenue: vec![revenue(dec!(900), 3, dec!(300))],
            ..Default::default()
        };
        let service = DashboardService::new(Arc::new(source));

        let breakdown = service.get_variable_cost_breakdown("test-user", january()).await.unwrap();
        assert_eq!(breakdown.withdrawal_fee, dec!(20));
        assert_eq!(breakdown.p2p_fee, dec!(10));
        assert_eq!(breakdown.total_variable_costs, dec!(180));

        let summary = service.get_revenue_summary("test-user", january()).await.unwrap();
        assert_eq!(summary.gross_profit, dec!(600));
        assert_eq!(summary.average_ticket, dec!(300));
        assert_eq!(summary.traffic_roi, dec!(200));
    }
}
