// src/db/record_source.rs

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::{error::AppError, month::YearMonth},
    db::{FixedCostRepository, RevenueRepository, SporadicCostRepository, VariableCostRepository},
    models::finance::{FixedCost, Revenue, SporadicCost, VariableCost},
    services::dashboard_service::FinanceRecordSource,
};

/// `FinanceRecordSource` sobre os repositórios do Postgres.
#[derive(Clone)]
pub struct PgRecordSource {
    fixed_costs: FixedCostRepository,
    sporadic_costs: SporadicCostRepository,
    variable_costs: VariableCostRepository,
    revenues: RevenueRepository,
}

impl PgRecordSource {
    pub fn new(
        fixed_costs: FixedCostRepository,
        sporadic_costs: SporadicCostRepository,
        variable_costs: VariableCostRepository,
        revenues: RevenueRepository,
    ) -> Self {
        Self { fixed_costs, sporadic_costs, variable_costs, revenues }
    }
}

#[async_trait]
impl FinanceRecordSource for PgRecordSource {
    async fn list_fixed_costs(&self, user_id: &str) -> Result<Vec<FixedCost>, AppError> {
        self.fixed_costs.list_active(user_id).await
    }

    async fn list_sporadic_costs(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Vec<SporadicCost>, AppError> {
        self.sporadic_costs.list_by_month(user_id, month).await
    }

    async fn get_variable_cost(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Option<VariableCost>, AppError> {
        self.variable_costs.find_by_month(user_id, month).await
    }

    async fn get_revenue(&self, user_id: &str, month: YearMonth) -> Result<Option<Revenue>, AppError> {
        self.revenues.find_by_month(user_id, month).await
    }

    async fn get_payment_statuses(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<HashMap<Uuid, bool>, AppError> {
        let statuses = self.fixed_costs.list_payment_statuses(user_id, month).await?;
        Ok(statuses.into_iter().map(|s| (s.fixed_cost_id, s.is_paid)).collect())
    }
}
