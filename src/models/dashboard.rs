// src/models/dashboard.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::month::YearMonth;

fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// 1. Cards do Dashboard (um mês)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    #[schema(value_type = String, example = "2025-01")]
    pub month: YearMonth,
    pub total_revenue: Decimal,
    pub total_fixed_costs: Decimal,
    pub total_variable_costs: Decimal,
    pub total_sporadic_costs: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
    pub profit_per_partner: Decimal, // 50% do lucro líquido
    pub unpaid_fixed_costs: i64,
    pub average_ticket: Decimal,
    #[serde(rename = "trafficROI")]
    pub traffic_roi: Decimal, // em %, ex: 400 = 400%
}

impl FinancialMetrics {
    #[cfg(test)]
    pub fn zero(month: YearMonth) -> Self {
        Self {
            month,
            total_revenue: Decimal::ZERO,
            total_fixed_costs: Decimal::ZERO,
            total_variable_costs: Decimal::ZERO,
            total_sporadic_costs: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            profit_per_partner: Decimal::ZERO,
            unpaid_fixed_costs: 0,
            average_ticket: Decimal::ZERO,
            traffic_roi: Decimal::ZERO,
        }
    }

    /// Soma das três categorias de custo (o "Total de Custos" da tela).
    pub fn total_costs(&self) -> Decimal {
        self.total_fixed_costs + self.total_variable_costs + self.total_sporadic_costs
    }

    /// Cópia arredondada em 2 casas, só para exibição.
    pub fn rounded(&self) -> Self {
        Self {
            month: self.month,
            total_revenue: money(self.total_revenue),
            total_fixed_costs: money(self.total_fixed_costs),
            total_variable_costs: money(self.total_variable_costs),
            total_sporadic_costs: money(self.total_sporadic_costs),
            gross_profit: money(self.gross_profit),
            net_profit: money(self.net_profit),
            profit_per_partner: money(self.profit_per_partner),
            unpaid_fixed_costs: self.unpaid_fixed_costs,
            average_ticket: money(self.average_ticket),
            traffic_roi: money(self.traffic_roi),
        }
    }
}

// 2. Tela de Custos Variáveis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariableCostBreakdown {
    pub withdrawal_fee: Decimal,
    pub p2p_fee: Decimal,
    pub total_variable_costs: Decimal,
}

impl VariableCostBreakdown {
    pub fn rounded(&self) -> Self {
        Self {
            withdrawal_fee: money(self.withdrawal_fee),
            p2p_fee: money(self.p2p_fee),
            total_variable_costs: money(self.total_variable_costs),
        }
    }
}

// 3. Tela de Faturamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub total_revenue: Decimal,
    pub traffic_investment: Decimal,
    pub gross_profit: Decimal,
    pub average_ticket: Decimal,
    #[serde(rename = "trafficROI")]
    pub traffic_roi: Decimal,
}

impl RevenueSummary {
    pub fn rounded(&self) -> Self {
        Self {
            total_revenue: money(self.total_revenue),
            traffic_investment: money(self.traffic_investment),
            gross_profit: money(self.gross_profit),
            average_ticket: money(self.average_ticket),
            traffic_roi: money(self.traffic_roi),
        }
    }
}
