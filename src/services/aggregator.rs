// src/services/aggregator.rs

//! Agregação mensal das métricas financeiras.
//!
//! Funções puras sobre um `MonthlySnapshot` já carregado: sem I/O e sem
//! erros. Registros ausentes contam como zero, então um mês sem dados
//! devolve todas as métricas zeradas.
//!
//! Pré-condição: todos os campos numéricos são decimais finitos e não
//! negativos (a validação acontece nos payloads).

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::month::YearMonth,
    models::{
        dashboard::{FinancialMetrics, RevenueSummary, VariableCostBreakdown},
        finance::{FixedCost, Revenue, SporadicCost, VariableCost},
    },
};

/// Taxa fixa cobrada por saque (R$ 10,00).
pub const WITHDRAWAL_FEE: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);

/// 5% sobre o volume de transferências P2P.
pub const P2P_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Divisão do lucro líquido entre os dois sócios.
pub const PARTNER_SHARE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Tudo o que a agregação precisa para um mês.
#[derive(Debug, Clone, Default)]
pub struct MonthlySnapshot {
    /// Custos fixos ativos. Não são filtrados por mês: recorrem sempre.
    pub fixed_costs: Vec<FixedCost>,
    /// Custos avulsos cuja data cai no mês.
    pub sporadic_costs: Vec<SporadicCost>,
    pub variable_cost: Option<VariableCost>,
    pub revenue: Option<Revenue>,
    /// id do custo fixo -> pago? Ausente conta como não pago.
    pub payment_statuses: HashMap<Uuid, bool>,
}

pub fn withdrawal_fee(variable: &VariableCost) -> Decimal {
    Decimal::from(variable.withdrawal_count) * WITHDRAWAL_FEE
}

pub fn p2p_fee(variable: &VariableCost) -> Decimal {
    variable.p2p_transfers * P2P_FEE_RATE
}

pub fn variable_cost_breakdown(variable: Option<&VariableCost>) -> VariableCostBreakdown {
    match variable {
        Some(v) => {
            let withdrawal_fee = withdrawal_fee(v);
            let p2p_fee = p2p_fee(v);
            VariableCostBreakdown {
                withdrawal_fee,
                p2p_fee,
                // gateway_percentage entra como valor absoluto, não como taxa
                total_variable_costs: v.ad_accounts_purchase
                    + v.gateway_percentage
                    + withdrawal_fee
                    + p2p_fee,
            }
        }
        None => VariableCostBreakdown {
            withdrawal_fee: Decimal::ZERO,
            p2p_fee: Decimal::ZERO,
            total_variable_costs: Decimal::ZERO,
        },
    }
}

pub fn average_ticket(total_revenue: Decimal, sales_count: i32) -> Decimal {
    if sales_count > 0 {
        total_revenue / Decimal::from(sales_count)
    } else {
        Decimal::ZERO
    }
}

pub fn traffic_roi(total_revenue: Decimal, traffic_investment: Decimal) -> Decimal {
    if traffic_investment > Decimal::ZERO {
        (total_revenue - traffic_investment) / traffic_investment * ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

pub fn revenue_summary(revenue: Option<&Revenue>) -> RevenueSummary {
    let (total_revenue, sales_count, traffic_investment) = match revenue {
        Some(r) => (r.total_revenue, r.sales_count, r.traffic_investment),
        None => (Decimal::ZERO, 0, Decimal::ZERO),
    };

    RevenueSummary {
        total_revenue,
        traffic_investment,
        gross_profit: total_revenue - traffic_investment,
        average_ticket: average_ticket(total_revenue, sales_count),
        traffic_roi: traffic_roi(total_revenue, traffic_investment),
    }
}

/// Calcula as métricas do dashboard para `month`.
pub fn aggregate(month: YearMonth, snapshot: &MonthlySnapshot) -> FinancialMetrics {
    let total_fixed_costs: Decimal = snapshot.fixed_costs.iter().map(|c| c.amount).sum();
    let total_sporadic_costs: Decimal = snapshot.sporadic_costs.iter().map(|c| c.amount).sum();
    let total_variable_costs =
        variable_cost_breakdown(snapshot.variable_cost.as_ref()).total_variable_costs;

    let revenue = revenue_summary(snapshot.revenue.as_ref());

    let net_profit = revenue.total_revenue
        - total_fixed_costs
        - total_variable_costs
        - total_sporadic_costs
        - revenue.traffic_investment;

    let unpaid_fixed_costs = snapshot
        .fixed_costs
        .iter()
        .filter(|c| !snapshot.payment_statuses.get(&c.id).copied().unwrap_or(false))
        .count() as i64;

    FinancialMetrics {
        month,
        total_revenue: revenue.total_revenue,
        total_fixed_costs,
        total_variable_costs,
        total_sporadic_costs,
        gross_profit: revenue.gross_profit,
        net_profit,
        profit_per_partner: net_profit * PARTNER_SHARE,
        unpaid_fixed_costs,
        average_ticket: revenue.average_ticket,
        traffic_roi: revenue.traffic_roi,
    }
}
