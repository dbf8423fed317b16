// src/db/variable_cost_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, month::YearMonth},
    models::finance::{VariableCost, VariableCostInput},
};

const COLUMNS: &str =
    "id, user_id, month, ad_accounts_purchase, gateway_percentage, withdrawal_count, p2p_transfers";

#[derive(Clone)]
pub struct VariableCostRepository {
    pool: PgPool,
}

impl VariableCostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Option<VariableCost>, AppError> {
        let cost = sqlx::query_as::<_, VariableCost>(&format!(
            "SELECT {COLUMNS} FROM variable_costs WHERE user_id = $1 AND month = $2"
        ))
        .bind(user_id)
        .bind(month.first_day())
        .fetch_optional(&self.pool)
        .await?;

        Ok(cost)
    }

    /// UPSERT por (usuário, mês): o banco garante um registro por mês.
    pub async fn upsert(
        &self,
        user_id: &str,
        input: &VariableCostInput,
    ) -> Result<VariableCost, AppError> {
        let cost = sqlx::query_as::<_, VariableCost>(&format!(
            "INSERT INTO variable_costs
                (user_id, month, ad_accounts_purchase, gateway_percentage, withdrawal_count, p2p_transfers)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, month)
             DO UPDATE SET
                ad_accounts_purchase = EXCLUDED.ad_accounts_purchase,
                gateway_percentage   = EXCLUDED.gateway_percentage,
                withdrawal_count     = EXCLUDED.withdrawal_count,
                p2p_transfers        = EXCLUDED.p2p_transfers,
                updated_at           = NOW()
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(input.month.first_day())
        .bind(input.ad_accounts_purchase)
        .bind(input.gateway_percentage)
        .bind(input.withdrawal_count)
        .bind(input.p2p_transfers)
        .fetch_one(&self.pool)
        .await?;

        Ok(cost)
    }
}
