// src/db/fixed_cost_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, month::YearMonth},
    models::finance::{FixedCost, NewFixedCost, PaymentStatus, UpdateFixedCostPayload},
};

const COLUMNS: &str = "id, user_id, name, description, amount, due_day, category, is_active";

#[derive(Clone)]
pub struct FixedCostRepository {
    pool: PgPool,
}

impl FixedCostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CUSTOS FIXOS
    // =========================================================================

    /// Custos ativos, ordenados pelo dia de vencimento.
    pub async fn list_active(&self, user_id: &str) -> Result<Vec<FixedCost>, AppError> {
        let costs = sqlx::query_as::<_, FixedCost>(&format!(
            "SELECT {COLUMNS} FROM fixed_costs
             WHERE user_id = $1 AND is_active = TRUE
             ORDER BY due_day ASC, name ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(costs)
    }

    pub async fn create(&self, user_id: &str, new: &NewFixedCost) -> Result<FixedCost, AppError> {
        let cost = sqlx::query_as::<_, FixedCost>(&format!(
            "INSERT INTO fixed_costs (user_id, name, description, amount, due_day, category)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.amount)
        .bind(new.due_day)
        .bind(new.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(cost)
    }

    /// Atualização parcial. `None` se o custo não existe (ou já foi excluído).
    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: &UpdateFixedCostPayload,
    ) -> Result<Option<FixedCost>, AppError> {
        let cost = sqlx::query_as::<_, FixedCost>(&format!(
            "UPDATE fixed_costs SET
                name        = COALESCE($3, name),
                description = COALESCE($4, description),
                amount      = COALESCE($5, amount),
                due_day     = COALESCE($6, due_day),
                category    = COALESCE($7::fixed_cost_category, category),
                updated_at  = NOW()
             WHERE id = $1 AND user_id = $2 AND is_active = TRUE
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.amount)
        .bind(changes.due_day)
        .bind(changes.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cost)
    }

    /// Exclusão lógica. Retorna `false` se nada foi alterado.
    pub async fn deactivate(&self, user_id: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE fixed_costs SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND user_id = $2 AND is_active = TRUE",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  PAGAMENTOS (por mês)
    // =========================================================================

    pub async fn list_payment_statuses(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Vec<PaymentStatus>, AppError> {
        let statuses = sqlx::query_as::<_, PaymentStatus>(
            "SELECT p.fixed_cost_id, p.month, p.is_paid, p.updated_at
             FROM fixed_cost_payments p
             JOIN fixed_costs fc ON fc.id = p.fixed_cost_id
             WHERE p.user_id = $1 AND p.month = $2 AND fc.is_active = TRUE",
        )
        .bind(user_id)
        .bind(month.first_day())
        .fetch_all(&self.pool)
        .await?;

        Ok(statuses)
    }

    /// Inverte o status de pagamento do custo no mês (o primeiro toque marca
    /// como pago). `None` se o custo não existe ou está inativo.
    pub async fn toggle_payment(
        &self,
        user_id: &str,
        id: Uuid,
        month: YearMonth,
    ) -> Result<Option<PaymentStatus>, AppError> {
        let status = sqlx::query_as::<_, PaymentStatus>(
            "INSERT INTO fixed_cost_payments (user_id, fixed_cost_id, month, is_paid)
             SELECT $1, fc.id, $3::date, TRUE
             FROM fixed_costs fc
             WHERE fc.id = $2 AND fc.user_id = $1 AND fc.is_active = TRUE
             ON CONFLICT (user_id, fixed_cost_id, month)
             DO UPDATE SET
                is_paid = NOT fixed_cost_payments.is_paid,
                updated_at = NOW()
             RETURNING fixed_cost_id, month, is_paid, updated_at",
        )
        .bind(user_id)
        .bind(id)
        .bind(month.first_day())
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }
}
