// src/db/sporadic_cost_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, month::YearMonth},
    models::finance::{NewSporadicCost, SporadicCost, UpdateSporadicCostPayload},
};

const COLUMNS: &str = "id, user_id, name, description, amount, date, category";

#[derive(Clone)]
pub struct SporadicCostRepository {
    pool: PgPool,
}

impl SporadicCostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Custos cuja data cai no mês: [dia 1, dia 1 do mês seguinte).
    pub async fn list_by_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Vec<SporadicCost>, AppError> {
        let costs = sqlx::query_as::<_, SporadicCost>(&format!(
            "SELECT {COLUMNS} FROM sporadic_costs
             WHERE user_id = $1 AND date >= $2 AND date < $3
             ORDER BY date DESC, name ASC"
        ))
        .bind(user_id)
        .bind(month.first_day())
        .bind(month.next_month_start())
        .fetch_all(&self.pool)
        .await?;

        Ok(costs)
    }

    pub async fn create(
        &self,
        user_id: &str,
        new: &NewSporadicCost,
    ) -> Result<SporadicCost, AppError> {
        let cost = sqlx::query_as::<_, SporadicCost>(&format!(
            "INSERT INTO sporadic_costs (user_id, name, description, amount, date, category)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.amount)
        .bind(new.date)
        .bind(&new.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(cost)
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: &UpdateSporadicCostPayload,
    ) -> Result<Option<SporadicCost>, AppError> {
        let cost = sqlx::query_as::<_, SporadicCost>(&format!(
            "UPDATE sporadic_costs SET
                name        = COALESCE($3, name),
                description = COALESCE($4, description),
                amount      = COALESCE($5, amount),
                date        = COALESCE($6, date),
                category    = COALESCE($7, category),
                updated_at  = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.amount)
        .bind(changes.date)
        .bind(&changes.category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cost)
    }

    /// Exclusão física (custos avulsos não têm histórico).
    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sporadic_costs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
