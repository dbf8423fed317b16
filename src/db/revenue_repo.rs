// src/db/revenue_repo.rs

use sqlx::PgPool;

use crate::{
    common::{error::AppError, month::YearMonth},
    models::finance::{Revenue, RevenueInput},
};

const COLUMNS: &str = "id, user_id, month, total_revenue, sales_count, traffic_investment";

#[derive(Clone)]
pub struct RevenueRepository {
    pool: PgPool,
}

impl RevenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_month(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<Option<Revenue>, AppError> {
        let revenue = sqlx::query_as::<_, Revenue>(&format!(
            "SELECT {COLUMNS} FROM revenues WHERE user_id = $1 AND month = $2"
        ))
        .bind(user_id)
        .bind(month.first_day())
        .fetch_optional(&self.pool)
        .await?;

        Ok(revenue)
    }

    /// Histórico: os `limit` meses mais recentes, do mais novo ao mais antigo.
    pub async fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<Revenue>, AppError> {
        let history = sqlx::query_as::<_, Revenue>(&format!(
            "SELECT {COLUMNS} FROM revenues WHERE user_id = $1 ORDER BY month DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    pub async fn upsert(&self, user_id: &str, input: &RevenueInput) -> Result<Revenue, AppError> {
        let revenue = sqlx::query_as::<_, Revenue>(&format!(
            "INSERT INTO revenues (user_id, month, total_revenue, sales_count, traffic_investment)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, month)
             DO UPDATE SET
                total_revenue      = EXCLUDED.total_revenue,
                sales_count        = EXCLUDED.sales_count,
                traffic_investment = EXCLUDED.traffic_investment,
                updated_at         = NOW()
             RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(input.month.first_day())
        .bind(input.total_revenue)
        .bind(input.sales_count)
        .bind(input.traffic_investment)
        .fetch_one(&self.pool)
        .await?;

        Ok(revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const USER: &str = "test-user";

    fn input(month: YearMonth, total_revenue: Decimal) -> RevenueInput {
        RevenueInput {
            month,
            total_revenue,
            sales_count: 50,
            traffic_investment: dec!(2000.00),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn upsert_replaces_the_month(pool: PgPool) {
        let repo = RevenueRepository::new(pool);
        let january = YearMonth::new(2025, 1).unwrap();

        let first = repo.upsert(USER, &input(january, dec!(10000.00))).await.unwrap();
        let second = repo.upsert(USER, &input(january, dec!(12500.50))).await.unwrap();
        assert_eq!(first.id, second.id);

        let found = repo.find_by_month(USER, january).await.unwrap().unwrap();
        assert_eq!(found.total_revenue, dec!(12500.50));
        assert_eq!(repo.list_recent(USER, 6).await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn history_is_newest_first_and_limited(pool: PgPool) {
        let repo = RevenueRepository::new(pool);
        for month in 1..=8 {
            let ym = YearMonth::new(2024, month).unwrap();
            repo.upsert(USER, &input(ym, Decimal::from(month * 1000))).await.unwrap();
        }
        repo.upsert("outro-usuario", &input(YearMonth::new(2025, 1).unwrap(), dec!(1.00)))
            .await
            .unwrap();

        let months: Vec<u32> = repo
            .list_recent(USER, 6)
            .await
            .unwrap()
            .iter()
            .map(|r| YearMonth::from_date(r.month).month())
            .collect();
        assert_eq!(months, vec![8, 7, 6, 5, 4, 3]);
    }
}
