// src/db/operations_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::StoreError,
    models::{aggregates::OrderStatusCount, period::DateRange},
};

#[derive(Clone)]
pub struct OperationsRepository {
    pool: PgPool,
}

impl OperationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Contagem de pedidos por status, abertos dentro do intervalo
    pub async fn order_status_counts(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<OrderStatusCount>, StoreError> {
        let counts = sqlx::query_as::<_, OrderStatusCount>(
            r#"
            SELECT status, COUNT(*) AS order_count
            FROM orders
            WHERE order_date >= $1
              AND order_date < $2
              AND ($3::uuid IS NULL OR franchise_id = $3)
            GROUP BY status
            ORDER BY status
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(franchise_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(counts)
    }
}
