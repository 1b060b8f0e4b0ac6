// src/db/inventory_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::store::StoreError, models::inventory::StockPosition};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Saldos unidos ao catálogo (preço e mínimo) e ao dono do depósito.
    /// Com filtro de franquia, só entram os depósitos daquela franquia.
    pub async fn stock_positions(
        &self,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<StockPosition>, StoreError> {
        let positions = sqlx::query_as::<_, StockPosition>(
            r#"
            SELECT
                s.product_id,
                s.warehouse_id,
                s.quantity::BIGINT      AS quantity,
                s.reserved_qty::BIGINT  AS reserved_qty,
                w.franchise_id,
                p.unit_price,
                p.min_stock::BIGINT     AS min_stock
            FROM stock_levels s
            JOIN warehouses w ON w.id = s.warehouse_id
            JOIN products p ON p.id = s.product_id
            WHERE ($1::uuid IS NULL OR w.franchise_id = $1)
            ORDER BY s.product_id, s.warehouse_id
            "#,
        )
            .bind(franchise_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(positions)
    }
}
