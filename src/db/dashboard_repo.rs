// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::StoreError,
    models::{
        aggregates::{FranchiseSales, VehicleStats},
        period::DateRange,
    },
};

// Leituras agregadas de vendas e frota.
// Datas de calendário são comparadas como meia-noite UTC, igual ao DateRange.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // 1. Vendas por franquia no intervalo (base dos totais da rede E do ranking)
    pub async fn sales_by_franchise(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<FranchiseSales>, StoreError> {
        let rows = sqlx::query_as::<_, FranchiseSales>(
            r#"
            SELECT
                franchise_id,
                COALESCE(SUM(gross_sales), 0)                AS gross_sales,
                COALESCE(SUM(royalty_amount), 0)             AS royalty_amount,
                COALESCE(SUM(transaction_count), 0)::BIGINT  AS transaction_count,
                COUNT(*)                                     AS record_count
            FROM sales_records
            WHERE (sale_date::timestamp AT TIME ZONE 'UTC') >= $1
              AND (sale_date::timestamp AT TIME ZONE 'UTC') < $2
              AND ($3::uuid IS NULL OR franchise_id = $3)
            GROUP BY franchise_id
            ORDER BY franchise_id
            "#,
        )
            .bind(range.start)
            .bind(range.end)
            .bind(franchise_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // 2. Frota (não depende do período)
    pub async fn vehicle_stats(
        &self,
        horizon: NaiveDate,
        franchise_id: Option<Uuid>,
    ) -> Result<VehicleStats, StoreError> {
        let stats = sqlx::query_as::<_, VehicleStats>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status <> 'RETIRED') AS total_vehicles,
                COUNT(*) FILTER (
                    WHERE status = 'MAINTENANCE'
                       OR (status = 'ACTIVE' AND next_maintenance_date <= $1)
                ) AS maintenance_alerts
            FROM vehicles
            WHERE ($2::uuid IS NULL OR franchise_id = $2)
            "#,
        )
            .bind(horizon)
            .bind(franchise_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(stats)
    }
}
