// src/db/pg_store.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        store::{MetricsStore, StoreError},
        DashboardRepository, FinanceRepository, InventoryRepository, OperationsRepository,
    },
    models::{
        aggregates::{FranchiseSales, OrderStatusCount, VehicleStats},
        finance::Invoice,
        inventory::StockPosition,
        period::DateRange,
    },
};

// Junta os repositórios de cada domínio atrás do contrato MetricsStore.
#[derive(Clone)]
pub struct PgMetricsStore {
    dashboard: DashboardRepository,
    finance: FinanceRepository,
    inventory: InventoryRepository,
    operations: OperationsRepository,
}

impl PgMetricsStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            dashboard: DashboardRepository::new(pool.clone()),
            finance: FinanceRepository::new(pool.clone()),
            inventory: InventoryRepository::new(pool.clone()),
            operations: OperationsRepository::new(pool),
        }
    }
}

#[async_trait]
impl MetricsStore for PgMetricsStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.dashboard.ping().await
    }

    async fn sales_by_franchise(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<FranchiseSales>, StoreError> {
        self.dashboard.sales_by_franchise(range, franchise_id).await
    }

    async fn invoices(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<Invoice>, StoreError> {
        self.finance.invoices(range, franchise_id).await
    }

    async fn order_status_counts(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<OrderStatusCount>, StoreError> {
        self.operations.order_status_counts(range, franchise_id).await
    }

    async fn stock_positions(
        &self,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<StockPosition>, StoreError> {
        self.inventory.stock_positions(franchise_id).await
    }

    async fn vehicle_stats(
        &self,
        horizon: NaiveDate,
        franchise_id: Option<Uuid>,
    ) -> Result<VehicleStats, StoreError> {
        self.dashboard.vehicle_stats(horizon, franchise_id).await
    }
}
