// src/db/store.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    aggregates::{FranchiseSales, OrderStatusCount, VehicleStats},
    finance::Invoice,
    franchise::Franchise,
    inventory::StockPosition,
    period::DateRange,
};

// Erros da camada de dados. Só `Transient` é repetido pelo motor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("banco de dados inacessível: {0}")]
    Unavailable(String),

    #[error("falha transitória: {0}")]
    Transient(String),

    #[error("falha na consulta: {0}")]
    Query(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

// SQLSTATEs que valem uma nova tentativa
const TRANSIENT_SQLSTATES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "55P03", // lock_not_available
    "57014", // query_canceled
    "53300", // too_many_connections
];

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => StoreError::Unavailable(e.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::Protocol(_) | sqlx::Error::WorkerCrashed => {
                StoreError::Transient(e.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
                if code.starts_with("08") || code == "57P01" {
                    // connection_exception / admin_shutdown
                    StoreError::Unavailable(e.to_string())
                } else if TRANSIENT_SQLSTATES.contains(&code.as_str()) {
                    StoreError::Transient(e.to_string())
                } else {
                    StoreError::Query(e.to_string())
                }
            }
            _ => StoreError::Query(e.to_string()),
        }
    }
}

// ---
// Contratos de leitura do motor de métricas
// ---
// Todas as consultas aplicam o MESMO filtro opcional de franquia.

#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Verifica se o banco responde.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Vendas somadas por franquia, com data dentro do intervalo.
    async fn sales_by_franchise(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<FranchiseSales>, StoreError>;

    /// Faturas emitidas OU pagas dentro do intervalo.
    async fn invoices(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<Invoice>, StoreError>;

    async fn order_status_counts(
        &self,
        range: DateRange,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<OrderStatusCount>, StoreError>;

    /// Estado atual do estoque (não depende do período).
    async fn stock_positions(
        &self,
        franchise_id: Option<Uuid>,
    ) -> Result<Vec<StockPosition>, StoreError>;

    /// Frota: total e alertas de manutenção com revisão até `horizon`.
    async fn vehicle_stats(
        &self,
        horizon: NaiveDate,
        franchise_id: Option<Uuid>,
    ) -> Result<VehicleStats, StoreError>;
}

#[async_trait]
pub trait FranchiseDirectory: Send + Sync {
    async fn franchises(&self, franchise_id: Option<Uuid>) -> Result<Vec<Franchise>, StoreError>;
}
