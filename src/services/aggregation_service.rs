// src/services/aggregation_service.rs

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::EngineConfig,
    db::{FranchiseDirectory, MetricsStore, StoreError},
    models::{aggregates::PeriodTotals, dashboard::FailurePolicy, period::ResolvedPeriod},
};

// Nomes das sub-consultas, usados em logs, erros e `degradedAggregates`
pub const PING: &str = "ping";
pub const SALES_CURRENT: &str = "sales.current";
pub const SALES_PREVIOUS: &str = "sales.previous";
pub const INVOICES: &str = "invoices";
pub const ORDERS: &str = "orders";
pub const STOCK: &str = "stock";
pub const VEHICLES: &str = "vehicles";
pub const FRANCHISES: &str = "franchises";

// Dispara as sub-consultas independentes em paralelo e junta tudo numa
// única barreira. Não guarda estado entre requisições.
#[derive(Clone)]
pub struct AggregationEngine {
    store: Arc<dyn MetricsStore>,
    directory: Arc<dyn FranchiseDirectory>,
    config: EngineConfig,
}

impl AggregationEngine {
    pub fn new(
        store: Arc<dyn MetricsStore>,
        directory: Arc<dyn FranchiseDirectory>,
        config: EngineConfig,
    ) -> Self {
        Self { store, directory, config }
    }

    pub async fn collect(
        &self,
        period: &ResolvedPeriod,
        franchise_id: Option<Uuid>,
        now: DateTime<Utc>,
        policy: FailurePolicy,
    ) -> Result<PeriodTotals, AppError> {
        let store = self.store.as_ref();

        // Ping passa pelo mesmo orçamento de tentativas das sub-consultas
        match self.with_retry(PING, || store.ping()).await {
            Ok(()) => {}
            Err(StoreError::Unavailable(msg)) => {
                tracing::error!("🔥 Banco de dados não respondeu ao ping: {}", msg);
                return Err(AppError::DataStoreUnavailable(msg));
            }
            Err(e) => match policy {
                FailurePolicy::Strict => {
                    return Err(AppError::PartialAggregationFailure { failed: vec![PING.to_string()] });
                }
                // As sub-consultas dizem o que de fato falhou
                FailurePolicy::Degrade => {
                    tracing::warn!("Ping falhou ({}); seguindo com as sub-consultas", e);
                }
            },
        }

        let horizon = now.date_naive() + Duration::days(self.config.maintenance_window_days);

        let (current, previous, invoices, orders, stock, vehicles, franchises) = tokio::join!(
            self.with_retry(SALES_CURRENT, || store.sales_by_franchise(period.current, franchise_id)),
            self.with_retry(SALES_PREVIOUS, || store.sales_by_franchise(period.previous, franchise_id)),
            self.with_retry(INVOICES, || store.invoices(period.current, franchise_id)),
            self.with_retry(ORDERS, || store.order_status_counts(period.current, franchise_id)),
            self.with_retry(STOCK, || store.stock_positions(franchise_id)),
            self.with_retry(VEHICLES, || store.vehicle_stats(horizon, franchise_id)),
            self.with_retry(FRANCHISES, || self.directory.franchises(franchise_id)),
        );

        let mut settlement = Settlement::default();
        let totals = PeriodTotals {
            current_sales: settlement.take(SALES_CURRENT, current),
            previous_sales: settlement.take(SALES_PREVIOUS, previous),
            invoices: settlement.take(INVOICES, invoices),
            order_counts: settlement.take(ORDERS, orders),
            stock: settlement.take(STOCK, stock),
            vehicles: settlement.take(VEHICLES, vehicles),
            franchises: settlement.take(FRANCHISES, franchises),
            degraded: Vec::new(),
        };

        settlement.apply(policy, totals)
    }

    // Repete só erros transitórios, com espera crescente entre tentativas
    async fn with_retry<T, F, Fut>(&self, name: &'static str, mut query: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match query().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        "Sub-consulta '{}' falhou (tentativa {}/{}): {}. Repetindo...",
                        name,
                        attempt,
                        max_attempts,
                        e
                    );
                    tokio::time::sleep(self.config.retry_delay * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Sub-consulta '{}' falhou após {} tentativa(s): {}",
                        name,
                        attempt,
                        e
                    );
                    return Err(e);
                }
            }
        }
    }
}

// Resultado da barreira: o que falhou e se alguma falha foi de indisponibilidade.
#[derive(Debug, Default)]
struct Settlement {
    failed: Vec<&'static str>,
    unavailable: Option<String>,
}

impl Settlement {
    // Sub-agregado com falha vira zero; a política decide depois se isso é aceitável
    fn take<T: Default>(&mut self, name: &'static str, result: Result<T, StoreError>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                if let StoreError::Unavailable(msg) = e {
                    self.unavailable.get_or_insert(msg);
                }
                self.failed.push(name);
                T::default()
            }
        }
    }

    fn apply(self, policy: FailurePolicy, mut totals: PeriodTotals) -> Result<PeriodTotals, AppError> {
        // Indisponibilidade nunca é zerada em silêncio
        if let Some(msg) = self.unavailable {
            return Err(AppError::DataStoreUnavailable(msg));
        }
        if self.failed.is_empty() {
            return Ok(totals);
        }

        let failed: Vec<String> = self.failed.iter().map(|s| s.to_string()).collect();
        match policy {
            FailurePolicy::Strict => Err(AppError::PartialAggregationFailure { failed }),
            FailurePolicy::Degrade => {
                tracing::warn!("⚠️ Snapshot degradado, sub-agregados zerados: {}", failed.join(", "));
                totals.degraded = failed;
                Ok(totals)
            }
        }
    }
}
