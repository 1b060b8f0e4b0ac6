// src/services/dashboard_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, money::Money},
    config::EngineConfig,
    db::{FranchiseDirectory, MetricsStore},
    models::{
        aggregates::{FranchiseSales, PeriodTotals},
        dashboard::{MetricsRequest, MetricsSnapshot},
        period::ResolvedPeriod,
    },
    services::{
        aggregation_service::AggregationEngine,
        growth::growth,
        inventory_valuation::InventoryValuationEngine,
        period_resolver::PeriodResolver,
        ranking::PerformerRanker,
        report_assembler::{AssemblyInput, ReportAssembler},
        royalty_ledger::RoyaltyLedgerEngine,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    engine: AggregationEngine,
    config: EngineConfig,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn MetricsStore>,
        directory: Arc<dyn FranchiseDirectory>,
        config: EngineConfig,
    ) -> Self {
        Self {
            engine: AggregationEngine::new(store, directory, config.clone()),
            config,
        }
    }

    pub async fn get_snapshot(&self, request: &MetricsRequest) -> Result<MetricsSnapshot, AppError> {
        // "Agora" é lido UMA vez e vale para a requisição inteira
        self.get_snapshot_at(request, Utc::now()).await
    }

    /// Mesmo `now` + mesmos dados = mesmo snapshot.
    pub async fn get_snapshot_at(
        &self,
        request: &MetricsRequest,
        now: DateTime<Utc>,
    ) -> Result<MetricsSnapshot, AppError> {
        let period = PeriodResolver::resolve(&request.period, now)?;

        // Ao estourar o prazo, o future é descartado e todas as sub-consultas em voo são abortadas
        match tokio::time::timeout(self.config.request_timeout, self.build(request, &period, now)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    "⏱️ Métricas excederam o limite de {:?} (período {} a {})",
                    self.config.request_timeout,
                    period.current.start,
                    period.current.end
                );
                Err(AppError::RequestTimeout)
            }
        }
    }

    async fn build(
        &self,
        request: &MetricsRequest,
        period: &ResolvedPeriod,
        now: DateTime<Utc>,
    ) -> Result<MetricsSnapshot, AppError> {
        let totals = self
            .engine
            .collect(period, request.franchise_id, now, request.failure_policy)
            .await?;

        let current_sales = totals.current_totals();
        let previous_sales = totals.previous_totals();
        let growth_rate = growth(current_sales.gross_sales, previous_sales.gross_sales);

        let (current_map, previous_map, names) = ranking_inputs(&totals);
        let top_n = request.top_n.unwrap_or(self.config.default_top_n);
        let rankings = PerformerRanker::rank(&current_map, &previous_map, &names, top_n);

        for drift in RoyaltyLedgerEngine::detect_drift(&totals.current_sales, &totals.franchises) {
            tracing::warn!(
                "Royalty divergente na franquia {}: gravado {} / esperado {}",
                drift.franchise_id,
                drift.stored,
                drift.expected
            );
        }

        let ledger = RoyaltyLedgerEngine::reconcile(&totals.invoices, &period.current, now);
        let inventory = InventoryValuationEngine::value(&totals.stock);

        if inventory.invalid_levels > 0 {
            tracing::warn!(
                "{} saldo(s) de estoque inconsistente(s) fora do alerta de estoque baixo",
                inventory.invalid_levels
            );
        }

        tracing::debug!(
            "Snapshot montado: {} franquias, {} faturas, {} posições de estoque ({} inconsistentes)",
            totals.franchises.len(),
            totals.invoices.len(),
            totals.stock.len(),
            inventory.invalid_levels
        );

        Ok(ReportAssembler::assemble(AssemblyInput {
            period,
            totals: &totals,
            current_sales: &current_sales,
            growth_rate,
            rankings,
            ledger,
            inventory,
            generated_at: now,
        }))
    }
}

type SalesMap = BTreeMap<Uuid, Money>;

// Franquias ativas sem venda entram no ranking com zero.
// Franquias com venda entram mesmo se inativas (a venda aconteceu).
fn ranking_inputs(totals: &PeriodTotals) -> (SalesMap, SalesMap, HashMap<Uuid, String>) {
    let by_franchise = |rows: &[FranchiseSales]| -> SalesMap {
        rows.iter().map(|r| (r.franchise_id, r.gross_sales)).collect()
    };

    let mut current = by_franchise(&totals.current_sales);
    for franchise in totals.franchises.iter().filter(|f| f.is_active) {
        current.entry(franchise.id).or_insert(Decimal::ZERO);
    }

    let names = totals
        .franchises
        .iter()
        .map(|f| (f.id, f.name.clone()))
        .collect();

    (current, by_franchise(&totals.previous_sales), names)
}
