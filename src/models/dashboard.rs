// src/models/dashboard.rs

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::error::AppError;

// ---
// Requisição ao motor de métricas (já autorizada pelo chamador)
// ---

// O que fazer quando uma sub-consulta esgota as tentativas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Strict,  // Relatórios: tudo ou nada
    Degrade, // Dashboard: zera o que falhou e segue
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodSelector {
    Named(String), // week | month | quarter | year
    Explicit { start: DateTime<Utc>, end: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsRequest {
    pub period: PeriodSelector,
    pub franchise_id: Option<Uuid>,
    pub failure_policy: FailurePolicy,
    pub top_n: Option<usize>,
}

// ---
// Snapshot (saída do motor, nunca persistido)
// ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub franchise_id: Uuid,
    #[schema(example = "Franquia Centro")]
    pub display_name: String,
    #[schema(example = "1000.00")]
    pub sales: Decimal,
    #[schema(example = "100.0")]
    pub growth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkOverview {
    pub total_franchises: i64,
    pub active_franchises: i64,
    pub total_vehicles: i64,
    pub total_sales: Decimal,
    pub total_royalties: Decimal,
    pub average_ticket: Decimal,
    #[schema(example = "160.0")]
    pub growth_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub top_performers: Vec<RankedEntry>,
    pub bottom_performers: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationsMetrics {
    pub total_orders: i64,
    pub pending_orders: i64, // PENDING + CONFIRMED + IN_PREPARATION
    pub delivered_orders: i64,
    pub inventory_value: Decimal,
    pub low_stock_alerts: i64,
    pub maintenance_alerts: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub total_revenue: Decimal,
    pub pending_invoices: i64,
    pub overdue_invoices: i64,
    // Em dias inteiros
    pub average_payment_delay: i64,
    pub outstanding_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub previous_start: DateTime<Utc>,
    pub previous_end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub network_overview: NetworkOverview,
    pub performance: Performance,
    pub operations: OperationsMetrics,
    pub financial: FinancialMetrics,
    pub period: SnapshotPeriod,
    pub generated_at: DateTime<Utc>,
    // Sub-agregações substituídas por zero (política "degrade")
    pub degraded_aggregates: Vec<String>,
}

// ---
// DTO: parâmetros de query das rotas de métricas
// ---

pub const DEFAULT_PERIOD: &str = "month";

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct MetricsQuery {
    /// week | month | quarter | year. Ignorado quando start/end são enviados.
    #[param(example = "month")]
    pub period: Option<String>,

    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,

    pub franchise_id: Option<Uuid>,

    #[validate(range(min = 1, max = 50, message = "topN deve estar entre 1 e 50."))]
    pub top_n: Option<usize>,

    #[param(inline)]
    pub failure_policy: Option<FailurePolicy>,
}

impl MetricsQuery {
    /// Converte a query em requisição ao motor. `default_policy` vale quando
    /// a política não é informada.
    pub fn into_request(self, default_policy: FailurePolicy) -> Result<MetricsRequest, AppError> {
        let period = match (self.start, self.end) {
            (Some(start), Some(end)) => PeriodSelector::Explicit { start, end },
            (None, None) => PeriodSelector::Named(self.period.unwrap_or_else(|| DEFAULT_PERIOD.to_string())),
            _ => {
                return Err(AppError::invalid_period(
                    "Informe start e end juntos, ou nenhum dos dois.",
                ))
            }
        };

        Ok(MetricsRequest {
            period,
            franchise_id: self.franchise_id,
            failure_policy: self.failure_policy.unwrap_or(default_policy),
            top_n: self.top_n,
        })
    }
}
