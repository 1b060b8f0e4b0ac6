// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{FailurePolicy, MetricsQuery, MetricsSnapshot},
};

// GET /api/reports/metrics
// Relatório financeiro nunca aceita dados parciais: a política é sempre strict.
#[utoipa::path(
    get,
    path = "/api/reports/metrics",
    tag = "Reports",
    params(MetricsQuery),
    responses(
        (status = 200, description = "Snapshot completo para geração de relatório", body = MetricsSnapshot),
        (status = 400, description = "Período ou parâmetros inválidos"),
        (status = 502, description = "Uma ou mais sub-consultas falharam"),
        (status = 503, description = "Banco de dados indisponível"),
        (status = 504, description = "Tempo limite excedido")
    )
)]
pub async fn get_report_metrics(
    State(app_state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    if query.failure_policy == Some(FailurePolicy::Degrade) {
        tracing::warn!("failurePolicy=degrade ignorado na rota de relatórios");
    }
    let mut request = query.into_request(FailurePolicy::Strict)?;
    request.failure_policy = FailurePolicy::Strict;

    let snapshot = app_state.dashboard_service.get_snapshot(&request).await?;

    Ok((StatusCode::OK, Json(snapshot)))
}
