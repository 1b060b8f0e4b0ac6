// src/handlers/dashboard.rs

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

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    params(MetricsQuery),
    responses(
        (status = 200, description = "Snapshot de métricas da rede (política padrão: degrade)", body = MetricsSnapshot),
        (status = 400, description = "Período ou parâmetros inválidos"),
        (status = 502, description = "Falha parcial (somente com failurePolicy=strict)"),
        (status = 503, description = "Banco de dados indisponível"),
        (status = 504, description = "Tempo limite excedido")
    )
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    // Dashboard prefere disponibilidade: sem política informada, degrada
    let request = query.into_request(FailurePolicy::Degrade)?;

    let snapshot = app_state.dashboard_service.get_snapshot(&request).await?;

    Ok((StatusCode::OK, Json(snapshot)))
}
