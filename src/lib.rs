// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc};

/// Monta o router completo da API (rotas + Swagger).
pub fn app(app_state: AppState) -> Router {
    let metrics_routes = Router::new()
        .route("/dashboard/metrics", get(handlers::dashboard::get_metrics))
        .route("/reports/metrics", get(handlers::reports::get_report_metrics));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", metrics_routes)
        .with_state(app_state)
}
