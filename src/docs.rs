// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Franchise Metrics API",
        description = "Métricas agregadas por período da rede de franquias"
    ),
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_metrics,

        // --- Reports ---
        handlers::reports::get_report_metrics,
    ),
    components(
        schemas(
            // --- SNAPSHOT ---
            models::dashboard::FailurePolicy,
            models::dashboard::MetricsSnapshot,
            models::dashboard::NetworkOverview,
            models::dashboard::Performance,
            models::dashboard::RankedEntry,
            models::dashboard::OperationsMetrics,
            models::dashboard::FinancialMetrics,
            models::dashboard::SnapshotPeriod,

            // --- Domínio (somente leitura) ---
            models::franchise::Franchise,
            models::finance::PaymentStatus,
            models::finance::SalesRecord,
            models::finance::Invoice,
            models::operations::OrderStatus,
            models::operations::Order,
            models::inventory::StockLevel,
            models::fleet::VehicleStatus,
            models::fleet::Vehicle,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores da rede (degrada em caso de falha parcial)"),
        (name = "Reports", description = "Indicadores para relatórios financeiros (sempre completos)")
    )
)]
pub struct ApiDoc;
