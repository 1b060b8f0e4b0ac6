// tests/metrics_engine.rs

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use franchise_metrics::{
    common::error::AppError,
    config::{AppState, EngineConfig},
    db::{InMemoryStore, StoreError, StoreQuery},
    handlers,
    models::{
        dashboard::{FailurePolicy, MetricsQuery, MetricsRequest, PeriodSelector},
        finance::{Invoice, PaymentStatus, SalesRecord},
        fleet::{Vehicle, VehicleStatus},
        franchise::Franchise,
        inventory::{StockLevel, StockPosition},
        operations::{Order, OrderStatus},
    },
    services::dashboard_service::DashboardService,
};

const F1: Uuid = Uuid::from_u128(1);
const F2: Uuid = Uuid::from_u128(2);

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn franchise(id: Uuid, name: &str) -> Franchise {
    Franchise {
        id,
        name: name.to_string(),
        royalty_rate: Decimal::from(5),
        is_active: true,
    }
}

fn sale(franchise_id: Uuid, date: NaiveDate, gross: i64, transactions: i64) -> SalesRecord {
    SalesRecord {
        franchise_id,
        date,
        gross_sales: Decimal::from(gross),
        transaction_count: transactions,
        royalty_amount: Decimal::from(gross) * Decimal::new(5, 2),
        payment_status: PaymentStatus::Pending,
    }
}

fn order(franchise_id: Uuid, day: u32, status: OrderStatus) -> Order {
    Order {
        id: Uuid::new_v4(),
        franchise_id,
        order_date: Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap(),
        status,
        total_amount: Decimal::from(100),
    }
}

// F1 vendeu 1000 (500 no período anterior), F2 vendeu 300 (nada antes)
fn network() -> InMemoryStore {
    InMemoryStore::new()
        .with_franchises([franchise(F1, "Franquia Centro"), franchise(F2, "Franquia Norte")])
        .with_sales([
            sale(F1, date(2024, 3, 5), 600, 20),
            sale(F1, date(2024, 3, 20), 400, 20),
            sale(F1, date(2024, 2, 10), 500, 25),
            sale(F2, date(2024, 3, 12), 300, 10),
        ])
        .with_invoices([Invoice {
            id: Uuid::from_u128(100),
            franchise_id: F1,
            issue_date: date(2024, 3, 1),
            due_date: date(2024, 3, 15),
            paid_date: Some(date(2024, 3, 13)),
            amount: Decimal::from(500),
            status: PaymentStatus::Paid,
        }])
        .with_orders([
            order(F1, 3, OrderStatus::Pending),
            order(F1, 4, OrderStatus::InPreparation),
            order(F2, 8, OrderStatus::Delivered),
            order(F2, 9, OrderStatus::Cancelled),
        ])
        .with_stock([StockPosition {
            level: StockLevel {
                product_id: Uuid::from_u128(50),
                warehouse_id: Uuid::from_u128(60),
                quantity: 10,
                reserved_qty: 8,
            },
            franchise_id: Some(F2),
            unit_price: Decimal::new(1250, 2),
            min_stock: 3,
        }])
        .with_vehicles([
            Vehicle { id: Uuid::new_v4(), franchise_id: F1, status: VehicleStatus::Active, next_maintenance_date: Some(date(2024, 4, 3)) },
            Vehicle { id: Uuid::new_v4(), franchise_id: F1, status: VehicleStatus::Active, next_maintenance_date: Some(date(2024, 6, 1)) },
            Vehicle { id: Uuid::new_v4(), franchise_id: F2, status: VehicleStatus::Retired, next_maintenance_date: None },
        ])
}

fn fast_config() -> EngineConfig {
    EngineConfig {
        retry_delay: Duration::from_millis(1),
        ..Default::default()
    }
}

fn service(store: Arc<InMemoryStore>, config: EngineConfig) -> DashboardService {
    DashboardService::new(store.clone(), store, config)
}

fn request(policy: FailurePolicy) -> MetricsRequest {
    MetricsRequest {
        period: PeriodSelector::Named("month".to_string()),
        franchise_id: None,
        failure_policy: policy,
        top_n: Some(1),
    }
}

#[tokio::test]
async fn network_snapshot_matches_reference_scenario() {
    let store = Arc::new(network());
    let snapshot = service(store, fast_config())
        .get_snapshot_at(&request(FailurePolicy::Strict), now())
        .await
        .unwrap();

    let overview = &snapshot.network_overview;
    assert_eq!(overview.total_franchises, 2);
    assert_eq!(overview.active_franchises, 2);
    assert_eq!(overview.total_sales, Decimal::new(130000, 2));
    assert_eq!(overview.total_royalties, Decimal::new(6500, 2));
    assert_eq!(overview.average_ticket, Decimal::new(2600, 2));
    assert_eq!(overview.growth_rate, Decimal::new(1600, 1));
    assert_eq!(overview.total_vehicles, 2);

    let top = &snapshot.performance.top_performers;
    let bottom = &snapshot.performance.bottom_performers;
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].franchise_id, F1);
    assert_eq!(top[0].display_name, "Franquia Centro");
    assert_eq!(top[0].growth, Decimal::new(1000, 1));
    assert_eq!(bottom.len(), 1);
    assert_eq!(bottom[0].franchise_id, F2);
    assert_eq!(bottom[0].growth, Decimal::ONE_HUNDRED);

    assert_eq!(snapshot.operations.total_orders, 4);
    assert_eq!(snapshot.operations.pending_orders, 2);
    assert_eq!(snapshot.operations.delivered_orders, 1);
    assert_eq!(snapshot.operations.inventory_value, Decimal::new(12500, 2));
    assert_eq!(snapshot.operations.low_stock_alerts, 1);
    assert_eq!(snapshot.operations.maintenance_alerts, 1);

    assert!(snapshot.degraded_aggregates.is_empty());
    assert_eq!(snapshot.period.previous_end, snapshot.period.start);
    assert_eq!(snapshot.generated_at, now());
}

#[tokio::test]
async fn invoice_paid_on_day_twelve() {
    let store = Arc::new(network());
    let snapshot = service(store, fast_config())
        .get_snapshot_at(&request(FailurePolicy::Strict), now())
        .await
        .unwrap();

    assert_eq!(snapshot.financial.average_payment_delay, 12);
    assert_eq!(snapshot.financial.outstanding_amount, Decimal::ZERO);
    assert_eq!(snapshot.financial.total_revenue, Decimal::from(500));
    assert_eq!(snapshot.financial.pending_invoices, 0);
    assert_eq!(snapshot.financial.overdue_invoices, 0);
}

#[tokio::test]
async fn strict_policy_refuses_partial_snapshot() {
    let store = Arc::new(network());
    store.fail_always(StoreQuery::Invoices, StoreError::Transient("deadlock".into()));

    let result = service(store.clone(), fast_config())
        .get_snapshot_at(&request(FailurePolicy::Strict), now())
        .await;

    match result {
        Err(AppError::PartialAggregationFailure { failed }) => assert_eq!(failed, vec!["invoices"]),
        Err(other) => panic!("erro inesperado: {other}"),
        Ok(_) => panic!("snapshot parcial não deveria ser devolvido"),
    }
    // orçamento fixo: 2 tentativas
    assert_eq!(store.calls(StoreQuery::Invoices), 2);
}

#[tokio::test]
async fn degrade_policy_zeroes_failed_aggregates_only() {
    let store = Arc::new(network());
    store.fail_always(StoreQuery::Invoices, StoreError::Query("relation does not exist".into()));

    let snapshot = service(store, fast_config())
        .get_snapshot_at(&request(FailurePolicy::Degrade), now())
        .await
        .unwrap();

    assert_eq!(snapshot.degraded_aggregates, vec!["invoices".to_string()]);
    assert_eq!(snapshot.financial.total_revenue, Decimal::ZERO);
    assert_eq!(snapshot.financial.average_payment_delay, 0);
    assert_eq!(snapshot.network_overview.total_sales, Decimal::from(1300));
}

#[tokio::test]
async fn unavailable_store_surfaces_under_both_policies() {
    for policy in [FailurePolicy::Strict, FailurePolicy::Degrade] {
        let store = Arc::new(network());
        store.fail_always(StoreQuery::Ping, StoreError::Unavailable("connection refused".into()));

        let result = service(store, fast_config()).get_snapshot_at(&request(policy), now()).await;
        assert!(matches!(result, Err(AppError::DataStoreUnavailable(_))), "{policy:?}");
    }
}

#[tokio::test]
async fn transient_failure_recovers_on_retry() {
    let store = Arc::new(network());
    store.fail_times(StoreQuery::Sales, StoreError::Transient("serialization failure".into()), 1);

    let snapshot = service(store, fast_config())
        .get_snapshot_at(&request(FailurePolicy::Strict), now())
        .await
        .unwrap();

    assert!(snapshot.degraded_aggregates.is_empty());
    assert_eq!(snapshot.network_overview.growth_rate, Decimal::new(1600, 1));
}

#[tokio::test]
async fn request_timeout_aborts_in_flight_queries() {
    let store = Arc::new(network().with_latency(Duration::from_millis(200)));
    let config = EngineConfig {
        request_timeout: Duration::from_millis(20),
        ..fast_config()
    };

    let result = service(store, config)
        .get_snapshot_at(&request(FailurePolicy::Degrade), now())
        .await;

    assert!(matches!(result, Err(AppError::RequestTimeout)));
}

#[tokio::test]
async fn stored_royalties_win_over_current_rate() {
    // A taxa de F1 subiu de 5% para 8% no meio do mês: os lançamentos
    // antigos guardam 5%, o cadastro atual já diz 8%.
    let mut f1 = franchise(F1, "Franquia Centro");
    f1.royalty_rate = Decimal::from(8);
    let mut late_sale = sale(F1, date(2024, 3, 20), 400, 20);
    late_sale.royalty_amount = Decimal::from(32);

    let store = Arc::new(
        InMemoryStore::new()
            .with_franchises([f1, franchise(F2, "Franquia Norte")])
            .with_sales([
                sale(F1, date(2024, 3, 5), 600, 20), // 30.00 a 5%
                late_sale,                           // 32.00 a 8%
                sale(F2, date(2024, 3, 12), 300, 10), // 15.00 a 5%
            ]),
    );

    let snapshot = service(store, fast_config())
        .get_snapshot_at(&request(FailurePolicy::Strict), now())
        .await
        .unwrap();

    // soma do que foi gravado (77), não 1000 * 8% + 15 = 95
    assert_eq!(snapshot.network_overview.total_royalties, Decimal::new(7700, 2));
    assert_eq!(snapshot.network_overview.total_sales, Decimal::from(1300));
}

#[tokio::test]
async fn same_now_and_data_give_identical_snapshots() {
    let service = service(Arc::new(network()), fast_config());
    let first = service.get_snapshot_at(&request(FailurePolicy::Strict), now()).await.unwrap();
    let second = service.get_snapshot_at(&request(FailurePolicy::Strict), now()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn franchise_filter_applies_to_every_aggregate() {
    let mut req = request(FailurePolicy::Strict);
    req.franchise_id = Some(F2);
    req.top_n = Some(5);

    let snapshot = service(Arc::new(network()), fast_config())
        .get_snapshot_at(&req, now())
        .await
        .unwrap();

    assert_eq!(snapshot.network_overview.total_franchises, 1);
    assert_eq!(snapshot.network_overview.total_sales, Decimal::from(300));
    assert_eq!(snapshot.network_overview.growth_rate, Decimal::ONE_HUNDRED);
    assert_eq!(snapshot.network_overview.total_vehicles, 0);
    assert_eq!(snapshot.operations.total_orders, 2);
    assert_eq!(snapshot.operations.inventory_value, Decimal::from(125));
    assert_eq!(snapshot.financial.total_revenue, Decimal::ZERO);
    assert_eq!(snapshot.performance.top_performers.len(), 1);
    assert_eq!(snapshot.performance.top_performers[0].franchise_id, F2);
}

#[tokio::test]
async fn empty_period_is_all_zero_not_an_error() {
    let store = Arc::new(InMemoryStore::new());
    let snapshot = service(store, fast_config())
        .get_snapshot_at(&request(FailurePolicy::Strict), now())
        .await
        .unwrap();

    assert_eq!(snapshot.network_overview.total_sales, Decimal::ZERO);
    assert_eq!(snapshot.network_overview.growth_rate, Decimal::ZERO);
    assert_eq!(snapshot.network_overview.average_ticket, Decimal::ZERO);
    assert!(snapshot.performance.top_performers.is_empty());
}

#[tokio::test]
async fn unknown_period_token_is_rejected() {
    let mut req = request(FailurePolicy::Strict);
    req.period = PeriodSelector::Named("fortnight".to_string());

    let result = service(Arc::new(network()), fast_config()).get_snapshot_at(&req, now()).await;
    assert!(matches!(result, Err(AppError::InvalidPeriod(_))));
}

// ---
// Rotas HTTP (handlers chamados diretamente)
// ---

fn state(store: Arc<InMemoryStore>) -> AppState {
    AppState::with_service(service(store, fast_config()))
}

#[tokio::test]
async fn dashboard_route_degrades_by_default() {
    let store = Arc::new(network());
    store.fail_always(StoreQuery::Stock, StoreError::Transient("lock".into()));

    let response = handlers::dashboard::get_metrics(State(state(store)), Query(MetricsQuery::default()))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn reports_route_is_always_strict() {
    let store = Arc::new(network());
    store.fail_always(StoreQuery::Stock, StoreError::Transient("lock".into()));

    let query = MetricsQuery {
        failure_policy: Some(FailurePolicy::Degrade),
        ..Default::default()
    };
    let response = handlers::reports::get_report_metrics(State(state(store)), Query(query))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn invalid_query_maps_to_bad_request() {
    let query = MetricsQuery {
        period: Some("decade".to_string()),
        ..Default::default()
    };
    let response = handlers::dashboard::get_metrics(State(state(Arc::new(network()))), Query(query))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let query = MetricsQuery {
        top_n: Some(0),
        ..Default::default()
    };
    let response = handlers::dashboard::get_metrics(State(state(Arc::new(network()))), Query(query))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unavailable_store_maps_to_service_unavailable() {
    let store = Arc::new(network());
    store.fail_always(StoreQuery::Ping, StoreError::Unavailable("down".into()));

    let response = handlers::dashboard::get_metrics(State(state(store)), Query(MetricsQuery::default()))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
