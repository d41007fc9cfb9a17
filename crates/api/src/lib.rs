//! HTTP API server with observability for the café order service.
//!
//! Provides JSON endpoints for the menu, order creation, status updates,
//! deletion and revenue reports, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::OrderService;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryStore, ItemCatalog, OrderRepository};
use rust_decimal::Decimal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::{self, AppState, method_not_allowed};

/// Menu used when the server runs without a database.
pub const DEMO_MENU: [(&str, i64); 5] = [
    ("Кофе", 150),
    ("Торт", 250),
    ("Чай", 100),
    ("Круассан", 180),
    ("Сэндвич", 320),
];

/// Creates the Axum application router with all routes and shared state.
///
/// `get` would also answer HEAD, so the JSON routes reject it explicitly.
pub fn create_app<S: OrderRepository + ItemCatalog + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route(
            "/api/v1/orders",
            get(orders::list::<S>)
                .post(orders::create::<S>)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/orders/revenue",
            get(orders::revenue::<S>)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/orders/paid",
            get(orders::paid::<S>)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/orders/{id}",
            axum::routing::put(orders::update::<S>)
                .delete(orders::delete::<S>)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/items",
            get(routes::items::list::<S>)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps a store in the shared handler state.
pub fn create_state<S: OrderRepository + ItemCatalog>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        order_service: OrderService::new(store),
    })
}

/// Builds an in-memory store whose catalog holds `DEMO_MENU`.
pub async fn demo_store() -> order_store::Result<InMemoryStore> {
    InMemoryStore::with_items(
        DEMO_MENU
            .iter()
            .map(|&(title, price)| (title, Decimal::new(price, 0))),
    )
    .await
}

/// Registers descriptions for the counters the order service emits.
pub fn describe_metrics() {
    metrics::describe_counter!("orders_created_total", "Orders stored");
    metrics::describe_counter!(
        "orders_rejected_total",
        "Order requests rejected by validation, by reason"
    );
    metrics::describe_counter!(
        "orders_status_updated_total",
        "Status updates, by new status"
    );
    metrics::describe_counter!("orders_deleted_total", "Orders deleted");
}
