//! Order endpoints: listing, creation, status updates, deletion and reports.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{
    CreateOrder, LineInput, OrderId, OrderRecord, OrderReport, OrderService, OrderStatus,
    UpdateOrderStatus,
};
use order_store::{ItemCatalog, OrderRepository};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub order_service: OrderService<S>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub table_number: Option<i64>,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

/// One requested line. `count` may arrive as a number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    #[serde(default, deserialize_with = "lenient_int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

// Anything that isn't an integer or an integer string becomes None and is
// reported by validation as an invalid line.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl CreateOrderRequest {
    fn into_command(self) -> Result<CreateOrder, ApiError> {
        let table_number = self
            .table_number
            .ok_or_else(|| ApiError::BadRequest("table_number обязателен.".to_string()))?;
        let items = self
            .items
            .into_iter()
            .map(|line| LineInput {
                item_id: line.id,
                count: line.count,
            })
            .collect();
        Ok(CreateOrder::new(table_number, items))
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub status: OrderStatus,
    pub table_number: i32,
    pub items: Vec<OrderLineResponse>,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub total: Decimal,
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        let total_price = order.total_price();
        let items = order
            .lines
            .into_iter()
            .map(|line| OrderLineResponse {
                id: line.item.id.as_i64(),
                title: line.item.title,
                price: line.item.price,
                count: line.count,
            })
            .collect();
        Self {
            id: order.id.as_i64(),
            status: order.status,
            table_number: order.table_number,
            items,
            total_price,
        }
    }
}

impl From<OrderReport> for ReportResponse {
    fn from(report: OrderReport) -> Self {
        Self {
            total: report.total,
            orders: report.orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}

// -- Handlers --

/// GET /api/v1/orders: list orders, newest first, optionally filtered by `q`.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.order_service.list_orders(params.q.as_deref()).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// POST /api/v1/orders: validate, price and store a new order.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(req) = payload?;
    let order = state.order_service.create_order(req.into_command()?).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// PUT /api/v1/orders/{id}: replace the status of an order.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let cmd = UpdateOrderStatus::new(OrderId::new(id), req.status.unwrap_or_default());
    state.order_service.update_status(cmd).await?;
    Ok(Json(MessageResponse {
        msg: "field update success",
    }))
}

/// DELETE /api/v1/orders/{id}: delete an order and its lines.
#[tracing::instrument(skip(state))]
pub async fn delete<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.order_service.delete_order(OrderId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/orders/revenue: total and list of ready orders.
#[tracing::instrument(skip(state))]
pub async fn revenue<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = state.order_service.revenue().await?;
    Ok(Json(report.into()))
}

/// GET /api/v1/orders/paid: total and list of paid orders.
#[tracing::instrument(skip(state))]
pub async fn paid<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report = state.order_service.paid_orders().await?;
    Ok(Json(report.into()))
}

/// Fallback for any method a route does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
