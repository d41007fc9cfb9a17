//! Menu endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::Item;
use order_store::{ItemCatalog, OrderRepository};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i64,
    pub title: String,
    pub price: Decimal,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.as_i64(),
            title: item.title,
            price: item.price,
        }
    }
}

/// GET /api/v1/items: every menu item ordered by id.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderRepository + ItemCatalog + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.order_service.list_items().await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}
