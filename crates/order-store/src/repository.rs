use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    Item, ItemId, NewOrder, OrderId, OrderQuery, OrderRecord, OrderStatus, Result, StoreError,
};

/// Read access to the menu.
///
/// The catalog is read-only from the order workflow's point of view.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// Returns every item ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Returns the items whose ids appear in `ids`, ordered by id.
    ///
    /// Unknown ids are skipped, duplicates are returned once.
    async fn get_items(&self, ids: &[ItemId]) -> Result<Vec<Item>>;
}

/// Core trait for order persistence.
///
/// Each method is one atomic unit of work against the store. All
/// implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Writes an order and all its lines together.
    ///
    /// The new order starts as `Pending`. Either the order and every line
    /// are stored or nothing is.
    async fn create(&self, order: NewOrder) -> Result<OrderRecord>;

    /// Loads one order with its lines.
    ///
    /// Returns None if the order doesn't exist.
    async fn get_by_id(&self, id: OrderId) -> Result<Option<OrderRecord>>;

    /// Lists orders matching a query, most recently created first.
    async fn list_filtered(&self, query: OrderQuery) -> Result<Vec<OrderRecord>>;

    /// Replaces the status of an order and bumps `updated_at`.
    ///
    /// Fails with `OrderNotFound` if the order doesn't exist.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()>;

    /// Deletes an order together with its lines.
    ///
    /// Fails with `OrderNotFound` if the order doesn't exist.
    async fn delete(&self, id: OrderId) -> Result<()>;
}

/// Extension trait providing convenience methods for repositories.
#[async_trait]
pub trait OrderRepositoryExt: OrderRepository {
    /// Checks if an order exists.
    async fn order_exists(&self, id: OrderId) -> Result<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    /// Counts every stored order.
    async fn order_count(&self) -> Result<usize> {
        Ok(self.list_filtered(OrderQuery::new()).await?.len())
    }
}

// Blanket implementation for all OrderRepository implementations
impl<T: OrderRepository + ?Sized> OrderRepositoryExt for T {}

/// Checks that a catalog price is positive.
pub fn validate_item_price(title: &str, price: Decimal) -> Result<()> {
    if crate::model::normalize_price(price) <= Decimal::ZERO {
        return Err(StoreError::InvalidItem(format!(
            "Price of {title:?} must be positive, got {price}"
        )));
    }
    Ok(())
}

/// Checks the structural rules every stored order must satisfy.
pub fn validate_new_order(order: &NewOrder) -> Result<()> {
    if order.lines.is_empty() {
        return Err(StoreError::InvalidOrder(
            "Cannot store an order without lines".to_string(),
        ));
    }
    if let Some(line) = order.lines.iter().find(|line| line.count == 0) {
        return Err(StoreError::InvalidOrder(format!(
            "Line for item {} has zero count",
            line.item.id
        )));
    }
    Ok(())
}
