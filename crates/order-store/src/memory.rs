use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{
    Item, ItemId, NewOrder, OrderId, OrderQuery, OrderRecord, OrderStatus, Result, StoreError,
    repository::{ItemCatalog, OrderRepository, validate_item_price, validate_new_order},
};

#[derive(Default)]
struct MemoryState {
    items: BTreeMap<ItemId, Item>,
    orders: BTreeMap<OrderId, OrderRecord>,
    last_item_id: i64,
    last_order_id: i64,
}

/// In-memory store implementation.
///
/// This implementation keeps the catalog and all orders in memory and
/// provides the same interface as the PostgreSQL implementation. Every
/// operation holds the lock for its whole unit of work.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose catalog holds the given `(title, price)` items,
    /// numbered from 1 in order.
    pub async fn with_items<I, T>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Decimal)>,
        T: Into<String>,
    {
        let store = Self::new();
        for (title, price) in items {
            store.insert_item(title, price).await?;
        }
        Ok(store)
    }

    /// Adds an item to the catalog and returns it with its assigned id.
    ///
    /// Fails with `InvalidItem` if the price is not positive.
    pub async fn insert_item(&self, title: impl Into<String>, price: Decimal) -> Result<Item> {
        let title = title.into();
        validate_item_price(&title, price)?;

        let mut state = self.state.write().await;
        state.last_item_id += 1;
        let item = Item::new(state.last_item_id, title, price);
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    /// Returns the number of stored orders.
    pub async fn order_len(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Clears all orders. The catalog is kept.
    pub async fn clear_orders(&self) {
        self.state.write().await.orders.clear();
    }
}

#[async_trait]
impl ItemCatalog for InMemoryStore {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let state = self.state.read().await;
        Ok(state.items.values().cloned().collect())
    }

    async fn get_items(&self, ids: &[ItemId]) -> Result<Vec<Item>> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create(&self, order: NewOrder) -> Result<OrderRecord> {
        validate_new_order(&order)?;

        let mut state = self.state.write().await;

        if let Some(line) = order
            .lines
            .iter()
            .find(|line| !state.items.contains_key(&line.item.id))
        {
            return Err(StoreError::InvalidOrder(format!(
                "Item {} is not in the catalog",
                line.item.id
            )));
        }

        state.last_order_id += 1;
        let now = Utc::now();
        let record = OrderRecord {
            id: OrderId::new(state.last_order_id),
            table_number: order.table_number,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            lines: order.lines,
        };
        state.orders.insert(record.id, record.clone());

        Ok(record)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<OrderRecord>> {
        let state = self.state.read().await;
        Ok(state.orders.get(&id).cloned())
    }

    async fn list_filtered(&self, query: OrderQuery) -> Result<Vec<OrderRecord>> {
        let state = self.state.read().await;
        let mut orders: Vec<_> = state
            .orders
            .values()
            .filter(|order| query.matches(order))
            .cloned()
            .collect();

        // Newest first; ids break ties between orders created in the same instant
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(orders)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(&id)
            .ok_or(StoreError::OrderNotFound(id))?;
        order.status = status;
        order.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: OrderId) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::OrderNotFound(id))
    }
}
