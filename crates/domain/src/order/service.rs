//! Order service providing the order workflow on top of a store.

use common::{OrderId, OrderStatus};
use order_store::{Item, ItemCatalog, OrderQuery, OrderRecord, OrderRepository, StoreError};

use crate::error::DomainError;

use super::{CreateOrder, OrderError, OrderReport, UpdateOrderStatus, validate};

/// Service for managing orders.
///
/// Wraps a store that is both the order repository and the item catalog.
/// Every method is one request's worth of work; nothing is cached between
/// calls.
pub struct OrderService<S> {
    store: S,
}

impl<S: OrderRepository + ItemCatalog> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates, prices and stores a new order.
    ///
    /// Nothing is written unless every rule passes.
    #[tracing::instrument(skip(self, cmd), fields(table_number = cmd.table_number))]
    pub async fn create_order(&self, cmd: CreateOrder) -> Result<OrderRecord, DomainError> {
        let validated = validate(&cmd).inspect_err(record_rejection)?;
        let items = self.store.get_items(&validated.item_ids()).await?;
        let priced = validated.price(&items).inspect_err(record_rejection)?;

        let total_price = priced.total_price;
        let order = self.store.create(priced.into_new_order()).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id, %total_price, "order created");

        Ok(order)
    }

    /// Loads one order by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<OrderRecord, DomainError> {
        self.store
            .get_by_id(order_id)
            .await?
            .ok_or(DomainError::Order(OrderError::OrderNotFound { order_id }))
    }

    /// Lists orders, most recent first, optionally filtered by free text.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self, search: Option<&str>) -> Result<Vec<OrderRecord>, DomainError> {
        let query = match search {
            Some(text) => OrderQuery::new().search(text),
            None => OrderQuery::new(),
        };
        Ok(self.store.list_filtered(query).await?)
    }

    /// Replaces the status of an order.
    ///
    /// Any status may follow any other. The label is checked before the
    /// order is looked up.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, cmd: UpdateOrderStatus) -> Result<(), DomainError> {
        let status: OrderStatus = cmd
            .status
            .parse()
            .map_err(|_| OrderError::UnknownStatus {
                status: cmd.status.clone(),
            })
            .inspect_err(record_rejection)?;

        self.store
            .update_status(cmd.order_id, status)
            .await
            .map_err(|err| not_found_as_order_error(err, cmd.order_id))?;

        metrics::counter!("orders_status_updated_total", "status" => status.as_str()).increment(1);
        tracing::info!(order_id = %cmd.order_id, %status, "order status updated");

        Ok(())
    }

    /// Deletes an order and its lines.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<(), DomainError> {
        self.store
            .delete(order_id)
            .await
            .map_err(|err| not_found_as_order_error(err, order_id))?;

        metrics::counter!("orders_deleted_total").increment(1);
        tracing::info!(%order_id, "order deleted");

        Ok(())
    }

    /// Revenue report: every order with status `Ready` and their summed total.
    #[tracing::instrument(skip(self))]
    pub async fn revenue(&self) -> Result<OrderReport, DomainError> {
        self.report(OrderStatus::Ready).await
    }

    /// Every order with status `Paid` and their summed total.
    #[tracing::instrument(skip(self))]
    pub async fn paid_orders(&self) -> Result<OrderReport, DomainError> {
        self.report(OrderStatus::Paid).await
    }

    /// Lists the menu.
    pub async fn list_items(&self) -> Result<Vec<Item>, DomainError> {
        Ok(self.store.list_items().await?)
    }

    async fn report(&self, status: OrderStatus) -> Result<OrderReport, DomainError> {
        let orders = self
            .store
            .list_filtered(OrderQuery::for_status(status))
            .await?;
        Ok(OrderReport::from_orders(orders))
    }
}

fn not_found_as_order_error(err: StoreError, order_id: OrderId) -> DomainError {
    match err {
        StoreError::OrderNotFound(_) => {
            let err = OrderError::OrderNotFound { order_id };
            record_rejection(&err);
            DomainError::Order(err)
        }
        other => DomainError::Store(other),
    }
}

fn record_rejection(err: &OrderError) {
    metrics::counter!("orders_rejected_total", "reason" => err.kind()).increment(1);
    tracing::warn!(reason = err.kind(), error = %err, "order request rejected");
}
