//! Order commands.

use common::OrderId;

/// One requested line of a new order, as received from the client.
///
/// Both fields are optional because clients may omit them; validation
/// turns a missing value into `InvalidLineItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineInput {
    /// Catalog id of the item.
    pub item_id: Option<i64>,

    /// Requested quantity.
    pub count: Option<i64>,
}

impl LineInput {
    /// Creates a line with both fields present.
    pub fn new(item_id: i64, count: i64) -> Self {
        Self {
            item_id: Some(item_id),
            count: Some(count),
        }
    }
}

/// Command to create a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrder {
    /// The table the order is for.
    pub table_number: i64,

    /// Requested lines, in request order.
    pub items: Vec<LineInput>,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(table_number: i64, items: Vec<LineInput>) -> Self {
        Self {
            table_number,
            items,
        }
    }
}

/// Command to replace the status of an order.
///
/// The status stays a raw string until the service checks it, so an
/// unknown label can be reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOrderStatus {
    /// The order to update.
    pub order_id: OrderId,

    /// Requested status label.
    pub status: String,
}

impl UpdateOrderStatus {
    /// Creates a new UpdateOrderStatus command.
    pub fn new(order_id: OrderId, status: impl Into<String>) -> Self {
        Self {
            order_id,
            status: status.into(),
        }
    }
}
