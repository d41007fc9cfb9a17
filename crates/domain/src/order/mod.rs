//! Order workflow: commands, validation and pricing, reports, service.

mod commands;
mod pricing;
mod report;
mod service;

pub use commands::{CreateOrder, LineInput, UpdateOrderStatus};
pub use pricing::{
    MAX_LINE_COUNT, MAX_LINES, MAX_TABLE_NUMBER, MIN_TABLE_NUMBER, PricedOrder, ValidatedLine,
    ValidatedOrder, validate,
};
pub use report::OrderReport;
pub use service::OrderService;

use common::{ItemId, OrderId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Messages are shown to café staff as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Table number outside 1..=100.
    #[error(
        "table_number должен быть от {} до {}, получено: {table_number}.",
        MIN_TABLE_NUMBER,
        MAX_TABLE_NUMBER
    )]
    InvalidTableNumber { table_number: i64 },

    /// Empty item list or more than ten entries.
    #[error("items не может быть пустым и иметь размер больше {}.", MAX_LINES)]
    InvalidItemCount { count: usize },

    /// A line with a missing id or a count outside 1..=255.
    #[error("Некорректные данные item. id: {item_id}, count: {count};")]
    InvalidLineItem { item_id: String, count: String },

    /// The item id is not in the catalog.
    #[error("Товар с id {item_id} не найден.")]
    ItemNotFound { item_id: ItemId },

    /// The order does not exist.
    #[error("Заказ с id {order_id} не найден.")]
    OrderNotFound { order_id: OrderId },

    /// The status label is not one of the known statuses.
    #[error("Неизвестный статус. Выберите статус из списка: {}", status_list())]
    UnknownStatus { status: String },
}

impl OrderError {
    /// Builds an `InvalidLineItem` error, rendering absent values as `-`.
    pub fn invalid_line(item_id: Option<i64>, count: Option<i64>) -> Self {
        let render = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
        OrderError::InvalidLineItem {
            item_id: render(item_id),
            count: render(count),
        }
    }

    /// Short machine-readable name, used for metric labels and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::InvalidTableNumber { .. } => "invalid_table_number",
            OrderError::InvalidItemCount { .. } => "invalid_item_count",
            OrderError::InvalidLineItem { .. } => "invalid_line_item",
            OrderError::ItemNotFound { .. } => "item_not_found",
            OrderError::OrderNotFound { .. } => "order_not_found",
            OrderError::UnknownStatus { .. } => "unknown_status",
        }
    }
}

fn status_list() -> String {
    let labels: Vec<String> = OrderStatus::labels()
        .into_iter()
        .map(|label| format!("'{label}'"))
        .collect();
    format!("[{}]", labels.join(", "))
}
