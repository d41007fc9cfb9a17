use thiserror::Error;

use crate::OrderId;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order handed to the store breaks a structural rule.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// The item handed to the catalog breaks a structural rule.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// A stored row holds a status label that no longer parses.
    #[error("Invalid status {status:?} stored for order {order_id}")]
    InvalidStatus { order_id: OrderId, status: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
