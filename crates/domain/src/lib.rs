//! Domain layer for the cafe order service.
//!
//! This crate provides the order workflow on top of the store:
//! - Validation of order-creation requests and price computation
//! - Status updates with no transition guard
//! - Filtered listings and the revenue / paid-orders reports
//! - `OrderService`, the entry point used by the HTTP layer

pub mod error;
pub mod order;

pub use common::{ItemId, OrderId, OrderStatus};
pub use error::DomainError;
pub use order::{
    CreateOrder, LineInput, MAX_LINE_COUNT, MAX_LINES, MAX_TABLE_NUMBER, MIN_TABLE_NUMBER,
    OrderError, OrderReport, OrderService, PricedOrder, UpdateOrderStatus, ValidatedLine,
    ValidatedOrder,
};
pub use order_store::{Item, OrderLine, OrderRecord};
