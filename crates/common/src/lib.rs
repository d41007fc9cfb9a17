//! Types shared by every crate in the cafe order service.

pub mod status;
pub mod types;

pub use status::{OrderStatus, UnknownStatus};
pub use types::{ItemId, OrderId};
