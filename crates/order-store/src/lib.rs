pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod query;
pub mod repository;

pub use common::{ItemId, OrderId, OrderStatus};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use model::{Item, NewOrder, OrderLine, OrderRecord, money_zero};
pub use postgres::PostgresStore;
pub use query::{OrderQuery, SearchFilter};
pub use repository::{ItemCatalog, OrderRepository, OrderRepositoryExt};
