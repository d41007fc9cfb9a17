use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ItemId, OrderId, OrderStatus};

/// Number of fractional digits every money amount carries.
pub const MONEY_SCALE: u32 = 2;

/// Zero with the money scale, so empty sums still render as `0.00`.
pub fn money_zero() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}

/// Rescales a price to the money scale.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price;
    price.rescale(MONEY_SCALE);
    price
}

/// A purchasable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub price: Decimal,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: normalize_price(price),
        }
    }
}

/// One item of an order together with the ordered quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item: Item,
    pub count: u32,
}

impl OrderLine {
    /// Creates a new order line.
    pub fn new(item: Item, count: u32) -> Self {
        Self { item, count }
    }

    /// Returns `price * count` for this line.
    pub fn total_price(&self) -> Decimal {
        self.item.price * Decimal::from(self.count)
    }
}

/// An order about to be written to the store.
///
/// Lines must already be resolved against the catalog; the store does not
/// look prices up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub table_number: i32,
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    /// Creates a new order for a table.
    pub fn new(table_number: i32, lines: Vec<OrderLine>) -> Self {
        Self {
            table_number,
            lines,
        }
    }
}

/// A stored order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub table_number: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

impl OrderRecord {
    /// Sum of all line totals. Computed on every call, never stored.
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .fold(money_zero(), |acc, line| acc + line.total_price())
    }
}
