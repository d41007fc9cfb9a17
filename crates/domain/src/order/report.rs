//! Totals over a set of orders.

use order_store::{OrderRecord, money_zero};
use rust_decimal::Decimal;

/// A list of orders with the sum of their totals.
///
/// Backs the revenue report (ready orders) and the paid-orders report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReport {
    /// Sum of every order's total; `0.00` when there are no orders.
    pub total: Decimal,

    /// The orders, most recent first.
    pub orders: Vec<OrderRecord>,
}

impl OrderReport {
    /// Builds a report from already-filtered orders.
    pub fn from_orders(orders: Vec<OrderRecord>) -> Self {
        let total = orders
            .iter()
            .fold(money_zero(), |acc, order| acc + order.total_price());
        Self { total, orders }
    }
}
