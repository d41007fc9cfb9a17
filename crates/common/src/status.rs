//! Order status.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The status of an order.
///
/// Any status may replace any other; there is no transition graph and no
/// terminal state. Orders are created as `Pending`.
///
/// Each status is stored and exchanged as its Russian label:
/// ```text
/// Pending  "В ожидании"
/// Ready    "Готово"
/// Paid     "Оплачено"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Order accepted, kitchen has not finished it.
    #[default]
    Pending,

    /// Order served to the table.
    Ready,

    /// Order paid for.
    Paid,
}

/// Error returned when a string is not one of the status labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    /// All statuses in declaration order.
    pub const ALL: [OrderStatus; 3] = [OrderStatus::Pending, OrderStatus::Ready, OrderStatus::Paid];

    /// Returns the label used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "В ожидании",
            OrderStatus::Ready => "Готово",
            OrderStatus::Paid => "Оплачено",
        }
    }

    /// Returns every valid label in declaration order.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(OrderStatus::as_str).collect()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
