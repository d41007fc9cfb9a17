use crate::{OrderRecord, OrderStatus};

/// Free-text filter over an order's table number and status.
///
/// The query is split on whitespace. An order matches when every query
/// token equals, ignoring case, one of the order's own tokens: the decimal
/// table number and each word of the status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    tokens: Vec<String>,
}

impl SearchFilter {
    /// Parses a query string. Returns `None` for a blank query.
    pub fn parse(query: &str) -> Option<Self> {
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    /// Returns the lowercased query tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tests the filter against a table number and status.
    pub fn matches(&self, table_number: i32, status: OrderStatus) -> bool {
        let table = table_number.to_string();
        let label = status.as_str().to_lowercase();
        let document: Vec<&str> = std::iter::once(table.as_str())
            .chain(label.split_whitespace())
            .collect();

        self.tokens
            .iter()
            .all(|token| document.contains(&token.as_str()))
    }
}

/// Builder for order listings.
///
/// Both filters are optional; an empty query lists every order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Free-text filter on table number and status.
    pub search: Option<SearchFilter>,

    /// Only orders with exactly this status.
    pub status: Option<OrderStatus>,
}

impl OrderQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for orders with a specific status.
    pub fn for_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds a free-text filter. Blank text leaves the query unfiltered.
    pub fn search(mut self, text: &str) -> Self {
        self.search = SearchFilter::parse(text);
        self
    }

    /// Filters by status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Tests an order against both filters.
    pub fn matches(&self, order: &OrderRecord) -> bool {
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        if let Some(ref search) = self.search
            && !search.matches(order.table_number, order.status)
        {
            return false;
        }
        true
    }
}
