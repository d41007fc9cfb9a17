//! Validation of order-creation requests and price computation.
//!
//! Both steps are pure. `validate` checks the request shape without
//! touching the catalog; `ValidatedOrder::price` resolves the lines against
//! items already fetched from the catalog and sums the total.

use common::ItemId;
use order_store::{Item, NewOrder, OrderLine, money_zero};
use rust_decimal::Decimal;

use super::{CreateOrder, OrderError};

/// Lowest valid table number.
pub const MIN_TABLE_NUMBER: i64 = 1;

/// Highest valid table number.
pub const MAX_TABLE_NUMBER: i64 = 100;

/// Most lines a single order may be created with.
pub const MAX_LINES: usize = 10;

/// Highest quantity of one line.
pub const MAX_LINE_COUNT: i64 = 255;

/// A request line whose id and count passed the shape checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedLine {
    pub item_id: ItemId,
    pub count: u32,
}

/// A creation request that passed every check not needing the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub table_number: i32,
    pub lines: Vec<ValidatedLine>,
}

/// A fully resolved order, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub table_number: i32,
    pub lines: Vec<OrderLine>,
    pub total_price: Decimal,
}

impl PricedOrder {
    /// Converts into the store's input type.
    pub fn into_new_order(self) -> NewOrder {
        NewOrder::new(self.table_number, self.lines)
    }
}

/// Checks table number, line count and each line, in that order.
pub fn validate(cmd: &CreateOrder) -> Result<ValidatedOrder, OrderError> {
    let table_number = validate_table_number(cmd.table_number)?;

    if cmd.items.is_empty() || cmd.items.len() > MAX_LINES {
        return Err(OrderError::InvalidItemCount {
            count: cmd.items.len(),
        });
    }

    let lines = cmd
        .items
        .iter()
        .map(|input| match (input.item_id, input.count) {
            (Some(item_id), Some(count))
                if item_id > 0 && (1..=MAX_LINE_COUNT).contains(&count) =>
            {
                Ok(ValidatedLine {
                    item_id: ItemId::new(item_id),
                    // 1..=255 always fits
                    count: count as u32,
                })
            }
            (item_id, count) => Err(OrderError::invalid_line(item_id, count)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedOrder {
        table_number,
        lines,
    })
}

fn validate_table_number(table_number: i64) -> Result<i32, OrderError> {
    if (MIN_TABLE_NUMBER..=MAX_TABLE_NUMBER).contains(&table_number) {
        // 1..=100 always fits
        Ok(table_number as i32)
    } else {
        Err(OrderError::InvalidTableNumber { table_number })
    }
}

impl ValidatedOrder {
    /// Distinct item ids referenced by the lines, in first-use order.
    pub fn item_ids(&self) -> Vec<ItemId> {
        let mut ids = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if !ids.contains(&line.item_id) {
                ids.push(line.item_id);
            }
        }
        ids
    }

    /// Resolves every line against `catalog` and computes the total.
    ///
    /// Fails with `ItemNotFound` on the first line whose item is missing.
    pub fn price(&self, catalog: &[Item]) -> Result<PricedOrder, OrderError> {
        let mut total_price = money_zero();
        let mut lines = Vec::with_capacity(self.lines.len());

        for line in &self.lines {
            let item = catalog
                .iter()
                .find(|item| item.id == line.item_id)
                .ok_or(OrderError::ItemNotFound {
                    item_id: line.item_id,
                })?;
            let line = OrderLine::new(item.clone(), line.count);
            total_price += line.total_price();
            lines.push(line);
        }

        Ok(PricedOrder {
            table_number: self.table_number,
            lines,
            total_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LineInput;

    fn catalog() -> Vec<Item> {
        vec![
            Item::new(1, "Кофе", Decimal::new(150, 0)),
            Item::new(2, "Торт", Decimal::new(250, 0)),
        ]
    }

    fn cmd(table_number: i64, items: Vec<LineInput>) -> CreateOrder {
        CreateOrder::new(table_number, items)
    }

    #[test]
    fn test_prices_worked_example() {
        let validated = validate(&cmd(1, vec![LineInput::new(1, 1), LineInput::new(2, 2)])).unwrap();
        let priced = validated.price(&catalog()).unwrap();

        assert_eq!(priced.table_number, 1);
        assert_eq!(priced.total_price.to_string(), "650.00");
        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.lines[1].item.title, "Торт");
        assert_eq!(priced.lines[1].count, 2);
    }

    #[test]
    fn test_table_number_bounds() {
        for table_number in [1, 50, 100] {
            assert!(validate(&cmd(table_number, vec![LineInput::new(1, 1)])).is_ok());
        }
        for table_number in [0, -5, 101] {
            assert_eq!(
                validate(&cmd(table_number, vec![LineInput::new(1, 1)])),
                Err(OrderError::InvalidTableNumber { table_number })
            );
        }
    }

    #[test]
    fn test_table_number_checked_before_items() {
        assert!(matches!(
            validate(&cmd(0, vec![])),
            Err(OrderError::InvalidTableNumber { .. })
        ));
    }

    #[test]
    fn test_item_count_bounds() {
        assert_eq!(
            validate(&cmd(1, vec![])),
            Err(OrderError::InvalidItemCount { count: 0 })
        );

        let ten = vec![LineInput::new(1, 1); 10];
        assert_eq!(validate(&cmd(1, ten)).unwrap().lines.len(), 10);

        let eleven = vec![LineInput::new(1, 1); 11];
        assert_eq!(
            validate(&cmd(1, eleven)),
            Err(OrderError::InvalidItemCount { count: 11 })
        );
    }

    #[test]
    fn test_rejects_bad_lines() {
        let bad_lines = [
            LineInput::new(1, 0),
            LineInput::new(1, -1),
            LineInput::new(1, 256),
            LineInput::new(0, 1),
            LineInput {
                item_id: None,
                count: Some(1),
            },
            LineInput {
                item_id: Some(1),
                count: None,
            },
        ];

        for bad in bad_lines {
            let result = validate(&cmd(1, vec![LineInput::new(2, 1), bad]));
            assert!(
                matches!(result, Err(OrderError::InvalidLineItem { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_count_upper_bound_inclusive() {
        let validated = validate(&cmd(1, vec![LineInput::new(1, 255)])).unwrap();
        let priced = validated.price(&catalog()).unwrap();
        assert_eq!(priced.total_price.to_string(), "38250.00");
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let validated = validate(&cmd(1, vec![LineInput::new(1, 1), LineInput::new(9, 1)])).unwrap();
        assert_eq!(
            validated.price(&catalog()),
            Err(OrderError::ItemNotFound {
                item_id: ItemId::new(9)
            })
        );
    }

    #[test]
    fn test_duplicate_items_are_separate_lines() {
        let validated = validate(&cmd(4, vec![LineInput::new(1, 1), LineInput::new(1, 2)])).unwrap();
        assert_eq!(validated.item_ids(), vec![ItemId::new(1)]);

        let priced = validated.price(&catalog()).unwrap();
        assert_eq!(priced.lines.len(), 2);
        assert_eq!(priced.total_price.to_string(), "450.00");

        let new_order = priced.into_new_order();
        assert_eq!(new_order.table_number, 4);
        assert_eq!(new_order.lines.len(), 2);
    }
}
