use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::Item;

/// A persisted association between a cart and an item.
///
/// `price` is a cached projection of `item.price × quantity` taken at the
/// last write to this line. It is a snapshot, not a live join: if the
/// item price changes afterwards, the line keeps its old amount until the
/// line itself is next mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item: Item,
    pub quantity: i64,
    pub available: bool,
    pub price: Decimal,
}

/// Domain model representing a cart with its visible lines joined in.
///
/// `price` is derived: only the pricing reconciler writes it, as the sum
/// of cached line prices over lines whose item is not soft-deleted.
/// Lines referencing deleted items are omitted from `lines` but their
/// rows stay in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: i64,
    pub price: Decimal,
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Sum of the visible line quantities, the aggregate the cart
    /// listing's quantity bounds filter on.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn line(quantity: i64, unit_price: Decimal) -> CartLine {
        let ts = NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        CartLine {
            item: Item {
                id: quantity,
                name: format!("item-{}", quantity),
                price: unit_price,
                deleted: false,
                created_at: ts,
                updated_at: ts,
            },
            quantity,
            available: true,
            price: unit_price * Decimal::from(quantity),
        }
    }

    #[test]
    fn total_quantity_sums_lines() {
        let cart = Cart {
            id: 1,
            price: dec!(55.00),
            lines: vec![line(3, dec!(5.00)), line(4, dec!(10.00))],
        };
        assert_eq!(cart.total_quantity(), 7);
    }

    #[test]
    fn empty_cart_has_zero_quantity() {
        let cart = Cart {
            id: 1,
            price: Decimal::ZERO,
            lines: vec![],
        };
        assert_eq!(cart.total_quantity(), 0);
    }
}
