//! Pricing reconciler arithmetic.
//!
//! The storage layer executes these functions against a cart's rows
//! inside the same transaction as the line mutation that triggered the
//! reconciliation, then persists the result to the cart's derived price.

use rust_decimal::Decimal;

/// A cart line reduced to what reconciliation needs: its cached amount
/// and whether its referenced item is soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub price: Decimal,
    pub item_deleted: bool,
}

/// Cached amount for a line: unit price times quantity.
pub fn line_price(unit_price: Decimal, quantity: i64) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// The cart's derived total: the sum of cached line amounts over lines
/// whose item is not soft-deleted. Deleted-item lines stay in storage
/// but contribute nothing.
pub fn visible_total(lines: &[PricedLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| !line.item_deleted)
        .map(|line| line.price)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn line_price_multiplies_unit_price_by_quantity() {
        assert_eq!(line_price(dec!(10.00), 2), dec!(20.00));
        assert_eq!(line_price(dec!(0.10), 3), dec!(0.30));
        assert_eq!(line_price(dec!(19.99), 1), dec!(19.99));
    }

    #[test]
    fn visible_total_skips_deleted_item_lines() {
        let lines = [
            PricedLine {
                price: dec!(20.00),
                item_deleted: false,
            },
            PricedLine {
                price: dec!(15.00),
                item_deleted: true,
            },
            PricedLine {
                price: dec!(5.50),
                item_deleted: false,
            },
        ];
        assert_eq!(visible_total(&lines), dec!(25.50));
    }

    #[test]
    fn visible_total_of_no_lines_is_zero() {
        assert_eq!(visible_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn visible_total_is_zero_when_every_item_is_deleted() {
        let lines = [PricedLine {
            price: dec!(50.00),
            item_deleted: true,
        }];
        assert_eq!(visible_total(&lines), Decimal::ZERO);
    }
}
