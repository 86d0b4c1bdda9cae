//! Conversion helpers between stored REAL columns and domain decimals.
//!
//! Monetary amounts live as `Decimal` in the domain and as REAL columns
//! in SQLite (the layout the original schema uses). Decoding is strict:
//! a stored value that does not round-trip into a decimal (NaN or an
//! infinity) signals a decode error instead of collapsing to zero.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Decodes a stored REAL into a domain decimal.
pub(crate) fn decimal_from_stored(value: f64, field: &str) -> Result<Decimal, StorageError> {
    Decimal::from_f64(value)
        .ok_or_else(|| StorageError::Decode(format!("{} holds non-finite value {}", field, value)))
}

/// Encodes a domain decimal for storage.
pub(crate) fn decimal_to_stored(value: Decimal, field: &str) -> Result<f64, StorageError> {
    value
        .to_f64()
        .ok_or_else(|| StorageError::Decode(format!("{} value {} exceeds storage range", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn stored_prices_round_trip() {
        for value in [dec!(0), dec!(10.00), dec!(19.99), dec!(0.01)] {
            let stored = decimal_to_stored(value, "price").unwrap();
            assert_eq!(decimal_from_stored(stored, "price").unwrap(), value);
        }
    }

    #[test]
    fn non_finite_stored_value_is_a_decode_error() {
        assert!(decimal_from_stored(f64::NAN, "price").is_err());
        assert!(decimal_from_stored(f64::INFINITY, "price").is_err());
    }
}
