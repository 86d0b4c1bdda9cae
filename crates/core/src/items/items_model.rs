use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a catalog item.
///
/// `deleted` is a one-way flag: once set by the delete operation it is
/// never cleared, and the row is never removed, because cart lines keep
/// referencing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub price: Decimal,
}

impl NewItem {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }
}

/// Input model for a full item replacement. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub name: String,
    pub price: Decimal,
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }
}

/// Input model for a partial item update.
///
/// `deleted` is carried so that a caller's attempt to flip it can be
/// rejected explicitly rather than dropped on the floor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub deleted: Option<bool>,
}

impl ItemPatch {
    pub fn validate(&self) -> Result<()> {
        if self.deleted.is_some() {
            return Err(ValidationError::ForbiddenField("deleted".to_string()).into());
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Whether applying this patch to `current` would change any stored
    /// value.
    pub fn changes(&self, current: &Item) -> bool {
        if let Some(name) = &self.name {
            if *name != current.name {
                return true;
            }
        }
        if let Some(price) = self.price {
            if price != current.price {
                return true;
            }
        }
        false
    }
}

/// Outcome of a delete operation. Deletes are idempotent: re-deleting an
/// already-deleted item is a distinct no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeleteOutcome {
    Deleted,
    AlreadyDeleted,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidInput(
            "Item name cannot be empty".to_string(),
        )
        .into());
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "Item price must be positive, got {}",
            price
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(name: &str, price: Decimal) -> Item {
        let ts = NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        Item {
            id: 1,
            name: name.to_string(),
            price,
            deleted: false,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn new_item_rejects_non_positive_price() {
        for price in [dec!(0), dec!(-0.01), dec!(-10)] {
            let new_item = NewItem {
                name: "Widget".to_string(),
                price,
            };
            assert!(new_item.validate().is_err(), "price {} should fail", price);
        }
    }

    #[test]
    fn new_item_rejects_blank_name() {
        let new_item = NewItem {
            name: "   ".to_string(),
            price: dec!(10.00),
        };
        assert!(new_item.validate().is_err());
    }

    #[test]
    fn patch_rejects_deleted_flag() {
        let patch = ItemPatch {
            deleted: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            patch.validate(),
            Err(crate::Error::Validation(ValidationError::ForbiddenField(_)))
        ));
    }

    #[test]
    fn patch_detects_no_change() {
        let current = item("Widget", dec!(10.00));
        let same = ItemPatch {
            name: Some("Widget".to_string()),
            price: Some(dec!(10.00)),
            deleted: None,
        };
        assert!(!same.changes(&current));

        let empty = ItemPatch::default();
        assert!(!empty.changes(&current));

        let renamed = ItemPatch {
            name: Some("Gadget".to_string()),
            ..Default::default()
        };
        assert!(renamed.changes(&current));

        let repriced = ItemPatch {
            price: Some(dec!(12.50)),
            ..Default::default()
        };
        assert!(repriced.changes(&current));
    }
}
