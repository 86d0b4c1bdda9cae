//! Query filter layer for catalog and cart listings.
//!
//! Filters translate caller-supplied bounds into storage predicates plus
//! an in-memory post-filter step for the quantity-aggregate case, which
//! cannot be expressed as a single-row predicate without a materialized
//! aggregate. All numeric bounds are inclusive.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_OFFSET};
use crate::errors::{Result, ValidationError};

/// Pagination window shared by all listings.
///
/// `limit <= 0` and negative `offset` are caller errors, never silently
/// clamped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: DEFAULT_PAGE_OFFSET,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn validate(&self) -> Result<()> {
        if self.limit <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "Page limit must be positive, got {}",
                self.limit
            ))
            .into());
        }
        if self.offset < 0 {
            return Err(ValidationError::InvalidInput(format!(
                "Page offset cannot be negative, got {}",
                self.offset
            ))
            .into());
        }
        Ok(())
    }
}

/// Filter for catalog listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    pub page: Page,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub include_deleted: bool,
}

impl ItemFilter {
    pub fn validate(&self) -> Result<()> {
        self.page.validate()
    }
}

/// Filter for cart listings.
///
/// `min_quantity` / `max_quantity` bound the sum of visible line
/// quantities per cart. That aggregate is computed after each candidate
/// cart's lines are fetched, so `page` applies to the pre-filter
/// candidate set, not the post-filter result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFilter {
    pub page: Page,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_quantity: Option<i64>,
    pub max_quantity: Option<i64>,
}

impl CartFilter {
    pub fn validate(&self) -> Result<()> {
        self.page.validate()
    }

    /// Post-filter predicate over a cart's total visible line quantity.
    pub fn quantity_in_bounds(&self, total_quantity: i64) -> bool {
        if let Some(min) = self.min_quantity {
            if total_quantity < min {
                return false;
            }
        }
        if let Some(max) = self.max_quantity {
            if total_quantity > max {
                return false;
            }
        }
        true
    }
}
