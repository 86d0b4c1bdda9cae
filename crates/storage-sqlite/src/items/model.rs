//! Database models for catalog items.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use shopcart_core::items::Item;

use crate::errors::StorageError;
use crate::utils::decimal_from_stored;

/// Database row for items.
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    AsChangeset,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable row for a new item; the id is storage-assigned.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItemRow {
    pub name: String,
    pub price: f64,
    pub deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Row decoding is explicit and fallible: a malformed stored price is a
// decode error, never a silent zero.
impl TryFrom<ItemRow> for Item {
    type Error = StorageError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let price = decimal_from_stored(row.price, "items.price")?;
        Ok(Item {
            id: row.id,
            name: row.name,
            price,
            deleted: row.deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
