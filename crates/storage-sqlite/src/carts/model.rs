//! Database models for carts and cart lines.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use shopcart_core::carts::CartLine;
use shopcart_core::items::Item;

use crate::errors::StorageError;
use crate::items::ItemRow;
use crate::utils::decimal_from_stored;

/// Database row for carts. `price` is the derived total maintained by
/// the reconciler; nothing else writes it.
#[derive(
    Queryable, Identifiable, Selectable, AsChangeset, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::carts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CartRow {
    pub id: i64,
    pub price: f64,
}

/// Insertable row for a new, empty cart.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::carts)]
pub struct NewCartRow {
    pub price: f64,
}

/// Database row for cart lines. `price` caches
/// `item.price × quantity` as of the line's last write.
#[derive(
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(CartRow, foreign_key = cart_id))]
#[diesel(belongs_to(ItemRow, foreign_key = item_id))]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CartLineRow {
    pub id: i64,
    pub cart_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub available: bool,
    pub price: f64,
}

/// Insertable row for a fresh cart line.
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartLineRow {
    pub cart_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub available: bool,
    pub price: f64,
}

/// Decodes a joined (line, item) pair into the domain line with its item
/// embedded.
pub(crate) fn decode_line(
    line_row: CartLineRow,
    item_row: ItemRow,
) -> Result<CartLine, StorageError> {
    let price = decimal_from_stored(line_row.price, "cart_items.price")?;
    let item = Item::try_from(item_row)?;
    Ok(CartLine {
        item,
        quantity: line_row.quantity,
        available: line_row.available,
        price,
    })
}
