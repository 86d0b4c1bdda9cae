use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use shopcart_core::carts::pricing::{self, PricedLine};
use shopcart_core::carts::{Cart, CartRepositoryTrait};
use shopcart_core::errors::{Error, Result, ValidationError};
use shopcart_core::filters::CartFilter;

use super::model::{decode_line, CartLineRow, CartRow, NewCartLineRow, NewCartRow};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::items::model::ItemRow;
use crate::items::repository::find_item;
use crate::schema::{cart_items, carts, items};
use crate::utils::{decimal_from_stored, decimal_to_stored};

pub struct CartRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CartRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CartRepository { pool, writer }
    }
}

/// Loads a cart row by id, mapping the missing-row case to `NotFound`.
fn find_cart(conn: &mut SqliteConnection, cart_id: i64) -> Result<CartRow> {
    carts::table
        .find(cart_id)
        .first::<CartRow>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                Error::NotFound(format!("Cart {} not found", cart_id))
            }
            _ => StorageError::from(e).into(),
        })
}

/// Loads a cart with its visible lines: lines whose item is soft-deleted
/// keep their rows but are omitted here.
fn load_cart(conn: &mut SqliteConnection, cart_id: i64) -> Result<Cart> {
    let cart_row = find_cart(conn, cart_id)?;

    let rows: Vec<(CartLineRow, ItemRow)> = cart_items::table
        .inner_join(items::table)
        .filter(cart_items::cart_id.eq(cart_id))
        .filter(items::deleted.eq(false))
        .order(cart_items::id.asc())
        .select((CartLineRow::as_select(), ItemRow::as_select()))
        .load::<(CartLineRow, ItemRow)>(conn)
        .map_err(StorageError::from)?;

    let lines = rows
        .into_iter()
        .map(|(line_row, item_row)| decode_line(line_row, item_row).map_err(Error::from))
        .collect::<Result<Vec<_>>>()?;

    Ok(Cart {
        id: cart_row.id,
        price: decimal_from_stored(cart_row.price, "carts.price")?,
        lines,
    })
}

/// Recomputes the cart's derived price from its line rows and persists
/// it. Runs inside the caller's transaction so the triggering mutation
/// and the new total commit as one unit. Idempotent.
pub(crate) fn reconcile_cart_price(
    conn: &mut SqliteConnection,
    cart_id: i64,
) -> Result<Decimal> {
    let rows: Vec<(f64, bool)> = cart_items::table
        .inner_join(items::table)
        .filter(cart_items::cart_id.eq(cart_id))
        .select((cart_items::price, items::deleted))
        .load::<(f64, bool)>(conn)
        .map_err(StorageError::from)?;

    let lines = rows
        .into_iter()
        .map(|(price, item_deleted)| {
            Ok(PricedLine {
                price: decimal_from_stored(price, "cart_items.price")?,
                item_deleted,
            })
        })
        .collect::<std::result::Result<Vec<_>, StorageError>>()?;

    let total = pricing::visible_total(&lines);
    diesel::update(carts::table.find(cart_id))
        .set(carts::price.eq(decimal_to_stored(total, "carts.price")?))
        .execute(conn)
        .map_err(StorageError::from)?;

    Ok(total)
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn create(&self) -> Result<Cart> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Cart> {
                let row: CartRow = diesel::insert_into(carts::table)
                    .values(&NewCartRow { price: 0.0 })
                    .returning(CartRow::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Cart {
                    id: row.id,
                    price: Decimal::ZERO,
                    lines: vec![],
                })
            })
            .await
    }

    fn get_by_id(&self, cart_id: i64) -> Result<Cart> {
        let mut conn = get_connection(&self.pool)?;
        load_cart(&mut conn, cart_id)
    }

    fn list(&self, filter: &CartFilter) -> Result<Vec<Cart>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = carts::table.into_boxed();
        if let Some(min_price) = filter.min_price {
            query = query.filter(carts::price.ge(decimal_to_stored(min_price, "minPrice")?));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(carts::price.le(decimal_to_stored(max_price, "maxPrice")?));
        }

        // Pagination bounds the candidate set; the quantity filter then
        // drops carts from the fetched page (preserved listing quirk).
        let candidates = query
            .order(carts::id.asc())
            .limit(filter.page.limit)
            .offset(filter.page.offset)
            .load::<CartRow>(&mut conn)
            .map_err(StorageError::from)?;

        let mut result = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let cart = load_cart(&mut conn, candidate.id)?;
            if filter.quantity_in_bounds(cart.total_quantity()) {
                result.push(cart);
            }
        }
        Ok(result)
    }

    async fn add_item(&self, cart_id: i64, item_id: i64, quantity: i64) -> Result<Cart> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Cart> {
                // Validation reads and the line write share the writer's
                // transaction, so the checks stay authoritative until
                // commit and nothing is observable half-applied.
                find_cart(conn, cart_id)?;
                let item_row = find_item(conn, item_id)?;
                if item_row.deleted {
                    return Err(ValidationError::InvalidInput(format!(
                        "Item {} is deleted and cannot be added to a cart",
                        item_id
                    ))
                    .into());
                }
                let unit_price = decimal_from_stored(item_row.price, "items.price")?;

                let existing: Option<CartLineRow> = cart_items::table
                    .filter(cart_items::cart_id.eq(cart_id))
                    .filter(cart_items::item_id.eq(item_id))
                    .first::<CartLineRow>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                match existing {
                    Some(line) => {
                        let new_quantity = line.quantity + quantity;
                        let new_price = pricing::line_price(unit_price, new_quantity);
                        diesel::update(cart_items::table.find(line.id))
                            .set((
                                cart_items::quantity.eq(new_quantity),
                                cart_items::price
                                    .eq(decimal_to_stored(new_price, "cart_items.price")?),
                            ))
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                    None => {
                        let line_price = pricing::line_price(unit_price, quantity);
                        diesel::insert_into(cart_items::table)
                            .values(&NewCartLineRow {
                                cart_id,
                                item_id,
                                quantity,
                                available: true,
                                price: decimal_to_stored(line_price, "cart_items.price")?,
                            })
                            .execute(conn)
                            .map_err(StorageError::from)?;
                    }
                }

                reconcile_cart_price(conn, cart_id)?;
                load_cart(conn, cart_id)
            })
            .await
    }

    async fn reconcile_price(&self, cart_id: i64) -> Result<Cart> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Cart> {
                find_cart(conn, cart_id)?;
                reconcile_cart_price(conn, cart_id)?;
                load_cart(conn, cart_id)
            })
            .await
    }
}
