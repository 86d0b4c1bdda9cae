use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use shopcart_core::errors::{Error, Result, ValidationError};
use shopcart_core::filters::ItemFilter;
use shopcart_core::items::{Item, ItemPatch, ItemRepositoryTrait, ItemUpdate, NewItem};

use super::model::{ItemRow, NewItemRow};
use crate::carts::repository::reconcile_cart_price;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{cart_items, items};
use crate::utils::decimal_to_stored;

pub struct ItemRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ItemRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ItemRepository { pool, writer }
    }
}

/// Loads an item row by id, mapping the missing-row case to `NotFound`.
pub(crate) fn find_item(conn: &mut SqliteConnection, item_id: i64) -> Result<ItemRow> {
    items::table
        .find(item_id)
        .first::<ItemRow>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                Error::NotFound(format!("Item {} not found", item_id))
            }
            _ => StorageError::from(e).into(),
        })
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    fn get_by_id(&self, item_id: i64) -> Result<Item> {
        let mut conn = get_connection(&self.pool)?;
        let row = find_item(&mut conn, item_id)?;
        Item::try_from(row).map_err(Error::from)
    }

    fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = items::table.into_boxed();
        if let Some(min_price) = filter.min_price {
            query = query.filter(items::price.ge(decimal_to_stored(min_price, "minPrice")?));
        }
        if let Some(max_price) = filter.max_price {
            query = query.filter(items::price.le(decimal_to_stored(max_price, "maxPrice")?));
        }
        if !filter.include_deleted {
            query = query.filter(items::deleted.eq(false));
        }

        let rows = query
            .order(items::id.asc())
            .limit(filter.page.limit)
            .offset(filter.page.offset)
            .load::<ItemRow>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|row| Item::try_from(row).map_err(Error::from))
            .collect()
    }

    async fn create(&self, new_item: NewItem) -> Result<Item> {
        let price = decimal_to_stored(new_item.price, "price")?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Item> {
                let now = Utc::now().naive_utc();
                let row = NewItemRow {
                    name: new_item.name,
                    price,
                    deleted: false,
                    created_at: now,
                    updated_at: now,
                };
                let result_row: ItemRow = diesel::insert_into(items::table)
                    .values(&row)
                    .returning(ItemRow::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Item::try_from(result_row).map_err(Error::from)
            })
            .await
    }

    async fn replace(&self, item_id: i64, update: ItemUpdate) -> Result<Item> {
        let price = decimal_to_stored(update.price, "price")?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Item> {
                let affected = diesel::update(
                    items::table.find(item_id).filter(items::deleted.eq(false)),
                )
                .set((
                    items::name.eq(&update.name),
                    items::price.eq(price),
                    items::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    // Distinguish a missing row from a soft-deleted one.
                    let row = items::table
                        .find(item_id)
                        .first::<ItemRow>(conn)
                        .optional()
                        .map_err(StorageError::from)?;
                    return match row {
                        None => Err(Error::NotFound(format!("Item {} not found", item_id))),
                        Some(_) => Err(ValidationError::InvalidInput(format!(
                            "Item {} is deleted and cannot be modified",
                            item_id
                        ))
                        .into()),
                    };
                }

                let row = find_item(conn, item_id)?;
                Item::try_from(row).map_err(Error::from)
            })
            .await
    }

    async fn apply_patch(&self, item_id: i64, patch: ItemPatch) -> Result<Item> {
        let price = match patch.price {
            Some(p) => Some(decimal_to_stored(p, "price")?),
            None => None,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Item> {
                let current = find_item(conn, item_id)?;
                if current.deleted {
                    return Err(ValidationError::InvalidInput(format!(
                        "Item {} is deleted and cannot be modified",
                        item_id
                    ))
                    .into());
                }

                diesel::update(items::table.find(item_id))
                    .set((
                        items::name.eq(patch.name.unwrap_or(current.name)),
                        items::price.eq(price.unwrap_or(current.price)),
                        items::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let row = find_item(conn, item_id)?;
                Item::try_from(row).map_err(Error::from)
            })
            .await
    }

    async fn soft_delete(&self, item_id: i64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::update(items::table.find(item_id))
                    .set((
                        items::deleted.eq(true),
                        items::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(format!("Item {} not found", item_id)));
                }

                // The item's lines stay in place but no longer count, so
                // every cart holding one must be re-reconciled before the
                // delete commits.
                let cart_ids: Vec<i64> = cart_items::table
                    .filter(cart_items::item_id.eq(item_id))
                    .select(cart_items::cart_id)
                    .distinct()
                    .load::<i64>(conn)
                    .map_err(StorageError::from)?;
                for cart_id in cart_ids {
                    reconcile_cart_price(conn, cart_id)?;
                }

                Ok(())
            })
            .await
    }
}
