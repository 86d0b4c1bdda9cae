use async_trait::async_trait;

use crate::errors::Result;
use crate::filters::ItemFilter;
use crate::items::items_model::{DeleteOutcome, Item, ItemPatch, ItemUpdate, NewItem};

/// Trait for item repository operations.
///
/// Reads run on pooled connections; mutating operations are executed on
/// the storage layer's serialized writer, each inside its own
/// transaction.
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    /// Loads an item by id, soft-deleted or not.
    fn get_by_id(&self, item_id: i64) -> Result<Item>;
    /// Lists items in ascending id order under the supplied filter.
    fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>>;
    async fn create(&self, new_item: NewItem) -> Result<Item>;
    /// Replaces name and price of an existing, non-deleted item.
    async fn replace(&self, item_id: i64, update: ItemUpdate) -> Result<Item>;
    /// Applies the supplied patch fields to an existing item.
    async fn apply_patch(&self, item_id: i64, patch: ItemPatch) -> Result<Item>;
    /// Marks the item deleted and re-reconciles every cart holding a
    /// line for it, in one transaction. The line rows stay in place.
    async fn soft_delete(&self, item_id: i64) -> Result<()>;
}

/// Trait for item catalog service operations.
#[async_trait]
pub trait ItemServiceTrait: Send + Sync {
    async fn create_item(&self, new_item: NewItem) -> Result<Item>;
    /// Returns the item even if soft-deleted; callers needing
    /// active-only semantics check `deleted` themselves.
    fn get_item(&self, item_id: i64) -> Result<Item>;
    fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>>;
    async fn update_item(&self, item_id: i64, update: ItemUpdate) -> Result<Item>;
    async fn patch_item(&self, item_id: i64, patch: ItemPatch) -> Result<Item>;
    async fn delete_item(&self, item_id: i64) -> Result<DeleteOutcome>;
}
