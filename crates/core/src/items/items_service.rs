use std::sync::Arc;

use log::debug;

use super::items_model::{DeleteOutcome, Item, ItemPatch, ItemUpdate, NewItem};
use super::items_traits::{ItemRepositoryTrait, ItemServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::filters::ItemFilter;

/// Service for managing the item catalog.
pub struct ItemService {
    repository: Arc<dyn ItemRepositoryTrait>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Loads the current row and rejects operations that may not target
    /// a soft-deleted item.
    fn get_active(&self, item_id: i64) -> Result<Item> {
        let current = self.repository.get_by_id(item_id)?;
        if current.deleted {
            return Err(ValidationError::InvalidInput(format!(
                "Item {} is deleted and cannot be modified",
                item_id
            ))
            .into());
        }
        Ok(current)
    }
}

#[async_trait::async_trait]
impl ItemServiceTrait for ItemService {
    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        new_item.validate()?;
        debug!("Creating item '{}'", new_item.name);
        self.repository.create(new_item).await
    }

    fn get_item(&self, item_id: i64) -> Result<Item> {
        self.repository.get_by_id(item_id)
    }

    fn list_items(&self, filter: ItemFilter) -> Result<Vec<Item>> {
        filter.validate()?;
        self.repository.list(&filter)
    }

    async fn update_item(&self, item_id: i64, update: ItemUpdate) -> Result<Item> {
        update.validate()?;
        self.get_active(item_id)?;
        self.repository.replace(item_id, update).await
    }

    async fn patch_item(&self, item_id: i64, patch: ItemPatch) -> Result<Item> {
        patch.validate()?;
        let current = self.get_active(item_id)?;
        if !patch.changes(&current) {
            return Err(Error::NotModified(format!(
                "Item {} already matches the supplied fields",
                item_id
            )));
        }
        self.repository.apply_patch(item_id, patch).await
    }

    async fn delete_item(&self, item_id: i64) -> Result<DeleteOutcome> {
        let current = self.repository.get_by_id(item_id)?;
        if current.deleted {
            debug!("Item {} already deleted, skipping", item_id);
            return Ok(DeleteOutcome::AlreadyDeleted);
        }
        self.repository.soft_delete(item_id).await?;
        Ok(DeleteOutcome::Deleted)
    }
}
