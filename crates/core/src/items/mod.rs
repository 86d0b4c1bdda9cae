//! Item catalog module - domain models, services, and traits.

mod items_model;
mod items_service;
mod items_traits;

pub use items_model::{DeleteOutcome, Item, ItemPatch, ItemUpdate, NewItem};
pub use items_service::ItemService;
pub use items_traits::{ItemRepositoryTrait, ItemServiceTrait};
