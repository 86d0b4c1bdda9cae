//! SQLite repository for the item catalog.

pub mod model;
pub mod repository;

pub use model::{ItemRow, NewItemRow};
pub use repository::ItemRepository;
