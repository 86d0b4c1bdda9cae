//! SQLite repository for carts and cart lines.

pub mod model;
pub mod repository;

pub use model::{CartLineRow, CartRow, NewCartLineRow, NewCartRow};
pub use repository::CartRepository;
