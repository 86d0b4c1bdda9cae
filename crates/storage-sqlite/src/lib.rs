//! SQLite storage implementation for the shop cart engine.
//!
//! This crate provides all database-related functionality using Diesel
//! with SQLite. It implements the repository traits defined in
//! `shopcart-core` and contains:
//! - Database connection pooling and PRAGMA management
//! - Embedded Diesel migrations
//! - The single-writer actor that serializes every mutation
//! - Repository implementations for items, carts, and cart lines
//! - Database-specific row types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel
//! dependencies exist. `core` is database-agnostic and works with
//! traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod carts;
pub mod db;
pub mod errors;
pub mod items;
pub mod schema;

mod utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export repositories
pub use carts::CartRepository;
pub use items::ItemRepository;

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from shopcart-core for convenience
pub use shopcart_core::errors::{DatabaseError, Error, Result};
