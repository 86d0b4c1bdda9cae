//! Shopcart Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the shop cart engine:
//! the item catalog with its soft-delete state machine, the cart store
//! with merge-on-duplicate-add line semantics, the pricing reconciler
//! that keeps every cart's derived total consistent with its visible
//! lines, and the validated query filter layer.
//!
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod carts;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod items;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
