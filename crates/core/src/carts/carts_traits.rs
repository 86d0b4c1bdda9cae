use async_trait::async_trait;

use crate::carts::carts_model::Cart;
use crate::errors::Result;
use crate::filters::CartFilter;

/// Trait for cart repository operations.
///
/// The mutating operations run on the storage layer's serialized writer.
/// `add_item` performs its item lookup, line upsert, and price
/// reconciliation inside one transaction, so no reader ever observes a
/// cart whose derived price disagrees with its lines.
#[async_trait]
pub trait CartRepositoryTrait: Send + Sync {
    async fn create(&self) -> Result<Cart>;
    /// Loads a cart with its visible (non-deleted-item) lines joined in.
    fn get_by_id(&self, cart_id: i64) -> Result<Cart>;
    /// Lists carts in ascending id order. Price bounds are storage
    /// predicates; quantity bounds are applied per cart after its lines
    /// are fetched, so pagination covers the pre-filter candidate set.
    fn list(&self, filter: &CartFilter) -> Result<Vec<Cart>>;
    /// Upserts the (cart, item) line and reconciles the cart price
    /// atomically. Fails without writing if the cart or item is absent,
    /// or if the item is soft-deleted.
    async fn add_item(&self, cart_id: i64, item_id: i64, quantity: i64) -> Result<Cart>;
    /// Recomputes and persists the cart's derived price. Idempotent.
    async fn reconcile_price(&self, cart_id: i64) -> Result<Cart>;
}

/// Trait for cart store service operations.
#[async_trait]
pub trait CartServiceTrait: Send + Sync {
    async fn create_cart(&self) -> Result<Cart>;
    fn get_cart(&self, cart_id: i64) -> Result<Cart>;
    fn list_carts(&self, filter: CartFilter) -> Result<Vec<Cart>>;
    async fn add_item_to_cart(&self, cart_id: i64, item_id: i64, quantity: i64) -> Result<Cart>;
    async fn reconcile_cart(&self, cart_id: i64) -> Result<Cart>;
}
