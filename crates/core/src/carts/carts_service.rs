use std::sync::Arc;

use log::debug;

use super::carts_model::Cart;
use super::carts_traits::{CartRepositoryTrait, CartServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::filters::CartFilter;

/// Service for managing carts and their lines.
///
/// Quantity and filter validation happens here, before storage is
/// touched; existence and soft-delete checks on the referenced item run
/// inside the repository transaction, where they are authoritative.
pub struct CartService {
    repository: Arc<dyn CartRepositoryTrait>,
}

impl CartService {
    pub fn new(repository: Arc<dyn CartRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CartServiceTrait for CartService {
    async fn create_cart(&self) -> Result<Cart> {
        debug!("Creating empty cart");
        self.repository.create().await
    }

    fn get_cart(&self, cart_id: i64) -> Result<Cart> {
        self.repository.get_by_id(cart_id)
    }

    fn list_carts(&self, filter: CartFilter) -> Result<Vec<Cart>> {
        filter.validate()?;
        self.repository.list(&filter)
    }

    async fn add_item_to_cart(&self, cart_id: i64, item_id: i64, quantity: i64) -> Result<Cart> {
        if quantity <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "Quantity must be positive, got {}",
                quantity
            ))
            .into());
        }
        debug!(
            "Adding item {} x{} to cart {}",
            item_id, quantity, cart_id
        );
        self.repository.add_item(cart_id, item_id, quantity).await
    }

    async fn reconcile_cart(&self, cart_id: i64) -> Result<Cart> {
        self.repository.reconcile_price(cart_id).await
    }
}
