//! Persistence seams for the catalog and orders.
//!
//! The storefront only talks to storage through these traits. Calls are
//! async because the backing service may be remote; callers await one call
//! before issuing a dependent one.

use async_trait::async_trait;

use crate::catalog::{Product, ProductDraft, ProductPatch};
use crate::checkout::{Order, OrderDraft, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId};

/// Durable mapping from product ID to product.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every product, in stored order.
    async fn list_all(&self) -> Result<Vec<Product>, CommerceError>;

    /// Look up a product. `Ok(None)` if it doesn't exist.
    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CommerceError>;

    /// Store a new product and assign its ID.
    async fn create(&self, draft: ProductDraft) -> Result<Product, CommerceError>;

    /// Apply a partial update.
    ///
    /// Fails with [`CommerceError::ProductNotFound`] if the product doesn't
    /// exist.
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, CommerceError>;

    /// Delete a product. Deleting a missing product is not an error.
    async fn delete(&self, id: &ProductId) -> Result<(), CommerceError>;
}

/// Durable, ordered list of orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store a new order, assigning its ID and date with status Pending.
    async fn create(&self, draft: OrderDraft) -> Result<Order, CommerceError>;

    /// Every order, as stored.
    async fn list_all(&self) -> Result<Vec<Order>, CommerceError>;

    /// Change an order's status. Missing orders are ignored.
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), CommerceError>;
}
