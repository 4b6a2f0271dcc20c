//! Catalog store over the key-value backend.

use std::sync::Arc;

use async_trait::async_trait;
use medihub_commerce::catalog::{Product, ProductDraft, ProductPatch};
use medihub_commerce::{CatalogStore, CommerceError, ProductId};
use tracing::{debug, info};

use crate::config::{pause, LatencyProfile};
use crate::{KvStore, StoreError};

/// Key holding the product list.
pub const PRODUCTS_KEY: &str = "medihub_products";

/// Attempts at drawing an unused random product ID.
const MAX_ID_ATTEMPTS: usize = 16;

/// Products stored as one ordered list under [`PRODUCTS_KEY`].
#[derive(Debug, Clone)]
pub struct KvCatalogStore {
    kv: Arc<KvStore>,
    latency: LatencyProfile,
}

impl KvCatalogStore {
    pub fn new(kv: Arc<KvStore>, latency: LatencyProfile) -> Self {
        Self { kv, latency }
    }
}

#[async_trait]
impl CatalogStore for KvCatalogStore {
    async fn list_all(&self) -> Result<Vec<Product>, CommerceError> {
        pause(self.latency.product_list_ms).await;
        let products: Option<Vec<Product>> = self.kv.get(PRODUCTS_KEY).await?;
        Ok(products.unwrap_or_default())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        pause(self.latency.product_get_ms).await;
        let products: Vec<Product> = self.kv.get(PRODUCTS_KEY).await?.unwrap_or_default();
        Ok(products.into_iter().find(|p| &p.id == id))
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, CommerceError> {
        pause(self.latency.product_write_ms).await;
        let product = self
            .kv
            .update(PRODUCTS_KEY, |products: &mut Vec<Product>| {
                let id = (0..MAX_ID_ATTEMPTS)
                    .map(|_| ProductId::generate())
                    .find(|id| products.iter().all(|p| &p.id != id))
                    .ok_or(StoreError::IdExhausted("product"))?;
                let product = Product::from_draft(id, draft);
                products.push(product.clone());
                Ok::<_, CommerceError>(product)
            })
            .await?;

        info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, CommerceError> {
        pause(self.latency.product_write_ms).await;
        let product = self
            .kv
            .update(PRODUCTS_KEY, |products: &mut Vec<Product>| {
                let product = products
                    .iter_mut()
                    .find(|p| &p.id == id)
                    .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
                patch.apply(product);
                Ok::<_, CommerceError>(product.clone())
            })
            .await?;

        info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), CommerceError> {
        pause(self.latency.product_write_ms).await;
        let removed = self
            .kv
            .update(PRODUCTS_KEY, |products: &mut Vec<Product>| {
                let before = products.len();
                products.retain(|p| &p.id != id);
                Ok::<_, CommerceError>(before - products.len())
            })
            .await?;

        if removed > 0 {
            info!(product_id = %id, "product deleted");
        } else {
            debug!(product_id = %id, "delete of missing product ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medihub_commerce::catalog::Category;
    use medihub_commerce::Money;

    fn store() -> KvCatalogStore {
        KvCatalogStore::new(Arc::new(KvStore::new()), LatencyProfile::zero())
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft::new(name, Category::Laboratory, Money::new(3500), 60)
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = store();
        let a = store.create(draft("Microscope")).await.unwrap();
        let b = store.create(draft("Centrifuge")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.id.as_str().len(), 9);
        assert_eq!(a.slug, "microscope");

        let names: Vec<_> = store.list_all().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Microscope", "Centrifuge"]);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = store();
        let created = store.create(draft("Microscope")).await.unwrap();

        assert_eq!(store.get_by_id(&created.id).await.unwrap(), Some(created));
        assert_eq!(store.get_by_id(&ProductId::new("nope")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let store = store();
        let created = store.create(draft("Microscope")).await.unwrap();
        let patch = ProductPatch {
            stock: Some(2),
            featured: Some(true),
            ..ProductPatch::default()
        };

        let updated = store.update(&created.id, patch).await.unwrap();
        assert_eq!(updated.stock, 2);
        assert!(updated.featured);
        assert_eq!(updated.id, created.id);
        assert_eq!(store.get_by_id(&created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let store = store();
        let result = store.update(&ProductId::new("ghost"), ProductPatch::default()).await;
        assert!(matches!(result, Err(CommerceError::ProductNotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = store();
        let created = store.create(draft("Microscope")).await.unwrap();

        store.delete(&created.id).await.unwrap();
        store.delete(&created.id).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        assert!(store().list_all().await.unwrap().is_empty());
    }
}
