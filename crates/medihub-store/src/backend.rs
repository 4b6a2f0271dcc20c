//! The mock backend: one key-value store shared by both stores.

use std::sync::Arc;

use medihub_commerce::checkout::Order;
use tracing::info;

use crate::{initial_products, KvCatalogStore, KvOrderStore, KvStore, StoreConfig, StoreError};
use crate::{ORDERS_KEY, PRODUCTS_KEY};

/// Shared backend state plus the configuration the stores are built with.
#[derive(Debug, Clone)]
pub struct MockBackend {
    kv: Arc<KvStore>,
    config: StoreConfig,
}

impl MockBackend {
    /// Open the backend.
    ///
    /// Loads the snapshot file if one is configured and exists, then seeds
    /// the catalog and an empty order list where they are missing.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let kv = match &config.snapshot_path {
            Some(path) if path.exists() => KvStore::load_snapshot(path).await?,
            _ => KvStore::new(),
        };

        let backend = Self {
            kv: Arc::new(kv),
            config,
        };
        backend.seed().await?;
        Ok(backend)
    }

    /// An unseeded, instant backend with nothing stored.
    pub fn empty() -> Self {
        Self {
            kv: Arc::new(KvStore::new()),
            config: StoreConfig {
                seed_catalog: false,
                ..StoreConfig::instant()
            },
        }
    }

    async fn seed(&self) -> Result<(), StoreError> {
        if self.config.seed_catalog {
            let products = initial_products()?;
            if self.kv.set_if_absent(PRODUCTS_KEY, &products).await? {
                info!(products = products.len(), "seeded catalog");
            }
        }
        self.kv.set_if_absent(ORDERS_KEY, &Vec::<Order>::new()).await?;
        Ok(())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog_store(&self) -> KvCatalogStore {
        KvCatalogStore::new(Arc::clone(&self.kv), self.config.effective_latency())
    }

    pub fn order_store(&self) -> KvOrderStore {
        KvOrderStore::new(Arc::clone(&self.kv), self.config.effective_latency())
    }

    /// Save state to the snapshot file. Does nothing without one.
    pub async fn persist(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.config.snapshot_path {
            self.kv.save_snapshot(path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medihub_commerce::catalog::{Category, ProductDraft};
    use medihub_commerce::{CatalogStore, Money, OrderStore};

    #[tokio::test]
    async fn test_open_seeds_catalog() {
        let backend = MockBackend::open(StoreConfig::instant()).await.unwrap();
        let products = backend.catalog_store().list_all().await.unwrap();
        assert_eq!(products.len(), 18);
        assert!(backend.order_store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_backend() {
        let backend = MockBackend::empty();
        assert!(backend.catalog_store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stores_share_state() {
        let backend = MockBackend::empty();
        let a = backend.catalog_store();
        let b = backend.catalog_store();
        let draft = ProductDraft::new("Splint", Category::EmergencyFirstAid, Money::new(900), 30);

        let created = a.create(draft).await.unwrap();
        assert_eq!(b.get_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            snapshot_path: Some(dir.path().join("medihub.json")),
            ..StoreConfig::instant()
        };

        let backend = MockBackend::open(config.clone()).await.unwrap();
        let catalog = backend.catalog_store();
        let first = catalog.list_all().await.unwrap()[0].id.clone();
        catalog.delete(&first).await.unwrap();
        backend.persist().await.unwrap();

        let reopened = MockBackend::open(config).await.unwrap();
        let products = reopened.catalog_store().list_all().await.unwrap();
        assert_eq!(products.len(), 17);
        assert!(products.iter().all(|p| p.id != first));
    }
}
