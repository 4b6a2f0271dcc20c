//! Key-value backend for the MediHub catalog and order stores.
//!
//! Products and orders live as JSON documents in an in-memory [`KvStore`].
//! The store can be loaded from and saved to a snapshot file so state
//! survives between CLI runs. Every call can sleep for a configured latency
//! to mimic a remote backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use medihub_store::{MockBackend, StoreConfig};
//! use medihub_commerce::prelude::*;
//!
//! let backend = MockBackend::open(StoreConfig::default()).await?;
//! let catalog = backend.catalog_store();
//!
//! let products = catalog.list_all().await?;
//! println!("{} products", products.len());
//!
//! backend.persist().await?;
//! ```

mod backend;
mod catalog;
mod config;
mod error;
mod kv;
mod orders;
mod seed;

pub use backend::MockBackend;
pub use catalog::{KvCatalogStore, PRODUCTS_KEY};
pub use config::{LatencyProfile, StoreConfig};
pub use error::StoreError;
pub use kv::KvStore;
pub use orders::{KvOrderStore, ORDERS_KEY};
pub use seed::initial_products;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{KvCatalogStore, KvOrderStore, KvStore, MockBackend, StoreConfig, StoreError};
}
