//! Domain types and logic for the MediHub medical equipment storefront.
//!
//! This crate provides the pieces the storefront and admin back-office are
//! built from:
//!
//! - **Catalog**: Products, categories, image galleries, drafts and patches
//! - **Cart**: Session cart with quantity limits and derived totals
//! - **Search**: Category filtering and featured listings
//! - **Import**: CSV parsing, column mapping inference and sequential import
//! - **Checkout**: Orders placed from a cart snapshot
//! - **Auth**: Users, roles, login and the active session
//! - **Analytics**: Admin dashboard figures
//!
//! Persistence is behind the [`CatalogStore`] and [`OrderStore`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use medihub_commerce::prelude::*;
//!
//! let products = catalog.list_all().await?;
//! let mobility = filter_products(&products, &CategoryFilter::from_selector("Mobility"));
//!
//! let mut cart = Cart::new();
//! cart.add(mobility[0], 2);
//!
//! let order = Checkout::new(&orders)
//!     .place_order(&mut cart, &Customer::guest(), delivery)
//!     .await?;
//! println!("Placed {} for {}", order.id, order.total);
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod store;

pub mod analytics;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod import;
pub mod search;

pub use config::CommerceConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::Money;
pub use store::{CatalogStore, OrderStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CommerceConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;
    pub use crate::store::{CatalogStore, OrderStore};

    // Catalog
    pub use crate::catalog::{slugify, Category, Gallery, Product, ProductDraft, ProductPatch};

    // Cart
    pub use crate::cart::{Cart, CartItem};

    // Search
    pub use crate::search::{featured_products, filter_products, CategoryFilter};

    // Import
    pub use crate::import::{
        import_drafts, infer_mapping, parse_csv, project_rows, ColumnMapping, CsvTable,
        ImportField, ImportReport, RowOutcome,
    };

    // Checkout
    pub use crate::checkout::{Checkout, Customer, DeliveryDetails, Order, OrderDraft, OrderStatus};

    // Auth
    pub use crate::auth::{Authenticator, Role, Session, User};

    // Analytics
    pub use crate::analytics::{dashboard, load_dashboard, ChartPoint, DashboardSummary};
}
