//! Product catalog module.
//!
//! Contains types for products, categories, image galleries, and the draft
//! and patch shapes used to create and update products.

mod category;
mod gallery;
mod product;

pub use category::Category;
pub use gallery::{Gallery, DEFAULT_PLACEHOLDER_IMAGE, IMPORT_PLACEHOLDER_IMAGE};
pub use product::{slugify, Product, ProductDraft, ProductPatch, FALLBACK_SLUG};
