//! Catalog search module.
//!
//! Contains the storefront's category filter and featured listing.

mod filter;

pub use filter::{
    featured_products, filter_products, CategoryFilter, ALL_SELECTOR, FEATURED_MIN_RATING,
};
