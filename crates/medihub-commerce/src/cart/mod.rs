//! Shopping cart module.
//!
//! Contains the session cart and its line items.

mod cart;

pub use cart::{Cart, CartItem, DEFAULT_MAX_QUANTITY_PER_ITEM};
