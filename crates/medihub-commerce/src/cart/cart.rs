//! Cart and cart item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default maximum quantity allowed per cart line.
pub const DEFAULT_MAX_QUANTITY_PER_ITEM: u32 = 8;

/// A product snapshot with the quantity being bought.
///
/// Serializes as the product's fields plus `quantity`, which is also the
/// shape orders store their items in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product as it was when added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// The product ID.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// The active session's shopping cart.
///
/// Holds at most one line per product. Count and total are derived from the
/// lines on every read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(skip)]
    max_quantity: u32,
}

impl Cart {
    /// Create an empty cart with the default per-line limit.
    pub fn new() -> Self {
        Self::with_max_quantity(DEFAULT_MAX_QUANTITY_PER_ITEM)
    }

    /// Create an empty cart with a custom per-line limit (at least 1).
    pub fn with_max_quantity(max_quantity: u32) -> Self {
        Self {
            items: Vec::new(),
            max_quantity: max_quantity.max(1),
        }
    }

    /// The per-line quantity limit.
    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Add a product to the cart.
    ///
    /// Adding a product that is already in the cart increases its quantity,
    /// clamped to the per-line limit. Out-of-stock products and a zero
    /// quantity are refused. Returns whether the cart changed.
    pub fn add(&mut self, product: &Product, quantity: u32) -> bool {
        if product.stock == 0 {
            debug!(product_id = %product.id, "refusing to add out-of-stock product");
            return false;
        }
        if quantity == 0 {
            return false;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let new_quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(self.max_quantity);
            let changed = new_quantity != existing.quantity;
            existing.quantity = new_quantity;
            return changed;
        }

        self.items.push(CartItem {
            product: product.clone(),
            quantity: quantity.min(self.max_quantity),
        });
        true
    }

    /// Remove a product from the cart. Returns whether it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product.id != product_id);
        self.items.len() < len_before
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Other values are clamped
    /// to `1..=max`. Returns an error if the product isn't in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| &i.product.id == product_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(product_id.to_string()))?;

        let clamped = u32::try_from(quantity).unwrap_or(u32::MAX);
        item.quantity = clamped.clamp(1, self.max_quantity);
        Ok(())
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total quantity across all lines.
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of price times quantity across all lines.
    ///
    /// Fails with [`CommerceError::Overflow`] if the sum doesn't fit.
    pub fn total(&self) -> Result<Money, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(lines).ok_or(CommerceError::Overflow)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// The lines, in the order they were added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    /// Owned copy of the lines, for order placement.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
