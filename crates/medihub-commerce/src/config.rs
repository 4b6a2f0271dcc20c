//! Storefront configuration.

use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_PLACEHOLDER_IMAGE, IMPORT_PLACEHOLDER_IMAGE};
use crate::cart::DEFAULT_MAX_QUANTITY_PER_ITEM;

/// Tunables shared by the cart, import, auth and analytics modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommerceConfig {
    /// Highest quantity a single cart line may hold.
    #[serde(default = "default_max_quantity")]
    pub max_quantity_per_item: u32,

    /// Products with stock below this count as low stock.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Number of orders shown on the dashboard.
    #[serde(default = "default_recent_orders")]
    pub recent_orders: usize,

    /// Image used when a product has none.
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Image given to every CSV-imported product.
    #[serde(default = "default_import_placeholder_image")]
    pub import_placeholder_image: String,

    /// Admin sign-in email.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Admin sign-in password.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Display name given to customers on sign-in.
    #[serde(default = "default_customer_name")]
    pub default_customer_name: String,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            max_quantity_per_item: default_max_quantity(),
            low_stock_threshold: default_low_stock_threshold(),
            recent_orders: default_recent_orders(),
            placeholder_image: default_placeholder_image(),
            import_placeholder_image: default_import_placeholder_image(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
            default_customer_name: default_customer_name(),
        }
    }
}

impl CommerceConfig {
    /// The configured placeholder images, for gallery edits.
    pub fn placeholder_images(&self) -> [&str; 2] {
        [&self.placeholder_image, &self.import_placeholder_image]
    }
}

fn default_max_quantity() -> u32 {
    DEFAULT_MAX_QUANTITY_PER_ITEM
}

fn default_low_stock_threshold() -> u32 {
    10
}

fn default_recent_orders() -> usize {
    5
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

fn default_import_placeholder_image() -> String {
    IMPORT_PLACEHOLDER_IMAGE.to_string()
}

fn default_admin_email() -> String {
    "admin@medihub.africa".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_customer_name() -> String {
    "John Doe".to_string()
}
