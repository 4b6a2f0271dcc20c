//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use medihub_commerce::CommerceConfig;
use medihub_store::StoreConfig;
use serde::{Deserialize, Serialize};

/// File names searched for when `--config` is not given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["medihub.toml", ".medihub.toml", "medihub.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront settings.
    #[serde(default)]
    pub commerce: CommerceConfig,

    /// Backend settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Generate a default medihub.toml config file.
pub fn generate_default_config() -> String {
    r#"# MediHub storefront configuration

[commerce]
max_quantity_per_item = 8
low_stock_threshold = 10
recent_orders = 5
admin_email = "admin@medihub.africa"
admin_password = "admin123"
default_customer_name = "John Doe"

[store]
# Sleep before each backend call, like a remote API would.
simulate_latency = true
seed_catalog = true
# Keep catalog and orders between runs.
snapshot_path = ".medihub/state.json"

[store.latency]
product_list_ms = 500
product_get_ms = 300
product_write_ms = 500
order_create_ms = 800
order_list_ms = 500
order_status_ms = 300
"#
    .to_string()
}
