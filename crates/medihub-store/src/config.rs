//! Backend configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the mock backend behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Sleep before answering each call.
    #[serde(default = "default_simulate_latency")]
    pub simulate_latency: bool,

    /// Per-call latency in milliseconds.
    #[serde(default)]
    pub latency: LatencyProfile,

    /// JSON file the store is loaded from and saved to.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Seed the catalog with the built-in products when it is empty.
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,
}

impl StoreConfig {
    /// Configuration with no latency, no snapshot file and a seeded catalog.
    pub fn instant() -> Self {
        Self {
            simulate_latency: false,
            ..Self::default()
        }
    }

    /// The latency profile in effect, or all zeros when disabled.
    pub fn effective_latency(&self) -> LatencyProfile {
        if self.simulate_latency {
            self.latency.clone()
        } else {
            LatencyProfile::zero()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            simulate_latency: default_simulate_latency(),
            latency: LatencyProfile::default(),
            snapshot_path: None,
            seed_catalog: default_seed_catalog(),
        }
    }
}

fn default_simulate_latency() -> bool {
    true
}

fn default_seed_catalog() -> bool {
    true
}

/// Simulated latency per store call, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    pub product_list_ms: u64,
    pub product_get_ms: u64,
    pub product_write_ms: u64,
    pub order_create_ms: u64,
    pub order_list_ms: u64,
    pub order_status_ms: u64,
}

impl LatencyProfile {
    pub fn zero() -> Self {
        Self {
            product_list_ms: 0,
            product_get_ms: 0,
            product_write_ms: 0,
            order_create_ms: 0,
            order_list_ms: 0,
            order_status_ms: 0,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            product_list_ms: 500,
            product_get_ms: 300,
            product_write_ms: 500,
            order_create_ms: 800,
            order_list_ms: 500,
            order_status_ms: 300,
        }
    }
}

/// Sleep for `ms` milliseconds, skipping the timer entirely for zero.
pub(crate) async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.simulate_latency);
        assert_eq!(config.latency.order_create_ms, 800);
        assert_eq!(config.effective_latency().product_get_ms, 300);
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_instant_has_no_latency() {
        assert_eq!(StoreConfig::instant().effective_latency(), LatencyProfile::zero());
    }

    #[test]
    fn test_partial_latency_table() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"latency": {"order_create_ms": 50}}"#).unwrap();
        assert_eq!(config.latency.order_create_ms, 50);
        assert_eq!(config.latency.product_list_ms, 500);
        assert!(config.seed_catalog);
    }
}
