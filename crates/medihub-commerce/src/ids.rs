//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where an OrderId is expected.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated IDs.
const GENERATED_ID_LENGTH: usize = 9;

/// Upper bound (exclusive) for order numbers.
pub const ORDER_NUMBER_LIMIT: u32 = 100_000;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);

impl ProductId {
    /// Generate a random base-36 product ID.
    pub fn generate() -> Self {
        Self(random_base36(GENERATED_ID_LENGTH))
    }
}

impl OrderId {
    /// Build an order ID from an order number (`ORD-<n>`).
    pub fn from_number(number: u32) -> Self {
        Self(format!("ORD-{}", number))
    }

    /// Generate a random order ID below [`ORDER_NUMBER_LIMIT`].
    ///
    /// Callers that need uniqueness must check against existing orders.
    pub fn generate() -> Self {
        Self::from_number(rand::thread_rng().gen_range(0..ORDER_NUMBER_LIMIT))
    }
}

impl UserId {
    /// The ID recorded for orders placed without signing in.
    pub fn guest() -> Self {
        Self::new("guest")
    }

    /// Generate a customer ID (`user-<random>`).
    pub fn generate() -> Self {
        Self(format!("user-{}", random_base36(GENERATED_ID_LENGTH)))
    }
}

fn random_base36(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            char::from(ALPHABET.get(idx).copied().unwrap_or(b'0'))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_product_id_generation() {
        let id1 = ProductId::generate();
        let id2 = ProductId::generate();
        assert_eq!(id1.as_str().len(), GENERATED_ID_LENGTH);
        assert!(id1
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_order_id_format() {
        assert_eq!(OrderId::from_number(4217).as_str(), "ORD-4217");

        let generated = OrderId::generate();
        let number: u32 = generated
            .as_str()
            .strip_prefix("ORD-")
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(number < ORDER_NUMBER_LIMIT);
    }

    #[test]
    fn test_user_ids() {
        assert_eq!(UserId::guest().as_str(), "guest");
        assert!(UserId::generate().as_str().starts_with("user-"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
    }
}
