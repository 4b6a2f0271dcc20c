//! Delivery details collected at checkout.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Where and to whom an order is delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    /// Recipient's full name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Delivery city.
    pub city: String,
    /// Street address.
    pub address: String,
}

impl DeliveryDetails {
    /// Create delivery details.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            city: city.into(),
            address: address.into(),
        }
    }

    /// Check that every field is filled in and the email looks like one.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let fields = [
            ("full name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("city", &self.city),
            ("address", &self.address),
        ];
        if let Some((label, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CommerceError::Validation(format!("{} is required", label)));
        }
        if !self.email.contains('@') {
            return Err(CommerceError::Validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}", self.full_name, self.address, self.city)
    }
}
