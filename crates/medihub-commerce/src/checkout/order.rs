//! Order types.

use std::fmt;
use std::str::FromStr;

use crate::cart::CartItem;
use crate::checkout::DeliveryDetails;
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::Validation(format!("unknown order status: {}", s)))
    }
}

/// An order ready to be stored. The store assigns ID, date and status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: UserId,
    pub customer_name: String,
    pub items: Vec<CartItem>,
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryDetails>,
}

/// A placed order.
///
/// Items are a copy of the cart lines at checkout; later cart or catalog
/// changes never reach them. Only the status changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Customer who placed it ("guest" for guest checkout).
    pub user_id: UserId,
    /// Customer display name.
    pub customer_name: String,
    /// Items as they were in the cart.
    pub items: Vec<CartItem>,
    /// Total at checkout.
    pub total: Money,
    /// Fulfillment status.
    #[serde(default)]
    pub status: OrderStatus,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// Delivery details, if collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryDetails>,
}

impl Order {
    /// Build a pending order from a draft.
    pub fn from_draft(id: OrderId, draft: OrderDraft, date: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            customer_name: draft.customer_name,
            items: draft.items,
            total: draft.total,
            status: OrderStatus::Pending,
            date,
            delivery: draft.delivery,
        }
    }

    /// Total quantity across all items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Update status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}
