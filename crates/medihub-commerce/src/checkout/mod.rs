//! Checkout module.
//!
//! Contains delivery details, orders, and the flow that turns a cart into
//! a stored order.

mod delivery;
mod flow;
mod order;

pub use delivery::DeliveryDetails;
pub use flow::{Checkout, Customer, GUEST_CUSTOMER_NAME};
pub use order::{Order, OrderDraft, OrderStatus};
