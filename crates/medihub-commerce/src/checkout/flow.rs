//! Checkout flow.

use crate::auth::User;
use crate::cart::Cart;
use crate::checkout::{DeliveryDetails, Order, OrderDraft};
use crate::error::CommerceError;
use crate::ids::UserId;
use crate::store::OrderStore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Name recorded for orders placed without signing in.
pub const GUEST_CUSTOMER_NAME: &str = "Guest User";

/// Who an order is placed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub user_id: UserId,
    pub name: String,
}

impl Customer {
    /// The anonymous guest customer.
    pub fn guest() -> Self {
        Self {
            user_id: UserId::guest(),
            name: GUEST_CUSTOMER_NAME.to_string(),
        }
    }

    /// A signed-in user.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

/// Places orders against an order store.
pub struct Checkout<'a, S: ?Sized> {
    orders: &'a S,
}

impl<'a, S> Checkout<'a, S>
where
    S: OrderStore + ?Sized,
{
    pub fn new(orders: &'a S) -> Self {
        Self { orders }
    }

    /// Place an order for everything in the cart.
    ///
    /// The order gets a copy of the cart lines and the cart total. The cart
    /// is cleared once the store accepts the order and left as it was if
    /// anything fails.
    pub async fn place_order(
        &self,
        cart: &mut Cart,
        customer: &Customer,
        delivery: DeliveryDetails,
    ) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        delivery.validate()?;
        let total = cart.total()?;

        let draft = OrderDraft {
            user_id: customer.user_id.clone(),
            customer_name: customer.name.clone(),
            items: cart.snapshot(),
            total,
            delivery: Some(delivery),
        };

        let order = self.orders.create(draft).await.map_err(|e| {
            warn!(user_id = %customer.user_id, error = %e, "order creation failed");
            e
        })?;
        cart.clear();

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            items = order.item_count(),
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::catalog::{Category, Product, ProductDraft};
    use crate::checkout::OrderStatus;
    use crate::ids::{OrderId, ProductId};
    use crate::money::Money;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryOrders {
        orders: Mutex<Vec<Order>>,
        fail: bool,
    }

    #[async_trait]
    impl OrderStore for MemoryOrders {
        async fn create(&self, draft: OrderDraft) -> Result<Order, CommerceError> {
            if self.fail {
                return Err(CommerceError::Storage("backend unavailable".to_string()));
            }
            let mut orders = self.orders.lock().unwrap();
            let id = OrderId::from_number(orders.len() as u32 + 1);
            let order = Order::from_draft(id, draft, Utc::now());
            orders.insert(0, order.clone());
            Ok(order)
        }

        async fn list_all(&self) -> Result<Vec<Order>, CommerceError> {
            Ok(self.orders.lock().unwrap().clone())
        }

        async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), CommerceError> {
            if let Some(order) = self.orders.lock().unwrap().iter_mut().find(|o| &o.id == id) {
                order.set_status(status);
            }
            Ok(())
        }
    }

    fn product(id: &str, price: i64) -> Product {
        Product::from_draft(
            ProductId::new(id),
            ProductDraft::new(id, Category::ClinicalHospital, Money::new(price), 20),
        )
    }

    fn delivery() -> DeliveryDetails {
        DeliveryDetails::new("Amina Otieno", "amina@example.co.ke", "0700000000", "Nairobi", "Ngong Rd")
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let store = MemoryOrders::default();
        let mut cart = Cart::new();
        cart.add(&product("p1", 4500), 2);
        cart.add(&product("p2", 2500), 1);

        let order = Checkout::new(&store)
            .place_order(&mut cart, &Customer::guest(), delivery())
            .await
            .unwrap();

        assert_eq!(order.total, Money::new(11500));
        assert_eq!(order.user_id.as_str(), "guest");
        assert_eq!(order.customer_name, GUEST_CUSTOMER_NAME);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_stores_nothing() {
        let store = MemoryOrders::default();
        let mut cart = Cart::new();
        let result = Checkout::new(&store)
            .place_order(&mut cart, &Customer::guest(), delivery())
            .await;

        assert!(matches!(result, Err(CommerceError::EmptyCart)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_delivery_keeps_cart() {
        let store = MemoryOrders::default();
        let mut cart = Cart::new();
        cart.add(&product("p1", 100), 1);

        let mut details = delivery();
        details.email = "nope".to_string();
        let result = Checkout::new(&store)
            .place_order(&mut cart, &Customer::guest(), details)
            .await;

        assert!(matches!(result, Err(CommerceError::Validation(_))));
        assert_eq!(cart.count(), 1);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_cart() {
        let store = MemoryOrders {
            fail: true,
            ..MemoryOrders::default()
        };
        let mut cart = Cart::new();
        cart.add(&product("p1", 100), 3);

        let result = Checkout::new(&store)
            .place_order(&mut cart, &Customer::guest(), delivery())
            .await;
        assert!(matches!(result, Err(CommerceError::Storage(_))));
        assert_eq!(cart.count(), 3);
    }

    #[tokio::test]
    async fn test_overflowing_total_stores_nothing() {
        let store = MemoryOrders::default();
        let mut cart = Cart::new();
        cart.add(&product("p1", i64::MAX / 2 + 1), 2);
        cart.add(&product("p2", 100), 1);

        let result = Checkout::new(&store)
            .place_order(&mut cart, &Customer::guest(), delivery())
            .await;
        assert!(matches!(result, Err(CommerceError::Overflow)));
        assert_eq!(cart.count(), 3);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_is_a_snapshot() {
        let store = MemoryOrders::default();
        let mut cart = Cart::new();
        let mut p = product("p1", 1000);
        cart.add(&p, 1);

        let user = User {
            id: UserId::new("user-1"),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: Role::Customer,
        };
        Checkout::new(&store)
            .place_order(&mut cart, &Customer::from_user(&user), delivery())
            .await
            .unwrap();

        p.price = Money::new(9999);
        cart.add(&p, 5);

        let stored = &store.list_all().await.unwrap()[0];
        assert_eq!(stored.items[0].product.price, Money::new(1000));
        assert_eq!(stored.items[0].quantity, 1);
        assert_eq!(stored.total, Money::new(1000));
        assert_eq!(stored.customer_name, "John Doe");
    }
}
