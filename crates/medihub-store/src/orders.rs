//! Order store over the key-value backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use medihub_commerce::checkout::{Order, OrderDraft, OrderStatus};
use medihub_commerce::{CommerceError, OrderId, OrderStore};
use tracing::{debug, info};

use crate::config::{pause, LatencyProfile};
use crate::{KvStore, StoreError};

/// Key holding the order list.
pub const ORDERS_KEY: &str = "medihub_orders";

/// Attempts at drawing an unused random order number.
const MAX_ID_ATTEMPTS: usize = 64;

/// Orders stored newest first under [`ORDERS_KEY`].
#[derive(Debug, Clone)]
pub struct KvOrderStore {
    kv: Arc<KvStore>,
    latency: LatencyProfile,
}

impl KvOrderStore {
    pub fn new(kv: Arc<KvStore>, latency: LatencyProfile) -> Self {
        Self { kv, latency }
    }
}

#[async_trait]
impl OrderStore for KvOrderStore {
    async fn create(&self, draft: OrderDraft) -> Result<Order, CommerceError> {
        pause(self.latency.order_create_ms).await;
        let order = self
            .kv
            .update(ORDERS_KEY, |orders: &mut Vec<Order>| {
                let id = (0..MAX_ID_ATTEMPTS)
                    .map(|_| OrderId::generate())
                    .find(|id| orders.iter().all(|o| &o.id != id))
                    .ok_or(StoreError::IdExhausted("order"))?;
                let order = Order::from_draft(id, draft, Utc::now());
                orders.insert(0, order.clone());
                Ok::<_, CommerceError>(order)
            })
            .await?;

        info!(order_id = %order.id, total = %order.total, "order stored");
        Ok(order)
    }

    async fn list_all(&self) -> Result<Vec<Order>, CommerceError> {
        pause(self.latency.order_list_ms).await;
        let orders: Option<Vec<Order>> = self.kv.get(ORDERS_KEY).await?;
        Ok(orders.unwrap_or_default())
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), CommerceError> {
        pause(self.latency.order_status_ms).await;
        let found = self
            .kv
            .update(ORDERS_KEY, |orders: &mut Vec<Order>| {
                let order = orders.iter_mut().find(|o| &o.id == id);
                let found = order.is_some();
                if let Some(order) = order {
                    order.set_status(status);
                }
                Ok::<_, CommerceError>(found)
            })
            .await?;

        if found {
            info!(order_id = %id, status = %status, "order status updated");
        } else {
            debug!(order_id = %id, "status update for missing order ignored");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medihub_commerce::{Money, UserId};

    fn store() -> KvOrderStore {
        KvOrderStore::new(Arc::new(KvStore::new()), LatencyProfile::zero())
    }

    fn draft(total: i64) -> OrderDraft {
        OrderDraft {
            user_id: UserId::guest(),
            customer_name: "Guest User".to_string(),
            items: Vec::new(),
            total: Money::new(total),
            delivery: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_pending_order() {
        let store = store();
        let before = Utc::now();
        let order = store.create(draft(4500)).await.unwrap();

        assert!(order.id.as_str().starts_with("ORD-"));
        let number: u32 = order.id.as_str()["ORD-".len()..].parse().unwrap();
        assert!(number < medihub_commerce::ids::ORDER_NUMBER_LIMIT);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.date >= before);
    }

    #[tokio::test]
    async fn test_newest_first() {
        let store = store();
        let first = store.create(draft(1)).await.unwrap();
        let second = store.create(draft(2)).await.unwrap();

        let orders = store.list_all().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = store();
        let order = store.create(draft(100)).await.unwrap();

        store.update_status(&order.id, OrderStatus::Shipped).await.unwrap();
        let orders = store.list_all().await.unwrap();
        assert_eq!(orders[0].status, OrderStatus::Shipped);
        assert_eq!(orders[0].date, order.date);
    }

    #[tokio::test]
    async fn test_update_status_missing_is_noop() {
        let store = store();
        store.create(draft(100)).await.unwrap();
        store
            .update_status(&OrderId::new("ORD-missing"), OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(store.list_all().await.unwrap()[0].status, OrderStatus::Pending);
    }
}
