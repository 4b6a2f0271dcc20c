//! Admin dashboard figures.

use std::collections::HashSet;

use chrono::Datelike;
use serde::Serialize;

use crate::catalog::{Category, Product};
use crate::checkout::Order;
use crate::config::CommerceConfig;
use crate::error::CommerceError;
use crate::money::Money;
use crate::store::{CatalogStore, OrderStore};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One bar or point on a dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: Money,
}

impl ChartPoint {
    fn new(name: impl Into<String>, value: Money) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of all order totals, whatever their status.
    pub total_sales: Money,
    pub total_orders: usize,
    /// Distinct user IDs across orders. Guests count once.
    pub total_customers: usize,
    /// Products with stock under the configured threshold.
    pub low_stock_count: usize,
    /// The first few orders as stored (newest first).
    pub recent_orders: Vec<Order>,
    /// Order totals by weekday of the order date, Mon to Sun.
    pub revenue_by_weekday: Vec<ChartPoint>,
    /// Item revenue per category, in category order.
    pub revenue_by_category: Vec<ChartPoint>,
}

/// Compute the dashboard from a catalog and order list.
///
/// Fails with [`CommerceError::Overflow`] if a revenue sum doesn't fit.
pub fn dashboard(
    products: &[Product],
    orders: &[Order],
    config: &CommerceConfig,
) -> Result<DashboardSummary, CommerceError> {
    let total_sales =
        Money::try_sum(orders.iter().map(|order| order.total)).ok_or(CommerceError::Overflow)?;

    let total_customers = orders
        .iter()
        .map(|order| order.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let low_stock_count = products
        .iter()
        .filter(|p| p.is_low_stock(config.low_stock_threshold))
        .count();

    let mut weekday_totals = [Money::ZERO; 7];
    for order in orders {
        let idx = order.date.weekday().num_days_from_monday() as usize;
        weekday_totals[idx] = weekday_totals[idx]
            .checked_add(order.total)
            .ok_or(CommerceError::Overflow)?;
    }

    let mut category_totals = vec![Money::ZERO; Category::ALL.len()];
    for item in orders.iter().flat_map(|order| &order.items) {
        if let Some(idx) = Category::ALL.iter().position(|c| *c == item.product.category) {
            category_totals[idx] = category_totals[idx]
                .checked_add(item.line_total()?)
                .ok_or(CommerceError::Overflow)?;
        }
    }

    Ok(DashboardSummary {
        total_sales,
        total_orders: orders.len(),
        total_customers,
        low_stock_count,
        recent_orders: orders.iter().take(config.recent_orders).cloned().collect(),
        revenue_by_weekday: WEEKDAYS
            .iter()
            .zip(weekday_totals)
            .map(|(day, value)| ChartPoint::new(*day, value))
            .collect(),
        revenue_by_category: Category::ALL
            .iter()
            .zip(category_totals)
            .map(|(category, value)| ChartPoint::new(category.label(), value))
            .collect(),
    })
}

/// Fetch products and orders, then compute the dashboard.
///
/// The two stores are queried one after the other.
pub async fn load_dashboard<C, O>(
    catalog: &C,
    orders: &O,
    config: &CommerceConfig,
) -> Result<DashboardSummary, CommerceError>
where
    C: CatalogStore + ?Sized,
    O: OrderStore + ?Sized,
{
    let products = catalog.list_all().await?;
    let orders = orders.list_all().await?;
    dashboard(&products, &orders, config)
}
