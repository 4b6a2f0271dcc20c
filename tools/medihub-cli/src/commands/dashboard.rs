//! Admin dashboard command.

use anyhow::Result;
use chrono::Local;
use console::style;
use medihub_commerce::analytics::{load_dashboard, ChartPoint};
use medihub_commerce::CatalogStore;

use super::DashboardArgs;
use crate::context::Context;
use crate::output::{stock_badge, status_badge};

/// Width of the longest chart bar, in characters.
const BAR_WIDTH: usize = 30;

/// Run the dashboard command.
pub async fn run(args: DashboardArgs, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;

    let catalog = ctx.backend.catalog_store();
    let orders = ctx.backend.order_store();
    let commerce = &ctx.config.commerce;

    let spinner = ctx.output.spinner("Loading dashboard...");
    let summary = load_dashboard(&catalog, &orders, commerce).await?;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header(&format!("Overview as of {}", Local::now().format("%Y-%m-%d %H:%M")));
    ctx.output.kv("Total sales", &summary.total_sales.display());
    ctx.output.kv("Orders", &summary.total_orders.to_string());
    ctx.output.kv("Customers", &summary.total_customers.to_string());
    ctx.output.kv("Low stock", &summary.low_stock_count.to_string());

    ctx.output.header("Revenue by weekday");
    print_chart(&summary.revenue_by_weekday, ctx);

    ctx.output.header("Revenue by category");
    print_chart(&summary.revenue_by_category, ctx);

    ctx.output.header("Recent orders");
    if summary.recent_orders.is_empty() {
        ctx.output.info("No orders yet.");
    }
    for order in &summary.recent_orders {
        ctx.output.list_item(&format!(
            "{}  {}  {}  {}",
            order.id,
            order.customer_name,
            order.total.display(),
            status_badge(order.status)
        ));
    }

    if args.low_stock {
        ctx.output.header("Low stock products");
        let products = catalog.list_all().await?;
        for product in products
            .iter()
            .filter(|p| p.is_low_stock(commerce.low_stock_threshold))
        {
            ctx.output.list_item(&format!(
                "{} ({}): {}",
                product.name,
                product.id,
                stock_badge(product.stock, commerce.low_stock_threshold)
            ));
        }
    }

    Ok(())
}

fn print_chart(points: &[ChartPoint], ctx: &Context) {
    let max = points
        .iter()
        .map(|p| p.value.amount())
        .max()
        .unwrap_or(0);
    let label_width = points.iter().map(|p| p.name.len()).max().unwrap_or(0);

    for point in points {
        let bar = style("█".repeat(bar_length(point.value.amount(), max))).cyan();
        ctx.output.info(&format!(
            "{:width$}  {} {}",
            point.name,
            bar,
            point.value.display(),
            width = label_width
        ));
    }
}

fn bar_length(value: i64, max: i64) -> usize {
    if max <= 0 || value <= 0 {
        return 0;
    }
    let scaled = (value as i128 * BAR_WIDTH as i128) / max as i128;
    (scaled as usize).max(1)
}
