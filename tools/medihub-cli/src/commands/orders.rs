//! Order commands.

use anyhow::{Context as _, Result};
use medihub_commerce::checkout::{Order, OrderStatus};
use medihub_commerce::{OrderId, OrderStore};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(OrdersCommand::List { limit }) => list_orders(limit, ctx).await,
        None => list_orders(None, ctx).await,
        Some(OrdersCommand::Show { id }) => show_order(&id, ctx).await,
        Some(OrdersCommand::Status { id, status }) => update_status(&id, &status, ctx).await,
    }
}

/// Orders visible to the current session: everything for admins, otherwise
/// only the signed-in customer's own orders.
async fn visible_orders(ctx: &Context) -> Result<Vec<Order>> {
    let spinner = ctx.output.spinner("Loading orders...");
    let orders = ctx.backend.order_store().list_all().await?;
    spinner.finish_and_clear();

    if ctx.session.is_admin() {
        return Ok(orders);
    }
    if !ctx.session.is_signed_in() {
        return Ok(Vec::new());
    }
    let customer = ctx.session.customer();
    Ok(orders
        .into_iter()
        .filter(|order| order.user_id == customer.user_id)
        .collect())
}

async fn list_orders(limit: Option<usize>, ctx: &Context) -> Result<()> {
    let mut orders = visible_orders(ctx).await?;
    if let Some(limit) = limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders found.");
        return Ok(());
    }

    let widths = [10, 20, 18, 6, 14, 12];
    ctx.output.table_row(
        &["ID", "CUSTOMER", "DATE", "ITEMS", "TOTAL", "STATUS"],
        &widths,
    );
    for order in &orders {
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &truncate(&order.customer_name, 20),
                &order.date.format("%Y-%m-%d %H:%M").to_string(),
                &order.item_count().to_string(),
                &order.total.display(),
                &status_badge(order.status),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} order(s)", orders.len()));
    Ok(())
}

async fn show_order(id: &str, ctx: &Context) -> Result<()> {
    let order = visible_orders(ctx)
        .await?
        .into_iter()
        .find(|order| order.id.as_str() == id)
        .with_context(|| format!("Order '{}' not found", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.id));
    ctx.output.kv("Customer", &order.customer_name);
    ctx.output.kv("Placed", &order.date.to_rfc2822());
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output.kv("Total", &order.total.display());
    if let Some(delivery) = &order.delivery {
        ctx.output.kv("Deliver to", &delivery.one_line());
        ctx.output.kv("Contact", &format!("{} / {}", delivery.email, delivery.phone));
    }

    ctx.output.header("Items");
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} x {} @ {} = {}",
            item.quantity,
            item.product.name,
            item.product.price.display(),
            item.line_total()?.display()
        ));
    }
    Ok(())
}

async fn update_status(id: &str, status: &str, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;
    let status: OrderStatus = status.parse()?;
    let id = OrderId::new(id);

    let orders = ctx.backend.order_store();
    let current = orders
        .list_all()
        .await?
        .into_iter()
        .find(|order| order.id == id)
        .map(|order| order.status);
    let Some(current) = current else {
        ctx.output.warn(&format!("Order '{}' not found; nothing changed", id));
        return Ok(());
    };
    if current.is_terminal() && current != status {
        ctx.output.warn(&format!("Order {} was already {}", id, current));
    }

    let spinner = ctx.output.spinner("Updating status...");
    orders.update_status(&id, status).await?;
    spinner.finish_and_clear();

    ctx.output
        .success(&format!("Order {} is now {}", id, status_badge(status)));
    Ok(())
}
