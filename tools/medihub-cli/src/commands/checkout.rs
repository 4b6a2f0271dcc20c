//! Checkout command.

use anyhow::{bail, Context as _, Result};
use medihub_commerce::cart::Cart;
use medihub_commerce::catalog::Product;
use medihub_commerce::checkout::{Checkout, DeliveryDetails};
use medihub_commerce::{CatalogStore, ProductId};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.backend.catalog_store();
    let mut session = ctx.session.clone();

    for spec in &args.products {
        let (id, quantity) = parse_line(spec)?;
        let product = catalog
            .get_by_id(&id)
            .await?
            .with_context(|| format!("Product '{}' not found", id))?;

        if let Some(warning) = add_line(session.cart_mut(), &product, quantity)? {
            ctx.output.warn(&warning);
        }
    }

    let cart = session.cart();
    ctx.output.header("Cart");
    for item in cart.items() {
        ctx.output.list_item(&format!(
            "{} x {} = {}",
            item.quantity,
            item.product.name,
            item.line_total()?.display()
        ));
    }
    ctx.output.kv("Items", &cart.count().to_string());
    ctx.output.kv("Total", &cart.total()?.display());

    let delivery = DeliveryDetails::new(
        args.name,
        args.contact_email,
        args.phone,
        args.city,
        args.address,
    );
    let customer = session.customer();
    let orders = ctx.backend.order_store();

    let spinner = ctx.output.spinner("Placing order...");
    let order = Checkout::new(&orders)
        .place_order(session.cart_mut(), &customer, delivery)
        .await;
    spinner.finish_and_clear();
    let order = order.context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
    } else {
        ctx.output.success(&format!(
            "Order {} placed for {} ({})",
            order.id,
            order.customer_name,
            order.total.display()
        ));
    }
    Ok(())
}

/// Put a requested line into the cart.
///
/// Out-of-stock products abort the checkout. A request the per-line limit
/// cuts short is kept, and the returned message says how many will be
/// ordered.
fn add_line(cart: &mut Cart, product: &Product, quantity: u32) -> Result<Option<String>> {
    if !product.is_in_stock() {
        bail!("'{}' is out of stock", product.name);
    }
    let before = cart.get(&product.id).map(|item| item.quantity).unwrap_or(0);
    cart.add(product, quantity);
    let after = cart.get(&product.id).map(|item| item.quantity).unwrap_or(0);

    if after - before < quantity {
        return Ok(Some(format!(
            "Only {} of '{}' can be ordered at once",
            after, product.name
        )));
    }
    Ok(None)
}

/// Parse `id` or `id:quantity`.
fn parse_line(spec: &str) -> Result<(ProductId, u32)> {
    let (id, quantity) = match spec.rsplit_once(':') {
        Some((id, qty)) => {
            let qty = qty
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid quantity in '{}'", spec))?;
            (id, qty)
        }
        None => (spec, 1),
    };
    let id = id.trim();
    if id.is_empty() {
        bail!("Missing product ID in '{}'", spec);
    }
    if quantity == 0 {
        bail!("Quantity must be at least 1 in '{}'", spec);
    }
    Ok((ProductId::new(id), quantity))
}
