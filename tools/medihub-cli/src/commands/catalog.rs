//! Catalog commands.

use std::collections::BTreeMap;

use anyhow::{bail, Context as _, Result};
use medihub_commerce::catalog::{slugify, Category, Gallery, Product, ProductDraft, ProductPatch};
use medihub_commerce::search::{featured_products, filter_products, CategoryFilter};
use medihub_commerce::{CatalogStore, Money, ProductId};

use super::{AddProductArgs, CatalogArgs, CatalogCommand, UpdateProductArgs};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Products shown on the storefront home page.
const FEATURED_LIMIT: usize = 4;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CatalogCommand::List {
            category,
            featured,
            limit,
        }) => list_products(&category, featured, limit, ctx).await,
        None => list_products("All", false, None, ctx).await,
        Some(CatalogCommand::Show { id }) => show_product(&id, ctx).await,
        Some(CatalogCommand::Add(add)) => add_product(add, ctx).await,
        Some(CatalogCommand::Update(update)) => update_product(update, ctx).await,
        Some(CatalogCommand::Delete { id, yes }) => delete_product(&id, yes, ctx).await,
    }
}

async fn list_products(
    selector: &str,
    featured: bool,
    limit: Option<usize>,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Loading products...");
    let products = ctx.backend.catalog_store().list_all().await?;
    spinner.finish_and_clear();

    let filter = CategoryFilter::from_selector(selector);
    let mut shown = if featured {
        featured_products(&products, FEATURED_LIMIT)
    } else {
        filter_products(&products, &filter)
    };
    if let Some(limit) = limit {
        shown.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    let title = if featured {
        "Featured products".to_string()
    } else {
        match &filter {
            CategoryFilter::All => "All products".to_string(),
            CategoryFilter::Containing(s) => format!("Products in \"{}\"", s),
        }
    };
    ctx.output.header(&title);

    if shown.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    let widths = [10, 36, 26, 12, 12];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    let threshold = ctx.config.commerce.low_stock_threshold;
    for product in &shown {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate(&product.name, 36),
                product.category.label(),
                &product.price.display(),
                &stock_badge(product.stock, threshold),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output
        .info(&format!("Showing {} of {} product(s)", shown.len(), products.len()));
    Ok(())
}

async fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let product = fetch_product(id, ctx).await?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Slug", &product.slug);
    ctx.output.kv("Category", product.category.label());
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv(
        "Stock",
        &stock_badge(product.stock, ctx.config.commerce.low_stock_threshold),
    );
    ctx.output.kv(
        "Rating",
        &format!("{:.1} ({} reviews)", product.rating, product.reviews),
    );
    if product.featured {
        ctx.output.kv("Featured", "yes");
    }
    if !product.short_description.is_empty() {
        ctx.output.kv("Summary", &product.short_description);
    }

    if !product.specifications.is_empty() {
        ctx.output.header("Specifications");
        for (key, value) in &product.specifications {
            ctx.output.kv(key, value);
        }
    }

    ctx.output.header("Images");
    for image in product.gallery.images() {
        let marker = if image == product.image() { " (primary)" } else { "" };
        ctx.output.list_item(&format!("{}{}", image, marker));
    }

    Ok(())
}

async fn add_product(args: AddProductArgs, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;

    let category = parse_category(&args.category)?;
    if args.price < 0 {
        bail!("Price cannot be negative");
    }
    let specifications = parse_specs(&args.specs)?;

    let mut images = args.images.into_iter();
    let primary = images.next().unwrap_or_default();
    let gallery = Gallery::with_placeholder(
        primary,
        images.collect(),
        &ctx.config.commerce.placeholder_image,
    );

    let mut draft = ProductDraft::new(args.name, category, Money::new(args.price), args.stock)
        .with_descriptions(args.description.clone(), args.description)
        .with_gallery(gallery);
    draft.specifications = specifications;
    if args.featured {
        draft = draft.featured();
    }

    let spinner = ctx.output.spinner("Saving product...");
    let product = ctx.backend.catalog_store().create(draft).await?;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&product);
    } else {
        ctx.output
            .success(&format!("Added {} ({})", product.name, product.id));
    }
    Ok(())
}

async fn update_product(args: UpdateProductArgs, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;
    let current = fetch_product(&args.id, ctx).await?;

    let mut patch = ProductPatch {
        slug: args.name.as_deref().map(slugify),
        name: args.name,
        category: args.category.as_deref().map(parse_category).transpose()?,
        stock: args.stock,
        featured: args.featured,
        ..ProductPatch::default()
    };
    if let Some(price) = args.price {
        if price < 0 {
            bail!("Price cannot be negative");
        }
        patch.price = Some(Money::new(price));
    }

    if !args.add_images.is_empty()
        || !args.remove_images.is_empty()
        || args.primary_image.is_some()
    {
        let commerce = &ctx.config.commerce;
        let mut gallery = current.gallery.clone();
        for url in &args.remove_images {
            let index = gallery
                .position(url)
                .with_context(|| format!("Image '{}' is not in the product's gallery", url))?;
            gallery.remove_image(index, &commerce.placeholder_image);
        }
        gallery.add_images(args.add_images, &commerce.placeholder_images());
        if let Some(primary) = &args.primary_image {
            if !gallery.set_primary(primary) {
                bail!("Image '{}' is not in the product's gallery", primary);
            }
        }
        patch.gallery = Some(gallery);
    }

    if patch.is_empty() {
        ctx.output.info("Nothing to change.");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Saving product...");
    let product = ctx
        .backend
        .catalog_store()
        .update(&current.id, patch)
        .await?;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&product);
    } else {
        ctx.output.success(&format!("Updated {}", product.name));
    }
    Ok(())
}

async fn delete_product(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    ctx.require_admin()?;
    let product = fetch_product(id, ctx).await?;

    if !yes {
        use dialoguer::Confirm;
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{}'?", product.name))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    ctx.backend.catalog_store().delete(&product.id).await?;
    ctx.output.success(&format!("Deleted {} ({})", product.name, product.id));
    Ok(())
}

async fn fetch_product(id: &str, ctx: &Context) -> Result<Product> {
    let spinner = ctx.output.spinner("Loading product...");
    let product = ctx
        .backend
        .catalog_store()
        .get_by_id(&ProductId::new(id))
        .await?;
    spinner.finish_and_clear();

    product.with_context(|| format!("Product '{}' not found", id))
}

fn parse_category(label: &str) -> Result<Category> {
    Category::from_label(label).with_context(|| {
        let labels: Vec<&str> = Category::ALL.iter().map(Category::label).collect();
        format!("Unknown category '{}'. Expected one of: {}", label, labels.join(", "))
    })
}

fn parse_specs(specs: &[String]) -> Result<BTreeMap<String, String>> {
    specs
        .iter()
        .map(|spec| {
            let (key, value) = spec
                .split_once('=')
                .with_context(|| format!("Specification '{}' must be key=value", spec))?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
