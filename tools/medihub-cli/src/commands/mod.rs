//! CLI command implementations.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod import;
pub mod orders;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Category selector ("All" or part of a category name).
        #[arg(long, default_value = "All")]
        category: String,

        /// Show only the home page's featured products.
        #[arg(long)]
        featured: bool,

        /// Show only the first N products.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show details for a product.
    Show {
        /// Product ID.
        id: String,
    },
    /// Add a product (admin).
    Add(AddProductArgs),
    /// Change fields of a product (admin).
    Update(UpdateProductArgs),
    /// Delete a product (admin).
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for adding a product.
#[derive(Args)]
pub struct AddProductArgs {
    /// Product name.
    #[arg(long)]
    pub name: String,

    /// Category label, e.g. "Laboratory".
    #[arg(long)]
    pub category: String,

    /// Price in whole shillings.
    #[arg(long)]
    pub price: i64,

    /// Units in stock.
    #[arg(long, default_value = "0")]
    pub stock: u32,

    /// One-line description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Image URL (repeatable; the first is the primary image).
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Specification as key=value (repeatable).
    #[arg(long = "spec")]
    pub specs: Vec<String>,

    /// Feature on the home page.
    #[arg(long)]
    pub featured: bool,
}

/// Arguments for updating a product.
#[derive(Args)]
pub struct UpdateProductArgs {
    /// Product ID.
    pub id: String,

    /// New name. The slug follows it.
    #[arg(long)]
    pub name: Option<String>,

    /// New category label.
    #[arg(long)]
    pub category: Option<String>,

    /// New price in whole shillings.
    #[arg(long)]
    pub price: Option<i64>,

    /// New stock count.
    #[arg(long)]
    pub stock: Option<u32>,

    /// Image URL to add (repeatable).
    #[arg(long = "add-image")]
    pub add_images: Vec<String>,

    /// Image URL to remove (repeatable). Removing the last image leaves the
    /// placeholder.
    #[arg(long = "remove-image")]
    pub remove_images: Vec<String>,

    /// Make this image (already in the gallery) the primary one.
    #[arg(long)]
    pub primary_image: Option<String>,

    /// Set or clear the featured flag.
    #[arg(long)]
    pub featured: Option<bool>,
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to import.
    pub file: PathBuf,

    /// Override a column mapping as field=index or field=none (repeatable).
    #[arg(short, long = "map")]
    pub mappings: Vec<String>,

    /// Show what would be imported without creating anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders, newest first.
    List {
        /// Show only the last N orders.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show details for an order.
    Show {
        /// Order ID, e.g. ORD-12345.
        id: String,
    },
    /// Change an order's status (admin).
    Status {
        /// Order ID.
        id: String,
        /// Pending, Processing, Shipped, Delivered or Cancelled.
        status: String,
    },
}

/// Arguments for the dashboard command.
#[derive(Args)]
pub struct DashboardArgs {
    /// Also list products under the low-stock threshold.
    #[arg(long)]
    pub low_stock: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Product to buy as id or id:quantity (repeatable).
    #[arg(short, long = "product", required = true)]
    pub products: Vec<String>,

    /// Recipient's full name.
    #[arg(long)]
    pub name: String,

    /// Contact email.
    #[arg(long = "contact-email")]
    pub contact_email: String,

    /// Contact phone.
    #[arg(long)]
    pub phone: String,

    /// Delivery city.
    #[arg(long)]
    pub city: String,

    /// Street address.
    #[arg(long)]
    pub address: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the configuration in effect.
    Show,
    /// Write a default medihub.toml.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
