//! MediHub CLI - storefront and back-office for the MediHub catalog.
//!
//! Commands:
//! - `medihub catalog` - Browse and manage products
//! - `medihub import` - Import products from a CSV file
//! - `medihub orders` - List orders and update their status
//! - `medihub dashboard` - Show sales and stock figures
//! - `medihub checkout` - Place an order
//! - `medihub config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, CheckoutArgs, ConfigArgs, DashboardArgs, ImportArgs, OrdersArgs};
use context::Credentials;

/// MediHub CLI - Run the medical equipment storefront from the terminal
#[derive(Parser)]
#[command(name = "medihub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Sign in with this email
    #[arg(long, global = true, requires = "password")]
    email: Option<String>,

    /// Password for --email
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage the product catalog
    Catalog(CatalogArgs),

    /// Import products from a CSV file
    Import(ImportArgs),

    /// List and update orders
    Orders(OrdersArgs),

    /// Show the admin dashboard
    Dashboard(DashboardArgs),

    /// Buy products
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let credentials = match (cli.email, cli.password) {
        (Some(email), Some(password)) => Some(Credentials { email, password }),
        _ => None,
    };

    let ctx = match context::Context::load(cli.config.as_deref(), credentials, output.clone()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Import(args) => commands::import::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Dashboard(args) => commands::dashboard::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };
    let result = match result {
        Ok(()) => ctx.persist().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{CatalogCommand, ConfigCommand, OrdersCommand};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("medihub").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_catalog_list() {
        let cli = parse(&["catalog", "list", "--category", "Mobility", "-l", "3"]);
        match cli.command {
            Commands::Catalog(CatalogArgs {
                command: Some(CatalogCommand::List { category, featured, limit }),
            }) => {
                assert_eq!(category, "Mobility");
                assert!(!featured);
                assert_eq!(limit, Some(3));
            }
            _ => panic!("expected catalog list"),
        }

        let cli = parse(&["-c", "shop.toml", "catalog", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("shop.toml")));
        match cli.command {
            Commands::Catalog(CatalogArgs {
                command: Some(CatalogCommand::List { category, .. }),
            }) => assert_eq!(category, "All"),
            _ => panic!("expected catalog list"),
        }
    }

    #[test]
    fn test_parse_catalog_writes() {
        let cli = parse(&[
            "catalog", "add", "--name", "Walker", "--category", "Mobility & Rehabilitation",
            "--price", "6500", "--spec", "Weight=5kg", "--image", "a.png",
        ]);
        match cli.command {
            Commands::Catalog(CatalogArgs {
                command: Some(CatalogCommand::Add(args)),
            }) => {
                assert_eq!(args.price, 6500);
                assert_eq!(args.stock, 0);
                assert_eq!(args.specs, vec!["Weight=5kg".to_string()]);
            }
            _ => panic!("expected catalog add"),
        }

        let cli = parse(&[
            "catalog", "update", "7", "--featured", "true", "--stock", "2",
            "--remove-image", "old.png", "--add-image", "new.png",
        ]);
        match cli.command {
            Commands::Catalog(CatalogArgs {
                command: Some(CatalogCommand::Update(args)),
            }) => {
                assert_eq!(args.featured, Some(true));
                assert_eq!(args.remove_images, vec!["old.png".to_string()]);
                assert_eq!(args.add_images, vec!["new.png".to_string()]);
            }
            _ => panic!("expected catalog update"),
        }
        let cli = parse(&["catalog", "delete", "7", "-y"]);
        assert!(matches!(
            cli.command,
            Commands::Catalog(CatalogArgs {
                command: Some(CatalogCommand::Delete { yes: true, .. }),
            })
        ));
    }

    #[test]
    fn test_parse_import() {
        let cli = parse(&["import", "stock.csv", "-m", "price=2", "--map", "stock=none", "--dry-run"]);
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.file, PathBuf::from("stock.csv"));
                assert_eq!(args.mappings.len(), 2);
                assert!(args.dry_run);
                assert!(!args.yes);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_parse_orders_and_dashboard() {
        let cli = parse(&["orders", "status", "ORD-42", "Shipped"]);
        match cli.command {
            Commands::Orders(OrdersArgs {
                command: Some(OrdersCommand::Status { id, status }),
            }) => {
                assert_eq!(id, "ORD-42");
                assert_eq!(status, "Shipped");
            }
            _ => panic!("expected orders status"),
        }

        let cli = parse(&["--json", "dashboard", "--low-stock"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Dashboard(DashboardArgs { low_stock: true })));
    }

    #[test]
    fn test_parse_checkout() {
        let cli = parse(&[
            "--email", "jane@example.com", "--password", "pw",
            "checkout", "-p", "1:8", "--product", "1:1",
            "--name", "Jane", "--contact-email", "jane@example.com",
            "--phone", "0700", "--city", "Nairobi", "--address", "Moi Ave",
        ]);
        assert_eq!(cli.email.as_deref(), Some("jane@example.com"));
        match cli.command {
            Commands::Checkout(args) => {
                assert_eq!(args.products, vec!["1:8".to_string(), "1:1".to_string()]);
                assert_eq!(args.city, "Nairobi");
            }
            _ => panic!("expected checkout"),
        }

        assert!(Cli::try_parse_from(["medihub", "checkout", "--name", "Jane"]).is_err());
        assert!(Cli::try_parse_from(["medihub", "--email", "x@y.z", "dashboard"]).is_err());
    }

    #[test]
    fn test_parse_config() {
        let cli = parse(&["config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                command: ConfigCommand::Init { force: true },
            })
        ));
    }
}
