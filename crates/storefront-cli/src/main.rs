//! Storefront CLI
//!
//! Thin wrapper around storefront-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Show store information
//! storefront info
//!
//! # Add a product (price as displayed on the card)
//! storefront cart add "Taza artesanal" --price '$15.000' --image img/taza.jpg
//!
//! # Add from the detail modal with a quantity
//! storefront cart add "Taza artesanal" --quantity 3
//!
//! # Show the cart
//! storefront cart list
//!
//! # Adjust or remove rows
//! storefront cart inc "Taza artesanal"
//! storefront cart qty "Taza artesanal" -2
//! storefront cart remove "Taza artesanal"
//!
//! # Route a rendered row button click
//! storefront cart trigger qty-minus "Taza artesanal"
//!
//! # Order summary and WhatsApp link
//! storefront cart checkout
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storefront_core::checkout::order_message;
use storefront_core::render::{format_currency, render_html, render_text};
use storefront_core::{
    CartAction, CartStore, Notification, NotificationLevel, ProductCandidate, RedbStore,
    StoreConfig,
};
use tracing::{debug, info};

/// Database file inside the data directory
const DB_FILE: &str = "storefront.redb";

/// Config file looked up in the data directory when --config is not given
const CONFIG_FILE: &str = "config.json";

/// Storefront - persisted shopping cart
#[derive(Parser)]
#[command(name = "storefront")]
#[command(version = "0.1.0")]
#[command(about = "Storefront - persisted shopping cart")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: ~/.storefront/data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON config file (default: <data-dir>/config.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show store information
    Info,

    /// Cart management
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// List the cart
    List,
    /// Add a product
    Add {
        /// Product title
        title: String,
        /// Price as displayed, e.g. "$15.000"
        #[arg(short, long)]
        price: Option<String>,
        /// Image URL or path
        #[arg(short, long)]
        image: Option<String>,
        /// Quantity, as typed in the product modal
        #[arg(short, long)]
        quantity: Option<String>,
    },
    /// Remove a product
    Remove {
        /// Product title
        title: String,
    },
    /// Increase a product's quantity by one
    Inc {
        /// Product title
        title: String,
    },
    /// Decrease a product's quantity by one (never below 1)
    Dec {
        /// Product title
        title: String,
    },
    /// Change a product's quantity by a signed amount
    Qty {
        /// Product title
        title: String,
        /// Amount to add (negative to subtract)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Show item count and total
    Totals,
    /// Render the cart panel as HTML
    Html,
    /// Show the order summary and WhatsApp checkout link
    Checkout,
    /// Dispatch a row button by trigger class (remove-btn, qty-plus, qty-minus);
    /// other classes are ignored
    Trigger {
        /// Trigger class of the clicked button
        class: String,
        /// data-title of the clicked row
        title: String,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Get the default data directory (~/.storefront/data)
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".storefront")
        .join("data")
}

/// Resolve the config: explicit file, else `<data-dir>/config.json`, else defaults.
fn load_config(explicit: Option<&Path>, data_dir: &Path) -> Result<StoreConfig> {
    if let Some(path) = explicit {
        return StoreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    let implicit = data_dir.join(CONFIG_FILE);
    if implicit.exists() {
        return StoreConfig::load(&implicit)
            .with_context(|| format!("Failed to load config {}", implicit.display()));
    }
    Ok(StoreConfig::default())
}

fn print_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => {
            println!("{} {}", notification.title, notification.text)
        }
        NotificationLevel::Warning => {
            eprintln!("WARNING: {} {}", notification.title, notification.text)
        }
    }
}

fn print_quantity(title: &str, quantity: Option<u32>) {
    match quantity {
        Some(q) => println!("{}: quantity {}", title, q),
        None => println!("Not in cart: {}", title),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let config = load_config(cli.config.as_deref(), &data_dir)?;
    let db_path = data_dir.join(DB_FILE);
    info!(data_dir = %data_dir.display(), key = %config.storage_key, "Opening cart store");
    let storage = RedbStore::new(&db_path)
        .with_context(|| format!("Failed to open store at {}", db_path.display()))?;

    let mut cart = CartStore::builder(storage)
        .config(config)
        .notifier(print_notification)
        .build();

    match cli.command {
        Commands::Info => {
            println!("Storefront Cart");
            println!("  Data directory: {}", data_dir.display());
            println!("  Database: {}", db_path.display());
            println!("  Storage key: {}", cart.config().storage_key);
            println!("  Items: {}", cart.len());
        }

        Commands::Cart { action } => match action {
            CartCommand::List => {
                println!("{}", render_text(cart.items(), cart.totals()));
            }
            CartCommand::Add {
                title,
                price,
                image,
                quantity,
            } => {
                let candidate = match quantity {
                    Some(q) => ProductCandidate::from_modal(
                        Some(&title),
                        price.as_deref(),
                        image.as_deref(),
                        &q,
                    ),
                    None => ProductCandidate::from_card(
                        Some(&title),
                        price.as_deref(),
                        image.as_deref(),
                    ),
                };
                cart.add_item(candidate);
            }
            CartCommand::Remove { title } => {
                let title = title.trim();
                if cart.remove_item(title) {
                    println!("Removed: {}", title);
                } else {
                    println!("Not in cart: {}", title);
                }
            }
            CartCommand::Inc { title } => {
                let title = title.trim();
                print_quantity(title, cart.change_quantity(title, 1));
            }
            CartCommand::Dec { title } => {
                let title = title.trim();
                print_quantity(title, cart.change_quantity(title, -1));
            }
            CartCommand::Qty { title, delta } => {
                let title = title.trim();
                print_quantity(title, cart.change_quantity(title, delta));
            }
            CartCommand::Totals => {
                let totals = cart.totals();
                println!("Items: {}", totals.total_items);
                println!("Total: {}", format_currency(totals.total_price));
            }
            CartCommand::Html => {
                let fragment = render_html(cart.items(), cart.totals());
                println!("{}", fragment.items_html);
                println!("{}", fragment.total_text);
                println!("Counter: {}", fragment.counter_text);
            }
            CartCommand::Checkout => {
                println!("{}", order_message(cart.items()));
                println!();
                println!("Link: {}", cart.checkout_url());
            }
            CartCommand::Trigger { class, title } => {
                let title = title.trim();
                match CartAction::from_trigger(&class, title) {
                    Some(action) => {
                        let existed = cart.get(title).is_some();
                        cart.dispatch(action);
                        match cart.get(title) {
                            Some(item) => print_quantity(title, Some(item.quantity)),
                            None if existed => println!("Removed: {}", title),
                            None => print_quantity(title, None),
                        }
                    }
                    // Clicks on anything but a row button fall through.
                    None => debug!(%class, %title, "Ignoring unknown trigger class"),
                }
            }
        },
    }

    if cart.persistence_degraded() {
        anyhow::bail!("Cart changes could not be saved to {}", db_path.display());
    }

    Ok(())
}
