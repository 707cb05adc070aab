//! Woodora CLI - Quotes and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Price a custom piece
//! woodora quote -c chair -m oak -f natural --width 24 --height 36 --depth 24
//!
//! # List active listings
//! woodora listings list --category table
//!
//! # Seed the demo catalog
//! woodora listings seed
//!
//! # Delete a listing
//! woodora listings delete FURN-001
//! ```
//!
//! # Commands
//!
//! - `quote` - Price a customization against the price list
//! - `listings list` - Show listings in the catalog file
//! - `listings seed` - Add the demo listings
//! - `listings delete` - Remove a listing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "woodora")]
#[command(author, version, about = "Woodora CLI tools")]
struct Cli {
    /// Data directory (defaults to `WOODORA_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a custom piece
    Quote(QuoteArgs),
    /// Manage the ready-made catalog
    Listings {
        #[command(subcommand)]
        action: ListingsAction,
    },
}

#[derive(Args)]
struct QuoteArgs {
    /// Category (sofa, chair, table, bed, dresser, bookshelf)
    #[arg(short, long)]
    category: String,

    /// Wood type (oak, pine, mahogany, teak, walnut, maple)
    #[arg(short, long)]
    material: String,

    /// Finish (natural, stained, painted, lacquered)
    #[arg(short, long, default_value = "natural")]
    finish: String,

    /// Color, display only
    #[arg(long, default_value = "")]
    color: String,

    /// Width in inches
    #[arg(long, default_value = "72")]
    width: rust_decimal::Decimal,

    /// Height in inches
    #[arg(long, default_value = "36")]
    height: rust_decimal::Decimal,

    /// Depth in inches
    #[arg(long, default_value = "30")]
    depth: rust_decimal::Decimal,

    /// Number of pieces
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Print the breakdown as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ListingsAction {
    /// List listings
    List {
        /// Case-insensitive search over name, category and material
        #[arg(short, long)]
        search: Option<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only this material
        #[arg(short, long)]
        material: Option<String>,

        /// Every listing regardless of status, unfiltered
        #[arg(long, conflicts_with_all = ["search", "category", "material"])]
        all: bool,
    },
    /// Add the demo listings
    Seed {
        /// Seed even if the catalog already has listings
        #[arg(long)]
        force: bool,
    },
    /// Delete a listing
    Delete {
        /// Listing ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = commands::load_config(cli.data_dir)?;

    match cli.command {
        Commands::Quote(args) => {
            let spec = woodora_core::FurnitureSpec {
                category: args.category,
                material: args.material,
                dimensions: woodora_core::Dimensions {
                    width: args.width,
                    height: args.height,
                    depth: args.depth,
                },
                finish: args.finish,
                color: args.color,
                quantity: args.quantity,
            };
            let output = commands::quote::run(&spec, &config.pricing, args.json)?;
            println!("{output}");
        }
        Commands::Listings { action } => {
            let repo = woodora_storefront::db::ListingRepository::new(&config.data_dir);
            match action {
                ListingsAction::List {
                    search,
                    category,
                    material,
                    all,
                } => {
                    let filter = woodora_core::ListingFilter {
                        search,
                        category,
                        material,
                    };
                    let output = commands::listings::list(&repo, &filter, all).await?;
                    println!("{output}");
                }
                ListingsAction::Seed { force } => {
                    commands::listings::seed(&repo, force).await?;
                }
                ListingsAction::Delete { id } => {
                    commands::listings::delete(&repo, &id).await?;
                }
            }
        }
    }
    Ok(())
}
