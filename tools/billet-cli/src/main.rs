//! Billet CLI - ticket storefront and back-office in the terminal.
//!
//! Commands:
//! - `billet home` - Featured events and categories
//! - `billet events` - Browse and filter the catalog
//! - `billet cart` - Show and edit the cart
//! - `billet checkout` - Place an order for the cart
//! - `billet admin` - Back-office: session, dashboard, orders, events
//! - `billet config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use billet_observability::{init_logging, LogFormat, LogLevel};
use clap::{Parser, Subcommand};

use commands::{AdminArgs, CartArgs, CheckoutArgs, ConfigArgs, EventsArgs};

/// Billet CLI - Buy event tickets and manage the catalog
#[derive(Parser)]
#[command(name = "billet")]
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
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show featured events and categories
    Home,

    /// Browse the event catalog
    Events(EventsArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Back-office commands
    Admin(AdminArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.json {
        logging.format = LogFormat::Json;
    }
    if cli.verbose {
        logging.level = logging.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_logging(&logging) {
        ctx.output.debug(&format!("Logging disabled: {}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Home => commands::home::run(&ctx).await,
        Commands::Events(args) => commands::events::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
