//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod events;
pub mod home;

use clap::{Args, Subcommand};

/// Arguments for the events command.
#[derive(Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: Option<EventsCommand>,
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List events, optionally filtered.
    List {
        /// Category label, or "All".
        #[arg(long, default_value = "All")]
        category: String,

        /// Part of the event name, any case.
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one event.
    Show {
        /// Event id.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines, ticket count and total.
    Show,
    /// Add one ticket for an event.
    Add {
        /// Event id.
        id: String,
    },
    /// Remove an event from the cart.
    Remove {
        /// Event id.
        id: String,
    },
    /// Set the ticket quantity for an event. Zero or less removes it.
    Set {
        /// Event id.
        id: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Full name. Prompted for when missing.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address. Prompted for when missing.
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number. Prompted for when missing.
    #[arg(long)]
    pub phone: Option<String>,

    /// Skip the redirect delay after a successful order.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Open an admin session.
    Login {
        /// Admin username. Prompted for when missing.
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Close the admin session.
    Logout,
    /// Show whether an admin session is open.
    Status,
    /// Show event, order and revenue totals.
    Dashboard,
    /// List orders.
    Orders,
    /// Manage events.
    Events {
        #[command(subcommand)]
        command: AdminEventsCommand,
    },
    /// Hash a password for the `[admin]` config section.
    HashPassword,
}

#[derive(Subcommand)]
pub enum AdminEventsCommand {
    /// List events with their ids.
    List,
    /// Create an event.
    Create(EventFields),
    /// Replace an event. Missing fields keep their current value.
    Update {
        /// Event id.
        id: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event.
    Delete {
        /// Event id.
        id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Event form fields.
#[derive(Args, Default)]
pub struct EventFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Musique, Art, Spectacle or Football.
    #[arg(long)]
    pub category: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a config template in the working directory.
    Init {
        /// File to write. A `.json` name writes the defaults as JSON.
        #[arg(short, long, default_value = "billet.toml")]
        output: String,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}
