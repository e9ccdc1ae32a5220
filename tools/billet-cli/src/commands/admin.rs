//! Back-office commands.

use anyhow::{bail, Context as _, Result};
use billet_auth::PasswordHasher;
use billet_commerce::admin::{load_dashboard, remove_event, save_event};
use billet_commerce::catalog::{EventCategory, EventDraft};
use billet_commerce::EventId;
use dialoguer::{Confirm, Input, Password};

use super::events::{print_event_details, print_events};
use super::{AdminArgs, AdminCommand, AdminEventsCommand, EventFields};
use crate::context::Context;
use crate::output::{format_timestamp, status_badge, truncate};

const ORDER_WIDTHS: [usize; 6] = [6, 20, 28, 7, 10, 24];

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Login { username } => login(username, ctx),
        AdminCommand::Logout => logout(ctx),
        AdminCommand::Status => status(ctx),
        AdminCommand::HashPassword => hash_password(ctx),
        AdminCommand::Dashboard => {
            require_session(ctx)?;
            dashboard(ctx).await
        }
        AdminCommand::Orders => {
            require_session(ctx)?;
            orders(ctx).await
        }
        AdminCommand::Events { command } => {
            require_session(ctx)?;
            match command {
                AdminEventsCommand::List => list_events(ctx).await,
                AdminEventsCommand::Create(fields) => create_event(fields, ctx).await,
                AdminEventsCommand::Update { id, fields } => update_event(&id, fields, ctx).await,
                AdminEventsCommand::Delete { id, yes } => delete_event(&id, yes, ctx).await,
            }
        }
    }
}

fn require_session(ctx: &Context) -> Result<()> {
    if !ctx.admin_session().is_authenticated() {
        bail!("Admin login required. Run `billet admin login` first.");
    }
    Ok(())
}

fn login(username: Option<String>, ctx: &Context) -> Result<()> {
    let credentials = ctx.credentials();
    if !credentials.is_configured() {
        ctx.output
            .warn("No admin password hash configured. Set [admin] password_hash in billet.toml.");
    }

    let username = match username {
        Some(username) => username,
        None => Input::<String>::new()
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    ctx.admin_session()
        .login(&credentials, username.trim(), &password)
        .context("Login failed")?;

    ctx.output.success("Logged in");
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.admin_session().logout().context("Logout failed")?;
    ctx.output.success("Logged out");
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let authenticated = ctx.admin_session().is_authenticated();

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "authenticated": authenticated }));
        return Ok(());
    }

    let state = if authenticated { "logged in" } else { "logged out" };
    ctx.output.kv("session", &status_badge(state));
    ctx.output.kv("username", ctx.credentials().username());
    Ok(())
}

fn hash_password(ctx: &Context) -> Result<()> {
    let password = Password::new()
        .with_prompt("New admin password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let hash = PasswordHasher::new().hash(&password)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "password_hash": hash }));
        return Ok(());
    }

    ctx.output.info("Add this to the [admin] section of billet.toml:");
    println!("password_hash = \"{}\"", hash);
    Ok(())
}

async fn dashboard(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading dashboard...");
    let summary = load_dashboard(ctx.api()).await;
    spinner.finish_and_clear();
    let summary = summary.context("Failed to load dashboard")?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Dashboard");
    ctx.output.kv("events", &summary.total_events.to_string());
    ctx.output.kv("orders", &summary.total_orders.to_string());
    ctx.output.kv("revenue", &summary.total_revenue.display());
    Ok(())
}

async fn orders(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching orders...");
    let orders = ctx.api().list_orders().await;
    spinner.finish_and_clear();
    let orders = orders.context("Failed to load orders")?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return Ok(());
    }

    ctx.output.table_header(
        &["ID", "CUSTOMER", "EMAIL", "TICKETS", "TOTAL", "DATE"],
        &ORDER_WIDTHS,
    );
    for record in &orders {
        let id = record.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let order = &record.order;
        ctx.output.table_row(
            &[
                &id,
                &truncate(&order.customer_name, ORDER_WIDTHS[1]),
                &truncate(&order.email, ORDER_WIDTHS[2]),
                &order.ticket_count().to_string(),
                &order.total().display(),
                &format_timestamp(&order.order_date),
            ],
            &ORDER_WIDTHS,
        );
    }
    Ok(())
}

async fn list_events(ctx: &Context) -> Result<()> {
    let events = ctx.api().list_events().await.context("Failed to load events")?;

    if ctx.output.is_json() {
        ctx.output.json(&events);
        return Ok(());
    }

    ctx.output.header("Events");
    let all: Vec<_> = events.iter().collect();
    print_events(ctx, &all);
    Ok(())
}

async fn create_event(fields: EventFields, ctx: &Context) -> Result<()> {
    let draft = apply_fields(EventDraft::default(), fields);
    let event = save_event(ctx.api(), None, &draft)
        .await
        .context("Failed to create event")?;

    if ctx.output.is_json() {
        ctx.output.json(&event);
        return Ok(());
    }
    ctx.output.success(&format!("Created {}", event.name));
    print_event_details(ctx, &event);
    Ok(())
}

async fn update_event(id: &str, fields: EventFields, ctx: &Context) -> Result<()> {
    let id = EventId::new(id);
    let current = ctx
        .api()
        .get_event(&id)
        .await
        .with_context(|| format!("Failed to load event {}", id))?;

    let draft = apply_fields(EventDraft::from_event(&current), fields);
    let event = save_event(ctx.api(), Some(&id), &draft)
        .await
        .with_context(|| format!("Failed to update event {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&event);
        return Ok(());
    }
    ctx.output.success(&format!("Updated {}", event.name));
    print_event_details(ctx, &event);
    Ok(())
}

async fn delete_event(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let id = EventId::new(id);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete event {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Deletion cancelled");
            return Ok(());
        }
    }

    remove_event(ctx.api(), &id)
        .await
        .with_context(|| format!("Failed to delete event {}", id))?;

    ctx.output.success(&format!("Deleted event {}", id));
    Ok(())
}

/// Overlay the fields given on the command line onto `draft`.
fn apply_fields(mut draft: EventDraft, fields: EventFields) -> EventDraft {
    if let Some(name) = fields.name {
        draft.name = name;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(category) = fields.category {
        draft.category = EventCategory::from(category);
    }
    if let Some(image) = fields.image {
        draft.image = image;
    }
    if let Some(price) = fields.price {
        draft.price = price;
    }
    if let Some(date) = fields.date {
        draft.date = date;
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_commerce::catalog::Event;

    #[test]
    fn test_apply_fields_keeps_unset_values() {
        let mut event = Event::new("e1", "Expo", 12.0);
        event.category = Some(EventCategory::Art);
        event.date = Some("2024-06-01".to_string());

        let draft = apply_fields(
            EventDraft::from_event(&event),
            EventFields {
                price: Some(15.0),
                ..Default::default()
            },
        );

        assert_eq!(draft.name, "Expo");
        assert_eq!(draft.category, EventCategory::Art);
        assert_eq!(draft.date, "2024-06-01");
        assert_eq!(draft.price, 15.0);
    }

    #[test]
    fn test_apply_fields_on_new_draft() {
        let draft = apply_fields(
            EventDraft::default(),
            EventFields {
                name: Some("Derby".to_string()),
                category: Some("Football".to_string()),
                price: Some(30.0),
                ..Default::default()
            },
        );

        assert_eq!(draft.name, "Derby");
        assert_eq!(draft.category, EventCategory::Football);
        assert!(draft.validate().is_ok());
    }
}
