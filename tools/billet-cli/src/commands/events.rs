//! Catalog browsing commands.

use anyhow::{Context as _, Result};
use billet_commerce::catalog::{Event, EventFilter, ALL_CATEGORIES};
use billet_commerce::EventId;

use super::{EventsArgs, EventsCommand};
use crate::context::Context;
use crate::output::truncate;

const WIDTHS: [usize; 5] = [8, 32, 10, 12, 10];

/// Run the events command.
pub async fn run(args: EventsArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(EventsCommand::List {
        category: ALL_CATEGORIES.to_string(),
        query: None,
    }) {
        EventsCommand::List { category, query } => list(&category, query.as_deref(), ctx).await,
        EventsCommand::Show { id } => show(&id, ctx).await,
    }
}

async fn list(category: &str, query: Option<&str>, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching events...");
    let events = ctx.api().list_events().await;
    spinner.finish_and_clear();
    let events = events.context("Failed to load events")?;

    let filter = EventFilter::new()
        .with_category(category)
        .with_query(query.unwrap_or_default());
    let matching = filter.apply(&events);
    ctx.output.debug(&format!("{} of {} events match", matching.len(), events.len()));

    if ctx.output.is_json() {
        ctx.output.json(&matching);
        return Ok(());
    }

    ctx.output.header("Events");
    if matching.is_empty() {
        ctx.output.info("No events match.");
        return Ok(());
    }
    print_events(ctx, &matching);

    Ok(())
}

async fn show(id: &str, ctx: &Context) -> Result<()> {
    let event = ctx
        .api()
        .get_event(&EventId::new(id))
        .await
        .with_context(|| format!("Failed to load event {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&event);
        return Ok(());
    }

    ctx.output.header(&event.name);
    print_event_details(ctx, &event);

    Ok(())
}

/// Print events as a table of id, name, category, date and price.
pub fn print_events(ctx: &Context, events: &[&Event]) {
    ctx.output
        .table_header(&["ID", "NAME", "CATEGORY", "DATE", "PRICE"], &WIDTHS);
    for event in events {
        let id = event.key().map(|id| id.to_string()).unwrap_or_default();
        let category = event
            .category
            .as_ref()
            .map(|c| c.to_string())
            .unwrap_or_default();
        ctx.output.table_row(
            &[
                &id,
                &truncate(&event.name, WIDTHS[1]),
                &category,
                event.date.as_deref().unwrap_or(""),
                &event.unit_price().display(),
            ],
            &WIDTHS,
        );
    }
}

/// Print every field of one event.
pub fn print_event_details(ctx: &Context, event: &Event) {
    if let Some(id) = event.key() {
        ctx.output.kv("id", id.as_str());
    }
    if let Some(category) = &event.category {
        ctx.output.kv("category", category.as_str());
    }
    if let Some(date) = &event.date {
        ctx.output.kv("date", date);
    }
    ctx.output.kv("price", &event.unit_price().display());
    if let Some(image) = &event.image {
        ctx.output.kv("image", image);
    }
    if !event.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&event.description);
    }
}
