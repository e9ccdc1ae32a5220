//! Landing view.

use anyhow::Result;
use billet_commerce::cart;
use billet_commerce::catalog::load_home;

use super::events::print_events;
use crate::context::Context;

/// Run the home command.
pub async fn run(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading storefront...");
    let home = load_home(ctx.api()).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&home);
        return Ok(());
    }

    ctx.output.header("Featured events");
    if home.featured.is_empty() {
        ctx.output.info("No events to show right now.");
    } else {
        let featured: Vec<_> = home.featured.iter().collect();
        print_events(ctx, &featured);
    }

    ctx.output.header("Categories");
    if home.categories.is_empty() {
        ctx.output.info("No categories.");
    }
    for entry in &home.categories {
        ctx.output.list_item(&entry.name);
    }

    let cart = ctx.cart();
    ctx.output.info("");
    ctx.output.kv("cart", &format!("{} ticket(s)", cart::count(&cart)));

    Ok(())
}
