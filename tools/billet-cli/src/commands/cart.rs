//! Cart commands.

use anyhow::{Context as _, Result};
use billet_commerce::cart::{self, CartStore};
use billet_commerce::EventId;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

const WIDTHS: [usize; 5] = [8, 32, 10, 5, 10];

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => {
            let spinner = ctx.output.spinner("Fetching event...");
            let event = ctx.api().get_event(&EventId::new(&id)).await;
            spinner.finish_and_clear();
            let event = event.with_context(|| format!("Failed to load event {}", id))?;

            let name = event.name.clone();
            store.add_item(event);
            ctx.output.success(&format!("Added a ticket for {}", name));
        }
        CartCommand::Remove { id } => {
            let id = EventId::new(id);
            if store.line(&id).is_none() {
                ctx.output.warn(&format!("Event {} is not in the cart", id));
                return Ok(());
            }
            store.remove_item(&id);
            ctx.output.success(&format!("Removed event {}", id));
        }
        CartCommand::Set { id, quantity } => {
            let id = EventId::new(id);
            if store.line(&id).is_none() {
                ctx.output.warn(&format!("Event {} is not in the cart", id));
                return Ok(());
            }
            store.set_quantity(&id, quantity);
            if quantity <= 0 {
                ctx.output.success(&format!("Removed event {}", id));
            } else {
                ctx.output.success(&format!("Quantity for {} set to {}", id, quantity));
            }
        }
        CartCommand::Clear => {
            store.clear();
            ctx.output.success("Cart cleared");
        }
    }

    print_cart(ctx, &store);
    Ok(())
}

/// Print the cart lines followed by ticket count and total.
pub fn print_cart(ctx: &Context, store: &CartStore) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart::items(store),
            "count": cart::count(store),
            "total": cart::total(store).to_decimal(),
        }));
        return;
    }

    ctx.output.header("Cart");
    if store.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    ctx.output
        .table_header(&["ID", "EVENT", "UNIT", "QTY", "SUBTOTAL"], &WIDTHS);
    for line in cart::items(store) {
        let id = line.key().map(|id| id.to_string()).unwrap_or_default();
        ctx.output.table_row(
            &[
                &id,
                &truncate(&line.event.name, WIDTHS[1]),
                &line.event.unit_price().display(),
                &line.quantity.to_string(),
                &line.subtotal().display(),
            ],
            &WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("tickets", &cart::count(store).to_string());
    ctx.output.kv("total", &cart::total(store).display());
}
