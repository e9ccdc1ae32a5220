//! Checkout command.

use anyhow::{Context as _, Result};
use billet_commerce::checkout::{CustomerDetails, View};
use dialoguer::Input;
use serde_json::json;

use super::cart::print_cart;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart();
    let mut checkout = ctx.checkout();

    if checkout.entry_redirect(&store).is_some() {
        ctx.output.warn("Your cart is empty, add tickets before checking out");
        print_cart(ctx, &store);
        return Ok(());
    }

    print_cart(ctx, &store);

    let details = CustomerDetails::new(
        field(args.name, "Full name", ctx)?,
        field(args.email, "Email", ctx)?,
        field(args.phone, "Phone", ctx)?,
    );

    let spinner = ctx.output.spinner("Placing your order...");
    let receipt = checkout.submit(&details, &mut store).await;
    spinner.finish_and_clear();
    let receipt = receipt.context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "orderId": receipt.order_id,
            "reference": receipt.reference,
            "email": receipt.email,
            "order": receipt.order,
            "notices": receipt.notices,
        }));
        return Ok(());
    }

    for notice in &receipt.notices {
        ctx.output.notice(notice);
    }
    ctx.output.kv("order", receipt.order_id.as_str());
    ctx.output.kv("reference", &receipt.reference);
    ctx.output.kv("tickets", &receipt.order.ticket_count().to_string());
    ctx.output.kv("total", &receipt.order.total().display());
    ctx.output
        .info(&format!("A confirmation will be sent to {}", receipt.email));

    if args.no_wait {
        return Ok(());
    }

    let spinner = ctx.output.spinner("Returning to the storefront...");
    tokio::time::sleep(receipt.redirect.after).await;
    spinner.finish_and_clear();

    match receipt.redirect.view {
        View::Home => super::home::run(ctx).await,
        View::Cart => {
            print_cart(ctx, &store);
            Ok(())
        }
    }
}

/// Use the flag value, or ask for it on an interactive run.
fn field(value: Option<String>, prompt: &str, ctx: &Context) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if ctx.output.is_json() {
        return Ok(String::new());
    }
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}
