//! Remote API facade for the Billetterie storefront.
//!
//! [`MockApiClient`] implements [`StorefrontApi`](billet_commerce::StorefrontApi)
//! over the hosted REST API and [`WebhookNotifier`] implements
//! [`ConfirmationNotifier`](billet_commerce::ConfirmationNotifier) over the
//! confirmation webhook. Both use [`billet_data::FetchClient`], so tests can
//! swap the wire for a scripted transport.

mod client;
mod notifier;

pub use client::MockApiClient;
pub use notifier::WebhookNotifier;

/// API the storefront talks to unless configured otherwise.
pub const DEFAULT_API_URL: &str = "https://69524f4e3b3c518fca123101.mockapi.io";

/// Webhook that turns order confirmations into customer emails.
pub const DEFAULT_WEBHOOK_URL: &str = "https://taha123codexx.app.n8n.cloud/webhook-test/confirm";
