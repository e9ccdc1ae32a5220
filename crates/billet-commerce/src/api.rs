//! Remote collaborators of the storefront.
//!
//! The REST API and the confirmation webhook are reached only through these
//! traits. Implementations report failures as [`CommerceError::Remote`] and
//! never retry.

use async_trait::async_trait;

use crate::catalog::{CategoryEntry, Event, EventDraft};
use crate::checkout::{ConfirmationPayload, OrderRecord, OrderRequest, StatsSnapshot};
use crate::ids::{EventId, OrderId};
use crate::CommerceError;

/// Typed access to the storefront REST API.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait StorefrontApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, CommerceError>;

    async fn get_event(&self, id: &EventId) -> Result<Event, CommerceError>;

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, CommerceError>;

    async fn update_event(&self, id: &EventId, draft: &EventDraft)
        -> Result<Event, CommerceError>;

    async fn delete_event(&self, id: &EventId) -> Result<(), CommerceError>;

    async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CommerceError>;

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, CommerceError>;

    /// Store a new order and return the id the API gave it.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderId, CommerceError>;

    /// The current stats record, if the API has one.
    async fn get_stats(&self) -> Result<Option<StatsSnapshot>, CommerceError>;

    /// Overwrite the stats record with `stats`.
    async fn update_stats(&self, stats: &StatsSnapshot) -> Result<StatsSnapshot, CommerceError>;
}

/// Sends the order confirmation that ends up in the customer's inbox.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ConfirmationNotifier: Send + Sync {
    async fn notify_order_confirmation(
        &self,
        payload: &ConfirmationPayload,
    ) -> Result<(), CommerceError>;
}
