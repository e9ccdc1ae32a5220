//! Event management.

use crate::api::StorefrontApi;
use crate::catalog::{Event, EventDraft};
use crate::ids::EventId;
use crate::CommerceError;

/// Create a new event, or replace `existing` with the draft.
///
/// The draft is validated before any remote call.
pub async fn save_event(
    api: &dyn StorefrontApi,
    existing: Option<&EventId>,
    draft: &EventDraft,
) -> Result<Event, CommerceError> {
    draft.validate()?;
    let saved = match existing {
        Some(id) => api.update_event(id, draft).await?,
        None => api.create_event(draft).await?,
    };
    tracing::info!(id = ?saved.key(), name = %saved.name, "event saved");
    Ok(saved)
}

/// Delete an event.
pub async fn remove_event(api: &dyn StorefrontApi, id: &EventId) -> Result<(), CommerceError> {
    api.delete_event(id).await?;
    tracing::info!(%id, "event deleted");
    Ok(())
}
