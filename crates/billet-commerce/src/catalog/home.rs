//! Landing view data.

use serde::Serialize;

use crate::api::StorefrontApi;
use crate::catalog::{CategoryEntry, Event};

/// Number of events featured on the landing view.
pub const FEATURED_COUNT: usize = 3;

/// What the landing view shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeData {
    pub featured: Vec<Event>,
    pub categories: Vec<CategoryEntry>,
}

/// Load featured events and categories concurrently.
///
/// Each half degrades on its own: a failed call is logged and shows up as an
/// empty list.
pub async fn load_home(api: &dyn StorefrontApi) -> HomeData {
    let (events, categories) = futures::join!(api.list_events(), api.list_categories());

    let featured = match events {
        Ok(mut events) => {
            events.truncate(FEATURED_COUNT);
            events
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load featured events");
            Vec::new()
        }
    };

    let categories = categories.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load categories");
        Vec::new()
    });

    HomeData {
        featured,
        categories,
    }
}
