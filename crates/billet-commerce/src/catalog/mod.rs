//! Catalog types: events, categories, filtering and landing data.

mod category;
mod event;
mod filter;
mod home;

pub use category::CategoryEntry;
pub use event::{Event, EventCategory, EventDraft};
pub use filter::{EventFilter, ALL_CATEGORIES};
pub use home::{load_home, HomeData, FEATURED_COUNT};

/// Catalog item as held by the cart.
pub type CatalogItem = Event;
