//! Event list filtering.

use crate::catalog::{Event, EventCategory};

/// Label that selects every category.
pub const ALL_CATEGORIES: &str = "All";

/// Category and name filter for the events view.
///
/// Both criteria must match. An unset criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub query: Option<String>,
}

impl EventFilter {
    /// A filter that matches every event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category label. `"All"` clears the restriction.
    pub fn with_category(mut self, label: &str) -> Self {
        self.category = if label == ALL_CATEGORIES || label.is_empty() {
            None
        } else {
            Some(EventCategory::from(label))
        };
        self
    }

    /// Restrict to event names containing `query`, ignoring case.
    /// A blank query clears the restriction.
    pub fn with_query(mut self, query: &str) -> Self {
        let query = query.trim();
        self.query = if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        self
    }

    /// Check whether an event passes the filter.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(category) = &self.category {
            if event.category.as_ref() != Some(category) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !event.name.to_lowercase().contains(query.as_str()) {
                return false;
            }
        }
        true
    }

    /// Keep the matching events, preserving order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}
