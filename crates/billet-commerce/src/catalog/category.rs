//! Category listing entries.

use crate::catalog::EventCategory;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A record from the `categories` resource, used to build the landing view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    #[serde(default)]
    pub name: String,
}

impl CategoryEntry {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }

    /// The event category this entry links to.
    pub fn category(&self) -> EventCategory {
        EventCategory::from(self.name.as_str())
    }
}
