//! Event (catalog item) types.

use crate::error::ValidationError;
use crate::ids::EventId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Category an event is filed under.
///
/// Labels outside the known set are kept verbatim so that records written
/// by other clients survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Musique,
    Art,
    Spectacle,
    Football,
    Other(String),
}

impl EventCategory {
    /// The categories offered by the storefront, in display order.
    pub const KNOWN: [EventCategory; 4] = [
        EventCategory::Musique,
        EventCategory::Art,
        EventCategory::Spectacle,
        EventCategory::Football,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::Musique => "Musique",
            EventCategory::Art => "Art",
            EventCategory::Spectacle => "Spectacle",
            EventCategory::Football => "Football",
            EventCategory::Other(label) => label,
        }
    }
}

impl From<String> for EventCategory {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Musique" => EventCategory::Musique,
            "Art" => EventCategory::Art,
            "Spectacle" => EventCategory::Spectacle,
            "Football" => EventCategory::Football,
            _ => EventCategory::Other(label),
        }
    }
}

impl From<&str> for EventCategory {
    fn from(label: &str) -> Self {
        EventCategory::from(label.to_string())
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticketed event as served by the catalog.
///
/// Every field is optional on the wire: cart snapshots written by older
/// clients may be missing any of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    /// Identifier under the legacy `_id` key.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<EventId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Event {
    /// Create an identified event.
    pub fn new(id: impl Into<EventId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            price: Some(price),
            ..Default::default()
        }
    }

    /// The identity used by the cart: `id`, else `_id`. Empty ids do not count.
    pub fn key(&self) -> Option<&EventId> {
        self.id
            .as_ref()
            .filter(|id| !id.as_str().is_empty())
            .or_else(|| self.legacy_id.as_ref().filter(|id| !id.as_str().is_empty()))
    }

    /// Unit price, with a missing price counting as zero.
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price.unwrap_or(0.0), Currency::EUR)
    }
}

/// Accept prices written as numbers or numeric strings; anything else is "no price".
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Admin form payload for creating or replacing an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub category: EventCategory,
    pub image: String,
    pub price: f64,
    pub date: String,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: EventCategory::Musique,
            image: String::new(),
            price: 0.0,
            date: String::new(),
        }
    }
}

impl EventDraft {
    /// Prefill a draft from an existing event, for editing.
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            description: event.description.clone(),
            category: event.category.clone().unwrap_or(EventCategory::Musique),
            image: event.image.clone().unwrap_or_default(),
            price: event.price.unwrap_or(0.0),
            date: event.date.clone().unwrap_or_default(),
        }
    }

    /// Check the draft before it is sent anywhere.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingEventName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}
