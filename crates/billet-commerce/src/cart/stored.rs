//! Storage format of the cart.
//!
//! The cart lives under the `cart` key as `{ "items": [...] }`. Older
//! clients stored bare event objects instead of `{ event, quantity }`
//! lines; those are recognised once, when the cart is loaded.

use crate::cart::CartLine;
use crate::catalog::Event;
use serde::Serialize;
use serde_json::Value;

/// Storage key holding the cart document.
pub const CART_KEY: &str = "cart";

/// The document written to storage after every cart change.
#[derive(Debug, Serialize)]
pub struct StoredCart<'a> {
    pub items: &'a [CartLine],
}

/// Decoded stored line list.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredLines {
    /// Current shape: `{ event, quantity }` lines.
    Wrapped(Vec<CartLine>),
    /// Bare events, each counting as one ticket.
    Legacy(Vec<Event>),
}

impl StoredLines {
    /// Decode a stored cart document.
    ///
    /// A missing `items` list is an empty cart. The shape is decided by the
    /// first element alone: no `event` key plus a usable `id` or `_id` means
    /// the whole list is legacy. Elements that are not objects are dropped.
    pub fn decode(document: &Value) -> Result<Self, serde_json::Error> {
        let items = match document.get("items") {
            None | Some(Value::Null) => return Ok(StoredLines::Wrapped(Vec::new())),
            Some(items) => items,
        };
        let items: Vec<Value> = serde_json::from_value(items.clone())?;

        let legacy = items.first().is_some_and(|first| {
            first.get("event").is_none() && (truthy(first.get("id")) || truthy(first.get("_id")))
        });

        let mut dropped = 0usize;
        let decoded = if legacy {
            StoredLines::Legacy(decode_each(items, &mut dropped))
        } else {
            StoredLines::Wrapped(decode_each(items, &mut dropped))
        };
        if dropped > 0 {
            tracing::warn!(dropped, "dropped malformed stored cart entries");
        }
        Ok(decoded)
    }

    /// Normalize into cart lines.
    pub fn into_lines(self) -> Vec<CartLine> {
        match self {
            StoredLines::Wrapped(lines) => lines,
            StoredLines::Legacy(events) => events.into_iter().map(CartLine::new).collect(),
        }
    }
}

fn decode_each<T: serde::de::DeserializeOwned>(items: Vec<Value>, dropped: &mut usize) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                *dropped += 1;
                None
            }
        })
        .collect()
}

/// Whether a JSON value would count as a present identifier.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::EventId;
    use serde_json::json;

    #[test]
    fn test_wrapped_lines() {
        let doc = json!({ "items": [{ "event": { "id": "e1", "price": 10 }, "quantity": 2 }] });
        let lines = StoredLines::decode(&doc).unwrap();
        assert!(matches!(lines, StoredLines::Wrapped(_)));
        let lines = lines.into_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_legacy_bare_events() {
        let doc = json!({ "items": [{ "id": "e1", "name": "X", "price": 10 }] });
        let lines = StoredLines::decode(&doc).unwrap();
        assert!(matches!(lines, StoredLines::Legacy(_)));

        let lines = lines.into_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].key(), Some(&EventId::new("e1")));
        assert_eq!(lines[0].event.name, "X");
        assert_eq!(lines[0].event.price, Some(10.0));
    }

    #[test]
    fn test_legacy_underscore_id() {
        let doc = json!({ "items": [{ "_id": "abc", "name": "Y" }, { "_id": "def" }] });
        let lines = StoredLines::decode(&doc).unwrap().into_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn test_first_element_decides_shape() {
        // First element carries no id, so the list is read as wrapped lines.
        let doc = json!({ "items": [{ "name": "nameless" }, { "id": "e2", "name": "Z" }] });
        assert!(matches!(
            StoredLines::decode(&doc).unwrap(),
            StoredLines::Wrapped(_)
        ));
    }

    #[test]
    fn test_missing_items_is_empty() {
        let lines = StoredLines::decode(&json!({})).unwrap();
        assert_eq!(lines, StoredLines::Wrapped(Vec::new()));
    }

    #[test]
    fn test_items_not_a_list_is_an_error() {
        assert!(StoredLines::decode(&json!({ "items": "oops" })).is_err());
    }

    #[test]
    fn test_non_object_entries_are_dropped() {
        let doc = json!({ "items": [{ "event": { "id": "e1" }, "quantity": 1 }, 42] });
        let lines = StoredLines::decode(&doc).unwrap().into_lines();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_stored_cart_shape() {
        let lines = vec![CartLine::new(Event::new("e1", "X", 10.0))];
        let json = serde_json::to_value(StoredCart { items: &lines }).unwrap();
        assert_eq!(json["items"][0]["quantity"], 1);
    }
}
