//! Cart line items.

use crate::catalog::Event;
use crate::ids::EventId;
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};

/// One catalog item plus its quantity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub event: Event,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: i64,
}

impl CartLine {
    /// A fresh line for `event` with quantity 1.
    pub fn new(event: Event) -> Self {
        Self { event, quantity: 1 }
    }

    /// The event identity this line is keyed by, if any.
    pub fn key(&self) -> Option<&EventId> {
        self.event.key()
    }

    /// Whether this line holds the event `id`.
    pub fn is_for(&self, id: &EventId) -> bool {
        self.key() == Some(id)
    }

    /// Price × quantity. A missing price counts as zero.
    pub fn subtotal(&self) -> Money {
        self.event.unit_price().multiply(self.quantity)
    }
}

/// Stored quantities may be null or fractional; anything unusable counts as 0.
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let mut line = CartLine::new(Event::new("e1", "Concert", 10.0));
        line.quantity = 3;
        assert_eq!(line.subtotal().amount_cents, 3000);
    }

    #[test]
    fn test_missing_quantity_is_zero() {
        let line: CartLine = serde_json::from_str(r#"{"event": {"id": "e1"}}"#).unwrap();
        assert_eq!(line.quantity, 0);

        let line: CartLine =
            serde_json::from_str(r#"{"event": {"id": "e1"}, "quantity": null}"#).unwrap();
        assert_eq!(line.quantity, 0);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(CartLine::new(Event::new("e1", "X", 10.0))).unwrap();
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["event"]["id"], "e1");
        assert_eq!(json["event"]["price"], 10.0);
    }
}
