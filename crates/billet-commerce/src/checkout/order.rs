//! Order and confirmation payloads.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::checkout::CustomerDetails;
use crate::ids::{EventId, OrderId};
use crate::money::{Currency, Money};

/// One ordered event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    pub event_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// The order sent to the `orders` resource.
///
/// Built once from the cart at submission and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderRequest {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub order_date: String,
}

impl OrderRequest {
    /// Snapshot the cart into an order.
    pub fn from_cart(
        details: &CustomerDetails,
        lines: &[CartLine],
        total: Money,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let items = lines
            .iter()
            .map(|line| OrderItem {
                event_id: line.key().cloned(),
                event_name: line.event.name.clone(),
                quantity: line.quantity,
                price: line.event.price.unwrap_or(0.0),
            })
            .collect();

        Self {
            customer_name: details.full_name.clone(),
            email: details.email.clone(),
            phone: details.phone.clone(),
            items,
            total_price: total.to_decimal(),
            order_date: format_timestamp(placed_at),
        }
    }

    /// Number of tickets in the order.
    pub fn ticket_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// The order total.
    pub fn total(&self) -> Money {
        Money::from_decimal(self.total_price, Currency::EUR)
    }
}

/// An order as stored by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(flatten)]
    pub order: OrderRequest,
}

/// One line of the confirmation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationItem {
    pub event_name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Body of the order confirmation webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationPayload {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub items: Vec<ConfirmationItem>,
    pub total_price: f64,
    /// Customer-facing reference: the submission time in milliseconds, base 36.
    pub order_id: String,
    pub order_date: String,
}

impl ConfirmationPayload {
    pub fn for_order(order: &OrderRequest, placed_at: DateTime<Utc>) -> Self {
        Self {
            email: order.email.clone(),
            name: order.customer_name.clone(),
            phone: order.phone.clone(),
            items: order
                .items
                .iter()
                .map(|item| ConfirmationItem {
                    event_name: item.event_name.clone(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            total_price: order.total_price,
            order_id: confirmation_reference(placed_at),
            order_date: order.order_date.clone(),
        }
    }
}

/// `2024-05-01T18:30:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Milliseconds since the epoch, in base 36.
pub fn confirmation_reference(at: DateTime<Utc>) -> String {
    to_base36(at.timestamp_millis().max(0) as u64)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Event;
    use chrono::TimeZone;

    fn placed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap()
    }

    fn lines() -> Vec<CartLine> {
        let mut concert = CartLine::new(Event::new("e1", "Concert", 10.0));
        concert.quantity = 2;
        vec![concert, CartLine::new(Event::new("e2", "Expo", 5.5))]
    }

    fn order() -> OrderRequest {
        let details = CustomerDetails::new("Jean Dupont", "jean@example.com", "0612345678");
        OrderRequest::from_cart(&details, &lines(), Money::new(2550, Currency::EUR), placed_at())
    }

    #[test]
    fn test_order_wire_shape() {
        let json = serde_json::to_value(order()).unwrap();
        assert_eq!(json["customerName"], "Jean Dupont");
        assert_eq!(json["totalPrice"], 25.5);
        assert_eq!(json["orderDate"], "2024-05-01T18:30:00.000Z");
        assert_eq!(json["items"][0]["eventId"], "e1");
        assert_eq!(json["items"][0]["eventName"], "Concert");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][1]["price"], 5.5);
    }

    #[test]
    fn test_ticket_count() {
        assert_eq!(order().ticket_count(), 3);

        let mut huge = order();
        huge.items[0].quantity = i64::MAX;
        assert_eq!(huge.ticket_count(), i64::MAX);
    }

    #[test]
    fn test_order_record_flattens() {
        let record: OrderRecord = serde_json::from_value(serde_json::json!({
            "id": "12",
            "customerName": "Ana",
            "totalPrice": 40,
            "items": []
        }))
        .unwrap();
        assert_eq!(record.id, Some(OrderId::new("12")));
        assert_eq!(record.order.customer_name, "Ana");
        assert_eq!(record.order.total().amount_cents, 4000);
        assert_eq!(record.order.email, "");
    }

    #[test]
    fn test_confirmation_payload() {
        let payload = ConfirmationPayload::for_order(&order(), placed_at());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "Jean Dupont");
        assert_eq!(json["email"], "jean@example.com");
        assert_eq!(json["items"][0]["eventName"], "Concert");
        assert!(json["items"][0].get("eventId").is_none());
        assert_eq!(json["orderId"], to_base36(1_714_588_200_000));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_714_588_200_000), "lvo5jm80");
    }
}
