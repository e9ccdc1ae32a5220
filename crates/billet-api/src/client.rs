//! REST client for the storefront resources.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use billet_commerce::catalog::{CategoryEntry, Event, EventDraft};
use billet_commerce::checkout::{OrderRecord, OrderRequest, StatsSnapshot};
use billet_commerce::{CommerceError, EventId, OrderId, StorefrontApi};
use billet_data::{FetchClient, FetchError, Response};

/// Talks to a mockapi.io-style REST backend.
///
/// Resources live at `/events`, `/categories`, `/orders` and `/stats`.
/// Bodies are JSON; no authentication is sent.
#[derive(Debug, Clone)]
pub struct MockApiClient {
    http: FetchClient,
}

impl MockApiClient {
    /// Client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new().with_base_url(base_url))
    }

    /// Wrap a preconfigured fetch client. Its base URL must point at the API.
    pub fn with_client(http: FetchClient) -> Self {
        Self { http }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, CommerceError> {
        let response = self
            .http
            .get(path)
            .header("Accept", "application/json")
            .send()
            .await;
        parse(operation, response)
    }

    async fn send_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: billet_data::ClientRequestBuilder,
        body: &B,
    ) -> Result<T, CommerceError> {
        let request = request
            .json(body)
            .map_err(|e| CommerceError::remote(operation, e))?;
        parse(operation, request.send().await)
    }
}

fn parse<T: DeserializeOwned>(
    operation: &'static str,
    response: Result<Response, FetchError>,
) -> Result<T, CommerceError> {
    response
        .and_then(Response::error_for_status)
        .and_then(|r| r.json())
        .map_err(|e| CommerceError::remote(operation, e))
}

fn event_path(id: &EventId) -> String {
    format!("/events/{}", id)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl StorefrontApi for MockApiClient {
    async fn list_events(&self) -> Result<Vec<Event>, CommerceError> {
        self.get_json("list_events", "/events").await
    }

    async fn get_event(&self, id: &EventId) -> Result<Event, CommerceError> {
        let response = self
            .http
            .get(event_path(id))
            .send()
            .await
            .map_err(|e| CommerceError::remote("get_event", e))?;
        if response.status == 404 {
            return Err(CommerceError::EventNotFound(id.to_string()));
        }
        parse("get_event", Ok(response))
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, CommerceError> {
        self.send_json("create_event", self.http.post("/events"), draft)
            .await
    }

    async fn update_event(
        &self,
        id: &EventId,
        draft: &EventDraft,
    ) -> Result<Event, CommerceError> {
        self.send_json("update_event", self.http.put(event_path(id)), draft)
            .await
    }

    async fn delete_event(&self, id: &EventId) -> Result<(), CommerceError> {
        self.http
            .delete(event_path(id))
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| CommerceError::remote("delete_event", e))?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CommerceError> {
        self.get_json("list_categories", "/categories").await
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, CommerceError> {
        self.get_json("list_orders", "/orders").await
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderId, CommerceError> {
        let created: OrderRecord = self
            .send_json("create_order", self.http.post("/orders"), order)
            .await?;
        created
            .id
            .ok_or_else(|| CommerceError::remote("create_order", "response carried no id"))
    }

    async fn get_stats(&self) -> Result<Option<StatsSnapshot>, CommerceError> {
        let records: Vec<StatsSnapshot> = self.get_json("get_stats", "/stats").await?;
        Ok(records.into_iter().next())
    }

    async fn update_stats(&self, stats: &StatsSnapshot) -> Result<StatsSnapshot, CommerceError> {
        let Some(id) = &stats.id else {
            return Err(CommerceError::remote(
                "update_stats",
                "stats record has no id",
            ));
        };
        self.send_json("update_stats", self.http.put(format!("/stats/{}", id)), stats)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_commerce::checkout::OrderItem;
    use billet_data::testing::ScriptedTransport;
    use billet_data::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn client() -> (MockApiClient, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let http =
            FetchClient::with_shared_transport(transport.clone()).with_base_url("https://api.test");
        (MockApiClient::with_client(http), transport)
    }

    #[tokio::test]
    async fn test_list_events() {
        let (api, transport) = client();
        transport.push_json(
            200,
            json!([
                { "id": "1", "name": "Jazz", "category": "Musique", "price": 20 },
                { "id": "2", "name": "Derby", "category": "Football", "price": "35" }
            ]),
        );

        let events = api.list_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].price, Some(35.0));

        let sent = transport.requests();
        assert_eq!(sent[0].method(), Method::Get);
        assert_eq!(sent[0].url(), "https://api.test/events");
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let (api, transport) = client();
        transport.push_json(404, json!("Not found"));

        let err = api.get_event(&EventId::new("9")).await.unwrap_err();
        assert!(matches!(err, CommerceError::EventNotFound(id) if id == "9"));
        assert_eq!(transport.requests()[0].url(), "https://api.test/events/9");
    }

    #[tokio::test]
    async fn test_create_order_posts_snapshot() {
        let (api, transport) = client();
        transport.push_json(201, json!({ "id": "31", "customerName": "Ana" }));

        let order = OrderRequest {
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "0600000000".to_string(),
            items: vec![OrderItem {
                event_id: Some(EventId::new("1")),
                event_name: "Jazz".to_string(),
                quantity: 2,
                price: 20.0,
            }],
            total_price: 40.0,
            order_date: "2024-05-01T18:30:00.000Z".to_string(),
        };
        let id = api.create_order(&order).await.unwrap();
        assert_eq!(id, OrderId::new("31"));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method(), Method::Post);
        assert_eq!(sent.url(), "https://api.test/orders");
        let body = sent.body_json().unwrap();
        assert_eq!(body["customerName"], "Ana");
        assert_eq!(body["items"][0]["eventId"], "1");
        assert_eq!(body["totalPrice"], 40.0);
    }

    #[tokio::test]
    async fn test_create_order_server_error() {
        let (api, transport) = client();
        transport.push_response(Response::with_body(500, "down"));

        let err = api.create_order(&OrderRequest::default()).await.unwrap_err();
        assert!(matches!(
            err,
            CommerceError::Remote {
                operation: "create_order",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_remote_error() {
        let (api, transport) = client();
        transport.push_failure("connection refused");

        let err = api.list_orders().await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_stats_read_and_write() {
        let (api, transport) = client();
        transport.push_json(
            200,
            json!([{ "id": "1", "totalTicketsSold": 10, "eventsHosted": 3, "happyCustomers": 4 }]),
        );
        transport.push_json(
            200,
            json!({ "id": "1", "totalTicketsSold": 12, "eventsHosted": 3, "happyCustomers": 5 }),
        );

        let stats = api.get_stats().await.unwrap().unwrap();
        let updated = api.update_stats(&stats.with_order(2)).await.unwrap();
        assert_eq!(updated.total_tickets_sold, 12);

        let sent = transport.requests();
        assert_eq!(sent[0].url(), "https://api.test/stats");
        assert_eq!(sent[1].method(), Method::Put);
        assert_eq!(sent[1].url(), "https://api.test/stats/1");
        assert_eq!(sent[1].body_json().unwrap()["happyCustomers"], 5);
    }

    #[tokio::test]
    async fn test_empty_stats_list() {
        let (api, transport) = client();
        transport.push_json(200, json!([]));
        assert_eq!(api.get_stats().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_stats_without_id_makes_no_call() {
        let (api, transport) = client();
        let err = api
            .update_stats(&StatsSnapshot::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::Remote { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_event_crud_paths() {
        let (api, transport) = client();
        transport.push_json(201, json!({ "id": "5", "name": "Expo" }));
        transport.push_json(200, json!({ "id": "5", "name": "Expo II" }));
        transport.push_json(200, json!({ "id": "5" }));

        let draft = EventDraft {
            name: "Expo".to_string(),
            price: 12.0,
            ..Default::default()
        };
        api.create_event(&draft).await.unwrap();
        api.update_event(&EventId::new("5"), &draft).await.unwrap();
        api.delete_event(&EventId::new("5")).await.unwrap();

        let calls: Vec<(Method, String)> = transport
            .requests()
            .iter()
            .map(|r| (r.method(), r.url().to_string()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::Post, "https://api.test/events".to_string()),
                (Method::Put, "https://api.test/events/5".to_string()),
                (Method::Delete, "https://api.test/events/5".to_string()),
            ]
        );
    }
}
