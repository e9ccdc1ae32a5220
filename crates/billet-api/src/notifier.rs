//! Order confirmation webhook.

use async_trait::async_trait;

use billet_commerce::checkout::ConfirmationPayload;
use billet_commerce::{CommerceError, ConfirmationNotifier};
use billet_data::FetchClient;

const OPERATION: &str = "notify_order_confirmation";

/// Posts confirmation payloads to an automation webhook, which emails the
/// customer. Any non-2xx answer counts as a failure.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: FetchClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new(), url)
    }

    pub fn with_client(http: FetchClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ConfirmationNotifier for WebhookNotifier {
    async fn notify_order_confirmation(
        &self,
        payload: &ConfirmationPayload,
    ) -> Result<(), CommerceError> {
        let response = self
            .http
            .post(self.url.as_str())
            .json(payload)
            .map_err(|e| CommerceError::remote(OPERATION, e))?
            .send()
            .await
            .map_err(|e| CommerceError::remote(OPERATION, e))?;

        if !response.is_success() {
            tracing::warn!(status = response.status, url = %self.url, "confirmation webhook rejected payload");
            return Err(CommerceError::remote(
                OPERATION,
                format!("webhook returned status {}", response.status),
            ));
        }

        tracing::info!(order_ref = %payload.order_id, "order confirmation sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billet_commerce::checkout::ConfirmationItem;
    use billet_data::testing::ScriptedTransport;
    use billet_data::{Method, Response};
    use std::sync::Arc;

    fn payload() -> ConfirmationPayload {
        ConfirmationPayload {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            phone: "0600000000".to_string(),
            items: vec![ConfirmationItem {
                event_name: "Jazz".to_string(),
                quantity: 2,
                price: 20.0,
            }],
            total_price: 40.0,
            order_id: "lvo5jm80".to_string(),
            order_date: "2024-05-01T18:30:00.000Z".to_string(),
        }
    }

    fn notifier() -> (WebhookNotifier, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let http = FetchClient::with_shared_transport(transport.clone());
        (
            WebhookNotifier::with_client(http, "https://hooks.test/webhook/confirm"),
            transport,
        )
    }

    #[tokio::test]
    async fn test_posts_payload() {
        let (notifier, transport) = notifier();
        transport.push_response(Response::with_body(200, "ok"));

        notifier.notify_order_confirmation(&payload()).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method(), Method::Post);
        assert_eq!(sent.url(), "https://hooks.test/webhook/confirm");
        let body = sent.body_json().unwrap();
        assert_eq!(body["name"], "Ana");
        assert_eq!(body["orderId"], "lvo5jm80");
        assert_eq!(body["items"][0]["eventName"], "Jazz");
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let (notifier, transport) = notifier();
        transport.push_response(Response::with_body(404, "webhook not registered"));

        let err = notifier
            .notify_order_confirmation(&payload())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_transport_failure_fails() {
        let (notifier, transport) = notifier();
        transport.push_failure("dns error");
        assert!(notifier.notify_order_confirmation(&payload()).await.is_err());
    }
}
