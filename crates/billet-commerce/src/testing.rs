//! In-memory fakes of the remote collaborators.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ConfirmationNotifier, StorefrontApi};
use crate::catalog::{CategoryEntry, Event, EventDraft};
use crate::checkout::{ConfirmationPayload, OrderRecord, OrderRequest, StatsSnapshot};
use crate::ids::{EventId, OrderId};
use crate::CommerceError;

#[derive(Debug, Default)]
struct State {
    events: Vec<Event>,
    categories: Vec<CategoryEntry>,
    orders: Vec<OrderRecord>,
    stats: Option<StatsSnapshot>,
    failing: HashSet<String>,
    calls: Vec<String>,
    next_id: u64,
}

/// A storefront API backed by vectors.
///
/// Every call is recorded by operation name. Operations can be made to fail
/// with [`FakeStorefront::fail_on`].
#[derive(Debug, Default)]
pub struct FakeStorefront {
    state: Mutex<State>,
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    fn call(&self, operation: &'static str) -> Result<(), CommerceError> {
        self.with_state(|s| {
            s.calls.push(operation.to_string());
            if s.failing.contains(operation) {
                Err(CommerceError::remote(operation, "simulated failure"))
            } else {
                Ok(())
            }
        })
    }

    pub fn insert_event(&self, event: Event) {
        self.with_state(|s| s.events.push(event));
    }

    pub fn set_categories(&self, categories: Vec<CategoryEntry>) {
        self.with_state(|s| s.categories = categories);
    }

    pub fn set_stats(&self, stats: StatsSnapshot) {
        self.with_state(|s| s.stats = Some(stats));
    }

    pub fn insert_order(&self, order: OrderRequest) {
        self.with_state(|s| {
            s.next_id += 1;
            let id = OrderId::new(s.next_id.to_string());
            s.orders.push(OrderRecord {
                id: Some(id),
                order,
            });
        });
    }

    /// Make `operation` fail until [`FakeStorefront::recover`] is called.
    pub fn fail_on(&self, operation: &str) {
        self.with_state(|s| s.failing.insert(operation.to_string()));
    }

    pub fn recover(&self, operation: &str) {
        self.with_state(|s| s.failing.remove(operation));
    }

    /// Operation names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.with_state(|s| s.events.clone())
    }

    pub fn orders(&self) -> Vec<OrderRecord> {
        self.with_state(|s| s.orders.clone())
    }

    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.with_state(|s| s.stats.clone())
    }
}

fn event_from_draft(id: EventId, draft: &EventDraft) -> Event {
    Event {
        id: Some(id),
        legacy_id: None,
        name: draft.name.clone(),
        description: draft.description.clone(),
        category: Some(draft.category.clone()),
        image: Some(draft.image.clone()),
        price: Some(draft.price),
        date: Some(draft.date.clone()),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl StorefrontApi for FakeStorefront {
    async fn list_events(&self) -> Result<Vec<Event>, CommerceError> {
        self.call("list_events")?;
        Ok(self.events())
    }

    async fn get_event(&self, id: &EventId) -> Result<Event, CommerceError> {
        self.call("get_event")?;
        self.with_state(|s| s.events.iter().find(|e| e.key() == Some(id)).cloned())
            .ok_or_else(|| CommerceError::EventNotFound(id.to_string()))
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, CommerceError> {
        self.call("create_event")?;
        Ok(self.with_state(|s| {
            s.next_id += 1;
            let event = event_from_draft(EventId::new(s.next_id.to_string()), draft);
            s.events.push(event.clone());
            event
        }))
    }

    async fn update_event(
        &self,
        id: &EventId,
        draft: &EventDraft,
    ) -> Result<Event, CommerceError> {
        self.call("update_event")?;
        self.with_state(|s| {
            let slot = s.events.iter_mut().find(|e| e.key() == Some(id))?;
            *slot = event_from_draft(id.clone(), draft);
            Some(slot.clone())
        })
        .ok_or_else(|| CommerceError::EventNotFound(id.to_string()))
    }

    async fn delete_event(&self, id: &EventId) -> Result<(), CommerceError> {
        self.call("delete_event")?;
        self.with_state(|s| s.events.retain(|e| e.key() != Some(id)));
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryEntry>, CommerceError> {
        self.call("list_categories")?;
        Ok(self.with_state(|s| s.categories.clone()))
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, CommerceError> {
        self.call("list_orders")?;
        Ok(self.orders())
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderId, CommerceError> {
        self.call("create_order")?;
        self.insert_order(order.clone());
        self.with_state(|s| s.orders.last().and_then(|o| o.id.clone()))
            .ok_or_else(|| CommerceError::remote("create_order", "no id assigned"))
    }

    async fn get_stats(&self) -> Result<Option<StatsSnapshot>, CommerceError> {
        self.call("get_stats")?;
        Ok(self.stats())
    }

    async fn update_stats(&self, stats: &StatsSnapshot) -> Result<StatsSnapshot, CommerceError> {
        self.call("update_stats")?;
        self.set_stats(stats.clone());
        Ok(stats.clone())
    }
}

/// A notifier that keeps what it was asked to send.
#[derive(Debug, Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<ConfirmationPayload>>,
    failing: Mutex<bool>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following notification fail.
    pub fn fail(&self) {
        *self.failing.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Payloads accepted so far.
    pub fn sent(&self) -> Vec<ConfirmationPayload> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl ConfirmationNotifier for FakeNotifier {
    async fn notify_order_confirmation(
        &self,
        payload: &ConfirmationPayload,
    ) -> Result<(), CommerceError> {
        if *self.failing.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(CommerceError::remote(
                "notify_order_confirmation",
                "webhook returned status 500",
            ));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(payload.clone());
        Ok(())
    }
}
