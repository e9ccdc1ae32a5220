//! Checkout orchestration.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::{ConfirmationNotifier, StorefrontApi};
use crate::cart::{self, CartStore};
use crate::checkout::saga::{Saga, SagaStep, StepKind};
use crate::checkout::{Clock, ConfirmationPayload, CustomerDetails, OrderRequest, SystemClock};
use crate::error::{CheckoutError, CommerceError};
use crate::ids::OrderId;

/// Delay before leaving the confirmation view.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Saga step names.
pub const CREATE_ORDER: &str = "create_order";
pub const SEND_CONFIRMATION: &str = "send_confirmation";
pub const UPDATE_STATS: &str = "update_stats";

/// Where a checkout submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CheckoutPhase {
    /// Form open, nothing sent yet.
    #[default]
    Idle,
    /// Remote calls in flight.
    Submitting,
    /// Order created.
    Succeeded,
    /// Order creation failed; the form is editable again.
    Failed,
}

impl CheckoutPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Idle => "idle",
            CheckoutPhase::Submitting => "submitting",
            CheckoutPhase::Succeeded => "succeeded",
            CheckoutPhase::Failed => "failed",
        }
    }

    /// Whether the customer may edit and submit the form.
    pub fn is_editable(&self) -> bool {
        matches!(self, CheckoutPhase::Idle | CheckoutPhase::Failed)
    }

    fn can_transition_to(&self, next: CheckoutPhase) -> bool {
        matches!(
            (self, next),
            (CheckoutPhase::Idle, CheckoutPhase::Submitting)
                | (CheckoutPhase::Failed, CheckoutPhase::Submitting)
                | (CheckoutPhase::Submitting, CheckoutPhase::Succeeded)
                | (CheckoutPhase::Submitting, CheckoutPhase::Failed)
        )
    }
}

/// Views the front end can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Home,
    Cart,
}

/// Navigation the front end must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub view: View,
    pub after: Duration,
}

impl Redirect {
    pub fn now(view: View) -> Self {
        Self {
            view,
            after: Duration::ZERO,
        }
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Warning,
}

/// A message for the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// What the confirmation view shows after a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Id assigned by the API.
    pub order_id: OrderId,
    /// Reference quoted in the confirmation message.
    pub reference: String,
    pub email: String,
    pub order: OrderRequest,
    pub notices: Vec<Notice>,
    pub redirect: Redirect,
}

/// Shared state of one checkout saga run.
pub struct CheckoutContext {
    pub order: OrderRequest,
    pub confirmation: ConfirmationPayload,
    created: OnceLock<OrderId>,
}

impl CheckoutContext {
    pub fn new(order: OrderRequest, confirmation: ConfirmationPayload) -> Self {
        Self {
            order,
            confirmation,
            created: OnceLock::new(),
        }
    }

    /// The order id, once the order exists.
    pub fn order_id(&self) -> Option<&OrderId> {
        self.created.get()
    }
}

struct CreateOrder<'a> {
    api: &'a dyn StorefrontApi,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SagaStep<CheckoutContext> for CreateOrder<'_> {
    fn name(&self) -> &'static str {
        CREATE_ORDER
    }

    fn kind(&self) -> StepKind {
        StepKind::Fatal
    }

    async fn execute(&self, ctx: &CheckoutContext) -> Result<(), CommerceError> {
        let id = self.api.create_order(&ctx.order).await?;
        tracing::info!(order_id = %id, total = ctx.order.total_price, "order created");
        let _ = ctx.created.set(id);
        Ok(())
    }
}

struct SendConfirmation<'a> {
    notifier: &'a dyn ConfirmationNotifier,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SagaStep<CheckoutContext> for SendConfirmation<'_> {
    fn name(&self) -> &'static str {
        SEND_CONFIRMATION
    }

    fn kind(&self) -> StepKind {
        StepKind::Advisory
    }

    async fn execute(&self, ctx: &CheckoutContext) -> Result<(), CommerceError> {
        self.notifier
            .notify_order_confirmation(&ctx.confirmation)
            .await
    }
}

struct UpdateStats<'a> {
    api: &'a dyn StorefrontApi,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SagaStep<CheckoutContext> for UpdateStats<'_> {
    fn name(&self) -> &'static str {
        UPDATE_STATS
    }

    fn kind(&self) -> StepKind {
        StepKind::Advisory
    }

    async fn execute(&self, ctx: &CheckoutContext) -> Result<(), CommerceError> {
        // Read-modify-write of the whole record; concurrent orders can lose increments.
        let Some(current) = self.api.get_stats().await? else {
            tracing::debug!("no stats record, skipping update");
            return Ok(());
        };
        let next = current.with_order(ctx.order.ticket_count());
        self.api.update_stats(&next).await?;
        Ok(())
    }
}

/// Drives one checkout from form submission to the confirmation view.
pub struct Checkout {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn ConfirmationNotifier>,
    clock: Arc<dyn Clock>,
    phase: CheckoutPhase,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    pub fn new(api: Arc<dyn StorefrontApi>, notifier: Arc<dyn ConfirmationNotifier>) -> Self {
        Self {
            api,
            notifier,
            clock: Arc::new(SystemClock),
            phase: CheckoutPhase::Idle,
        }
    }

    /// Use a different time source for order timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Where to send the customer instead of showing the form, if anywhere.
    ///
    /// An empty cart goes back to the cart view, except right after a
    /// successful order, when the cart has just been cleared.
    pub fn entry_redirect(&self, cart: &CartStore) -> Option<Redirect> {
        if cart.is_empty() && self.phase != CheckoutPhase::Succeeded {
            Some(Redirect::now(View::Cart))
        } else {
            None
        }
    }

    /// Move to `next`, refusing transitions the flow does not allow.
    pub fn transition(&mut self, next: CheckoutPhase) -> Result<(), CommerceError> {
        if !self.phase.can_transition_to(next) {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.phase.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        tracing::debug!(from = self.phase.as_str(), to = next.as_str(), "checkout transition");
        self.phase = next;
        Ok(())
    }

    /// Validate the form, place the order and run the follow-up calls.
    ///
    /// On success the cart is cleared and the receipt carries the notices to
    /// show plus the delayed redirect to the landing view. Validation errors
    /// leave everything untouched. A failed order creation leaves the cart as
    /// it was and the form editable.
    pub async fn submit(
        &mut self,
        details: &CustomerDetails,
        cart: &mut CartStore,
    ) -> Result<Receipt, CheckoutError> {
        match self.phase {
            CheckoutPhase::Submitting => return Err(CheckoutError::AlreadySubmitting),
            CheckoutPhase::Succeeded => return Err(CheckoutError::AlreadyCompleted),
            CheckoutPhase::Idle | CheckoutPhase::Failed => {}
        }

        details.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.transition(CheckoutPhase::Submitting)
            .map_err(|_| CheckoutError::AlreadySubmitting)?;

        let placed_at = self.clock.now();
        let total = cart::total(cart);
        let order = OrderRequest::from_cart(details, cart.lines(), total, placed_at);
        let confirmation = ConfirmationPayload::for_order(&order, placed_at);
        let ctx = CheckoutContext::new(order, confirmation);

        let api = Arc::clone(&self.api);
        let notifier = Arc::clone(&self.notifier);
        let report = Saga::new()
            .step(CreateOrder { api: api.as_ref() })
            .step(SendConfirmation {
                notifier: notifier.as_ref(),
            })
            .step(UpdateStats { api: api.as_ref() })
            .run(&ctx)
            .await;

        if let Some(failure) = report.halted {
            tracing::error!(error = %failure.error, "checkout failed, cart kept");
            self.phase = CheckoutPhase::Failed;
            return Err(CheckoutError::OrderFailed(failure.error));
        }

        let order_id = match ctx.created.into_inner() {
            Some(id) => id,
            None => {
                self.phase = CheckoutPhase::Failed;
                return Err(CheckoutError::OrderFailed(CommerceError::remote(
                    CREATE_ORDER,
                    "no order id recorded",
                )));
            }
        };

        self.phase = CheckoutPhase::Succeeded;
        cart.clear();

        let mut notices = vec![Notice::success("Order confirmed!")];
        if report.completed(SEND_CONFIRMATION) {
            notices.push(Notice::success("Confirmation email sent!"));
        } else {
            notices.push(Notice::warning(
                "Confirmation email could not be sent, but your order is confirmed",
            ));
        }

        Ok(Receipt {
            order_id,
            reference: ctx.confirmation.order_id,
            email: ctx.order.email.clone(),
            order: ctx.order,
            notices,
            redirect: Redirect {
                view: View::Home,
                after: REDIRECT_DELAY,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Event;
    use crate::checkout::{FixedClock, StatsSnapshot};
    use crate::error::ValidationError;
    use crate::testing::{FakeNotifier, FakeStorefront};
    use billet_cache::Cache;
    use chrono::{TimeZone, Utc};

    struct Fixture {
        api: Arc<FakeStorefront>,
        notifier: Arc<FakeNotifier>,
        checkout: Checkout,
        cart: CartStore,
        storage: Cache,
    }

    fn fixture() -> Fixture {
        let api = Arc::new(FakeStorefront::new());
        api.set_stats(StatsSnapshot {
            id: Some("1".into()),
            total_tickets_sold: 100,
            events_hosted: 12,
            happy_customers: 40,
            ..Default::default()
        });
        let notifier = Arc::new(FakeNotifier::new());
        let checkout = Checkout::new(api.clone(), notifier.clone()).with_clock(FixedClock(
            Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap(),
        ));

        let storage = Cache::memory();
        let mut cart = CartStore::load(storage.clone());
        cart.add_item(Event::new("e1", "Concert", 10.0));
        cart.add_item(Event::new("e1", "Concert", 10.0));
        cart.add_item(Event::new("e2", "Expo", 5.5));

        Fixture {
            api,
            notifier,
            checkout,
            cart,
            storage,
        }
    }

    fn details() -> CustomerDetails {
        CustomerDetails::new("Jean Dupont", "jean@example.com", "0612345678")
    }

    #[tokio::test]
    async fn test_successful_checkout() {
        let mut f = fixture();
        let receipt = f.checkout.submit(&details(), &mut f.cart).await.unwrap();

        assert_eq!(f.checkout.phase(), CheckoutPhase::Succeeded);
        assert!(f.cart.is_empty());
        assert_eq!(
            CartStore::load(f.storage.clone()).lines().len(),
            0,
            "cleared cart is persisted"
        );

        assert_eq!(receipt.redirect.view, View::Home);
        assert_eq!(receipt.redirect.after, Duration::from_secs(3));
        assert_eq!(receipt.order.total_price, 25.5);
        assert_eq!(receipt.order.order_date, "2024-05-01T18:30:00.000Z");
        assert_eq!(receipt.reference, "lvo5jm80");
        assert!(receipt.notices.iter().all(|n| n.level == NoticeLevel::Success));

        assert_eq!(
            f.api.calls(),
            vec!["create_order", "get_stats", "update_stats"]
        );
        assert_eq!(f.notifier.sent().len(), 1);
        assert_eq!(f.notifier.sent()[0].order_id, "lvo5jm80");

        let stats = f.api.stats().unwrap();
        assert_eq!(stats.total_tickets_sold, 103);
        assert_eq!(stats.happy_customers, 41);
        assert_eq!(stats.events_hosted, 12);
    }

    #[tokio::test]
    async fn test_order_snapshot_matches_cart() {
        let mut f = fixture();
        f.checkout.submit(&details(), &mut f.cart).await.unwrap();

        let orders = f.api.orders();
        assert_eq!(orders.len(), 1);
        let order = &orders[0].order;
        assert_eq!(order.customer_name, "Jean Dupont");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.ticket_count(), 3);
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_calls() {
        let mut f = fixture();
        let form = CustomerDetails::new("", "jean@example.com", "0612345678");

        let err = f.checkout.submit(&form, &mut f.cart).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Validation(ValidationError::MissingFullName)
        ));
        assert_eq!(err.to_string(), "Full name is required");
        assert_eq!(f.checkout.phase(), CheckoutPhase::Idle);
        assert!(f.api.calls().is_empty());
        assert!(f.notifier.sent().is_empty());
        assert_eq!(cart::count(&f.cart), 3);
    }

    #[tokio::test]
    async fn test_order_failure_keeps_cart_and_skips_followups() {
        let mut f = fixture();
        f.api.fail_on("create_order");

        let err = f.checkout.submit(&details(), &mut f.cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::OrderFailed(_)));
        assert_eq!(f.checkout.phase(), CheckoutPhase::Failed);
        assert!(f.checkout.phase().is_editable());
        assert_eq!(cart::count(&f.cart), 3);
        assert_eq!(f.api.calls(), vec!["create_order"]);
        assert!(f.notifier.sent().is_empty());
        assert_eq!(f.api.stats().unwrap().total_tickets_sold, 100);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let mut f = fixture();
        f.api.fail_on("create_order");
        assert!(f.checkout.submit(&details(), &mut f.cart).await.is_err());

        f.api.recover("create_order");
        let receipt = f.checkout.submit(&details(), &mut f.cart).await.unwrap();
        assert_eq!(f.checkout.phase(), CheckoutPhase::Succeeded);
        assert_eq!(receipt.order.ticket_count(), 3);
    }

    #[tokio::test]
    async fn test_notification_failure_is_advisory() {
        let mut f = fixture();
        f.notifier.fail();

        let receipt = f.checkout.submit(&details(), &mut f.cart).await.unwrap();
        assert_eq!(f.checkout.phase(), CheckoutPhase::Succeeded);
        assert!(f.cart.is_empty());
        assert!(receipt
            .notices
            .iter()
            .any(|n| n.level == NoticeLevel::Warning));
        assert_eq!(
            f.api.calls(),
            vec!["create_order", "get_stats", "update_stats"]
        );
    }

    #[tokio::test]
    async fn test_stats_failure_is_silent() {
        let mut f = fixture();
        f.api.fail_on("get_stats");

        let receipt = f.checkout.submit(&details(), &mut f.cart).await.unwrap();
        assert_eq!(f.checkout.phase(), CheckoutPhase::Succeeded);
        assert!(receipt
            .notices
            .iter()
            .all(|n| n.level == NoticeLevel::Success));
    }

    #[tokio::test]
    async fn test_missing_stats_record_is_skipped() {
        let api = Arc::new(FakeStorefront::new());
        let notifier = Arc::new(FakeNotifier::new());
        let mut checkout = Checkout::new(api.clone(), notifier);
        let mut cart = CartStore::in_memory();
        cart.add_item(Event::new("e1", "Concert", 10.0));

        checkout.submit(&details(), &mut cart).await.unwrap();
        assert_eq!(api.calls(), vec!["create_order", "get_stats"]);
    }

    #[tokio::test]
    async fn test_submit_refused_while_submitting() {
        let mut f = fixture();
        f.checkout.transition(CheckoutPhase::Submitting).unwrap();

        let err = f.checkout.submit(&details(), &mut f.cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::AlreadySubmitting));
        assert!(f.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_redirects_to_cart() {
        let mut f = fixture();
        let empty = CartStore::in_memory();
        assert_eq!(
            f.checkout.entry_redirect(&empty),
            Some(Redirect::now(View::Cart))
        );
        assert_eq!(f.checkout.entry_redirect(&f.cart), None);

        let mut empty = CartStore::in_memory();
        let err = f.checkout.submit(&details(), &mut empty).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));

        f.checkout.submit(&details(), &mut f.cart).await.unwrap();
        assert_eq!(f.checkout.entry_redirect(&f.cart), None);
    }

    #[test]
    fn test_transitions() {
        let api = Arc::new(FakeStorefront::new());
        let notifier = Arc::new(FakeNotifier::new());
        let mut checkout = Checkout::new(api, notifier);

        assert!(checkout.transition(CheckoutPhase::Succeeded).is_err());
        checkout.transition(CheckoutPhase::Submitting).unwrap();
        assert!(checkout.transition(CheckoutPhase::Submitting).is_err());
        checkout.transition(CheckoutPhase::Failed).unwrap();
        checkout.transition(CheckoutPhase::Submitting).unwrap();
        checkout.transition(CheckoutPhase::Succeeded).unwrap();
        assert!(checkout.transition(CheckoutPhase::Idle).is_err());
        assert!(!checkout.phase().is_editable());
    }
}
