//! Checkout: customer form, order payloads, saga runner and orchestrator.

mod clock;
mod flow;
mod form;
mod order;
pub mod saga;
mod stats;

pub use clock::{Clock, FixedClock, SystemClock};
pub use flow::{
    Checkout, CheckoutContext, CheckoutPhase, Notice, NoticeLevel, Receipt, Redirect, View,
    CREATE_ORDER, REDIRECT_DELAY, SEND_CONFIRMATION, UPDATE_STATS,
};
pub use form::{is_valid_email, CustomerDetails};
pub use order::{
    confirmation_reference, format_timestamp, ConfirmationItem, ConfirmationPayload, OrderItem,
    OrderRecord, OrderRequest,
};
pub use saga::{Saga, SagaReport, SagaStep, StepFailure, StepKind};
pub use stats::StatsSnapshot;
