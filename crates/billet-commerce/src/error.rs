//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A call to the remote API or webhook failed.
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    /// Event not found.
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Local input rejected before any remote call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CommerceError {
    /// Wrap a remote failure for the named facade operation.
    pub fn remote(operation: &'static str, err: impl std::fmt::Display) -> Self {
        CommerceError::Remote {
            operation,
            message: err.to_string(),
        }
    }
}

/// Form input rejected locally. The display text is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Full name is required")]
    MissingFullName,

    #[error("Email is required")]
    MissingEmail,

    #[error("Email is not valid")]
    InvalidEmail,

    #[error("Phone number is required")]
    MissingPhone,

    #[error("Event name is required")]
    MissingEventName,

    #[error("Price must be a non-negative number")]
    InvalidPrice,
}

/// Why a checkout submission did not reach the confirmation view.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Nothing to check out; the caller should go back to the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A submission is already running.
    #[error("Your order is already being processed")]
    AlreadySubmitting,

    /// The order was already placed.
    #[error("This order has already been placed")]
    AlreadyCompleted,

    /// The customer form is incomplete or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Creating the order failed. The cart is untouched and the form editable.
    #[error("Something went wrong while placing your order")]
    OrderFailed(#[source] CommerceError),
}
