//! Ticket storefront domain types and logic for Billetterie.
//!
//! - **Catalog**: events, categories, filtering, landing data
//! - **Cart**: persistent cart store with derived count and total
//! - **Checkout**: customer form, order snapshot, saga-driven submission
//! - **Admin**: event management and dashboard figures
//!
//! Remote calls go through the [`StorefrontApi`] and
//! [`ConfirmationNotifier`] traits; storage goes through a
//! [`billet_cache::Cache`] handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use billet_commerce::prelude::*;
//!
//! let mut cart = CartStore::load(Cache::open_dir(".billet")?);
//! cart.add_item(event);
//! println!("{} tickets, {}", cart::count(&cart), cart::total(&cart));
//!
//! let mut checkout = Checkout::new(api, notifier);
//! let receipt = checkout.submit(&details, &mut cart).await?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod admin;
pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{ConfirmationNotifier, StorefrontApi};
pub use error::{CheckoutError, CommerceError, ValidationError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{ConfirmationNotifier, StorefrontApi};
    pub use crate::error::{CheckoutError, CommerceError, ValidationError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogItem, CategoryEntry, Event, EventCategory, EventDraft, EventFilter};

    // Cart
    pub use crate::cart::{self, CartLine, CartStore};

    // Checkout
    pub use crate::checkout::{
        Checkout, CheckoutPhase, CustomerDetails, Notice, NoticeLevel, OrderRecord, OrderRequest,
        Receipt, Redirect, StatsSnapshot, View,
    };

    // Admin
    pub use crate::admin::DashboardSummary;
}
