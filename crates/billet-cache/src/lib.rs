//! Key-Value storage slots for the Billetterie storefront.
//!
//! Stands in for browser local storage: a handful of named slots holding
//! either JSON documents or raw strings. The backend is pluggable so the same
//! code runs against a directory on disk, an in-memory map in tests, Spin's
//! Key-Value Store on wasm32, or nothing at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use billet_cache::Cache;
//!
//! let cache = Cache::open_dir("./storage")?;
//!
//! // Store a value
//! cache.set("cart", &stored_cart)?;
//!
//! // Retrieve a value
//! let cart: Option<StoredCart> = cache.get("cart")?;
//!
//! // Raw string slot
//! cache.set_string("adminAuth", "true")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend, UnavailableBackend};
#[cfg(target_arch = "wasm32")]
pub use backend::SpinBackend;
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvBackend};
}
