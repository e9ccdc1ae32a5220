//! Persistent cart store.

use billet_cache::Cache;

use crate::cart::stored::{StoredCart, StoredLines, CART_KEY};
use crate::cart::CartLine;
use crate::catalog::Event;
use crate::ids::EventId;

/// The shopping cart, mirrored to a storage slot after every change.
///
/// Storage is best effort. Reads that fail leave the cart empty and writes
/// that fail are logged; the in-memory cart is always authoritative.
#[derive(Debug, Clone)]
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Cache,
}

impl CartStore {
    /// Load the cart from storage. Never fails.
    pub fn load(storage: Cache) -> Self {
        let lines = match storage.get::<serde_json::Value>(CART_KEY) {
            Ok(Some(document)) => match StoredLines::decode(&document) {
                Ok(stored) => stored.into_lines(),
                Err(e) => {
                    tracing::error!(error = %e, "stored cart is unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load cart from storage");
                Vec::new()
            }
        };

        tracing::debug!(lines = lines.len(), "cart loaded");
        Self { lines, storage }
    }

    /// A cart that is not backed by anything durable.
    pub fn in_memory() -> Self {
        Self::load(Cache::memory())
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line for an event.
    pub fn line(&self, id: &EventId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.is_for(id))
    }

    /// Add one ticket for `item`.
    ///
    /// Items without an id cannot be matched against existing lines, so
    /// each add appends a separate line.
    pub fn add_item(&mut self, item: Event) {
        match item.key().cloned() {
            None => {
                tracing::warn!(name = %item.name, "adding event without id or _id to cart");
                self.lines.push(CartLine::new(item));
            }
            Some(id) => match self.lines.iter_mut().find(|line| line.is_for(&id)) {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => self.lines.push(CartLine::new(item)),
            },
        }
        self.persist();
    }

    /// Remove the line for `id`, if any.
    pub fn remove_item(&mut self, id: &EventId) {
        self.lines.retain(|line| !line.is_for(id));
        self.persist();
    }

    /// Set the quantity of the line for `id`. Zero or less removes the line.
    pub fn set_quantity(&mut self, id: &EventId, quantity: i64) {
        if quantity <= 0 {
            self.lines.retain(|line| !line.is_for(id));
        } else if let Some(line) = self.lines.iter_mut().find(|line| line.is_for(id)) {
            line.quantity = quantity;
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    fn persist(&self) {
        let document = StoredCart { items: &self.lines };
        if let Err(e) = self.storage.set(CART_KEY, &document) {
            tracing::error!(error = %e, "failed to save cart to storage");
        }
    }
}
