//! Shopping cart: lines, persistent store and selectors.

mod line;
mod selectors;
mod store;
mod stored;

pub use line::CartLine;
pub use selectors::{count, items, total};
pub use store::CartStore;
pub use stored::{StoredCart, StoredLines, CART_KEY};
