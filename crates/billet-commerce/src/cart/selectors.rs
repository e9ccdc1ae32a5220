//! Derived cart figures.

use crate::cart::{CartLine, CartStore};
use crate::money::{Currency, Money};

/// The normalized lines.
pub fn items(cart: &CartStore) -> &[CartLine] {
    cart.lines()
}

/// Total number of tickets, saturating at `i64::MAX`.
pub fn count(cart: &CartStore) -> i64 {
    cart.lines()
        .iter()
        .fold(0i64, |acc, line| acc.saturating_add(line.quantity))
}

/// Sum of price × quantity over all lines.
pub fn total(cart: &CartStore) -> Money {
    Money::sum(cart.lines().iter().map(CartLine::subtotal), Currency::EUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Event;
    use crate::ids::EventId;

    #[test]
    fn test_empty_cart() {
        let cart = CartStore::in_memory();
        assert!(items(&cart).is_empty());
        assert_eq!(count(&cart), 0);
        assert!(total(&cart).is_zero());
    }

    #[test]
    fn test_total() {
        let mut cart = CartStore::in_memory();
        cart.add_item(Event::new("a", "A", 10.0));
        cart.add_item(Event::new("a", "A", 10.0));
        cart.add_item(Event::new("b", "B", 5.5));

        assert_eq!(count(&cart), 3);
        assert_eq!(total(&cart).to_decimal(), 25.5);
        assert_eq!(total(&cart).currency, Currency::EUR);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let mut cart = CartStore::in_memory();
        let mut free = Event::new("f", "Free", 0.0);
        free.price = None;
        cart.add_item(free);
        cart.add_item(Event::new("b", "B", 4.0));

        assert_eq!(count(&cart), 2);
        assert_eq!(total(&cart).amount_cents, 400);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut cart = CartStore::in_memory();
        cart.add_item(Event::new("a", "A", 10.0));
        cart.add_item(Event::new("b", "B", 5.0));
        cart.set_quantity(&EventId::new("a"), i64::MAX);

        assert_eq!(count(&cart), i64::MAX);
        assert_eq!(total(&cart).amount_cents, i64::MAX);
    }
}
