//! In-memory Order Store.
//!
//! Holds the authoritative list of orders in insertion order. Ids are unique
//! for the lifetime of the store.
//!
//! # Thread-safety
//! `OrderStore` is plain data. [`crate::OrderService`] owns it behind a
//! `tokio::sync::RwLock`; nothing else gets a mutable handle.

use std::collections::HashSet;

use crate::error::OrderError;
use crate::types::{Order, OrderStatus};

/// The fixed order set the daemon boots with.
///
/// Stands in for an external orders source; re-seeded identically on every
/// start.
pub fn seed_orders() -> Vec<Order> {
    vec![
        Order::new(
            "c2972b5b4eef349fb1e5cc3e3150a2b6",
            "Hannah Hungry",
            "+319876543210",
            ["1 x Hipster Burger", "Fries"],
            OrderStatus::Pending,
        ),
        Order::new(
            "1b992e39dc55f0c79dbe613b3ad02f29",
            "Mike Madeater",
            "+319876543211",
            ["1 x Chef Special Mozzarella Pizza"],
            OrderStatus::Delayed,
        ),
        Order::new(
            "81dc9bdb52d04dc20036dbd8313ed055",
            "Don Cheetos",
            "+319876543212",
            ["1 x Awesome Cheese Platter"],
            OrderStatus::Confirmed,
        ),
        Order::new(
            "5cb59f74fd4cd18fd90ffe79b4cb1dc0",
            "Ace Adventures",
            "+319876543213",
            ["1 x Variegated Salami Combo Box"],
            OrderStatus::Delivered,
        ),
    ]
}

#[derive(Clone, Debug, Default)]
pub struct OrderStore {
    orders: Vec<Order>,
}

impl OrderStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with [`seed_orders`].
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.seed();
        store
    }

    /// Build a store from an arbitrary order list, refusing duplicate ids.
    pub fn from_orders(orders: Vec<Order>) -> Result<Self, OrderError> {
        let mut seen = HashSet::with_capacity(orders.len());
        for o in &orders {
            if !seen.insert(o.id.as_str()) {
                return Err(OrderError::DuplicateId { id: o.id.clone() });
            }
        }
        Ok(Self { orders })
    }

    /// Replace the contents with the seed set.
    pub fn seed(&mut self) {
        self.orders = seed_orders();
    }

    /// Exact id match only.
    pub fn find_by_id(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Overwrite the status of the order with `id`.
    ///
    /// Returns [`OrderError::NotFound`] and leaves the store untouched when
    /// no order matches.
    pub fn update_status(&mut self, id: &str, new_status: OrderStatus) -> Result<(), OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| OrderError::NotFound { id: id.to_string() })?;
        order.status = new_status;
        Ok(())
    }

    /// All orders, insertion order.
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HANNAH: &str = "c2972b5b4eef349fb1e5cc3e3150a2b6";

    #[test]
    fn seed_replaces_prior_contents() {
        let mut store = OrderStore::from_orders(vec![Order::new(
            "x",
            "X",
            "+1",
            ["thing"],
            OrderStatus::Pending,
        )])
        .unwrap();
        store.seed();
        assert_eq!(store.len(), 4);
        assert!(store.find_by_id("x").is_none());
        assert_eq!(store.list(), seed_orders().as_slice());
    }

    #[test]
    fn seed_ids_are_unique() {
        assert!(OrderStore::from_orders(seed_orders()).is_ok());
    }

    #[test]
    fn from_orders_rejects_duplicate_ids() {
        let mut orders = seed_orders();
        orders.push(orders[0].clone());
        assert_eq!(
            OrderStore::from_orders(orders).unwrap_err(),
            OrderError::DuplicateId {
                id: HANNAH.to_string()
            }
        );
    }

    #[test]
    fn find_by_id_never_matches_partially() {
        let store = OrderStore::seeded();
        assert!(store.find_by_id(HANNAH).is_some());
        assert!(store.find_by_id("c2972b5b").is_none());
        assert!(store.find_by_id(&format!("{HANNAH}0")).is_none());
        assert!(store.find_by_id(&HANNAH.to_uppercase()).is_none());
        assert!(store.find_by_id("").is_none());
    }

    #[test]
    fn update_status_touches_only_the_target_status() {
        let mut store = OrderStore::seeded();
        let before = store.list().to_vec();

        store.update_status(HANNAH, OrderStatus::Delivered).unwrap();

        for (old, new) in before.iter().zip(store.list()) {
            if old.id == HANNAH {
                assert_eq!(new.status, OrderStatus::Delivered);
                assert_eq!(
                    Order {
                        status: old.status,
                        ..new.clone()
                    },
                    *old
                );
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn update_status_unknown_id_is_not_found_and_noop() {
        let mut store = OrderStore::seeded();
        let before = store.list().to_vec();

        let err = store
            .update_status("does-not-exist", OrderStatus::Confirmed)
            .unwrap_err();

        assert_eq!(
            err,
            OrderError::NotFound {
                id: "does-not-exist".to_string()
            }
        );
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn update_status_is_idempotent() {
        let mut once = OrderStore::seeded();
        once.update_status(HANNAH, OrderStatus::Confirmed).unwrap();

        let mut twice = OrderStore::seeded();
        twice.update_status(HANNAH, OrderStatus::Confirmed).unwrap();
        twice.update_status(HANNAH, OrderStatus::Confirmed).unwrap();

        assert_eq!(once.list(), twice.list());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = OrderStore::seeded();
        let names: Vec<&str> = store.list().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            ["Hannah Hungry", "Mike Madeater", "Don Cheetos", "Ace Adventures"]
        );
    }
}
