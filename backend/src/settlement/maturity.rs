//! Locked-balance maturity
//!
//! Advances every venue's locked queue by one tick and credits whatever
//! matured, emitting one `LockedBalanceSettled` event per credited entry.
//!
//! # Usage
//!
//! ```rust
//! use liquidity_simulator_core_rs::{settle_locked_balances, Registry, Topology, Venue};
//! use rust_decimal_macros::dec;
//!
//! let mut venue = Venue::new("B".to_string(), dec!(0));
//! venue.lock(dec!(1.9999), 1);
//! let mut registry = Registry::new(Topology::PerRoute, vec![venue], vec![]).unwrap();
//!
//! let result = settle_locked_balances(&mut registry, 7);
//! assert_eq!(result.settled_count, 1);
//! assert_eq!(registry.venue("B").unwrap().balance(), dec!(1.9999));
//! ```

use crate::models::event::Event;
use crate::models::registry::Registry;
use crate::Amount;

/// Statistics from one settlement pass
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementResult {
    /// Number of locked entries credited this tick
    pub settled_count: usize,

    /// Total value moved from locked to spendable
    pub settled_value: Amount,

    /// One `LockedBalanceSettled` event per credited entry, in processing order
    pub events: Vec<Event>,
}

/// Advance all locked queues by one tick and credit matured entries
pub fn settle_locked_balances(registry: &mut Registry, tick: usize) -> SettlementResult {
    let mut events = Vec::new();
    let mut settled_value = Amount::ZERO;

    for venue in registry.venues_mut() {
        for amount in venue.settle_matured() {
            settled_value += amount;
            events.push(Event::LockedBalanceSettled {
                tick,
                venue: venue.name().to_string(),
                amount,
            });
        }
    }

    SettlementResult {
        settled_count: events.len(),
        settled_value,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::registry::Topology;
    use crate::models::venue::Venue;
    use rust_decimal_macros::dec;

    #[test]
    fn test_settlement_preserves_total_value() {
        let mut a = Venue::new("A".to_string(), dec!(1));
        a.lock(dec!(2), 1);
        a.lock(dec!(3), 2);
        let mut registry = Registry::new(Topology::PerRoute, vec![a], vec![]).unwrap();

        let before = registry.total_value();
        let result = settle_locked_balances(&mut registry, 0);

        assert_eq!(result.settled_value, dec!(2));
        assert_eq!(registry.total_value(), before);
    }

    #[test]
    fn test_events_follow_declared_venue_order() {
        let mut b = Venue::new("B".to_string(), dec!(0));
        b.lock(dec!(1), 1);
        let mut a = Venue::new("A".to_string(), dec!(0));
        a.lock(dec!(2), 1);
        a.lock(dec!(3), 1);
        let mut registry = Registry::new(Topology::PerRoute, vec![b, a], vec![]).unwrap();

        let result = settle_locked_balances(&mut registry, 9);
        let order: Vec<_> = result
            .events
            .iter()
            .map(|e| match e {
                Event::LockedBalanceSettled { venue, amount, .. } => (venue.as_str(), *amount),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(order, vec![("B", dec!(1)), ("A", dec!(2)), ("A", dec!(3))]);
    }

    #[test]
    fn test_nothing_matured_yields_empty_result() {
        let mut a = Venue::new("A".to_string(), dec!(0));
        a.lock(dec!(2), 5);
        let mut registry = Registry::new(Topology::PerRoute, vec![a], vec![]).unwrap();

        let result = settle_locked_balances(&mut registry, 0);
        assert_eq!(result.settled_count, 0);
        assert_eq!(result.settled_value, dec!(0));
        assert_eq!(registry.venue("A").unwrap().locked().entries()[0].remaining_ticks(), 4);
    }
}
