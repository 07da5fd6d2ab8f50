//! Locked-Balance Settlement Tests
//!
//! An entry locked with delay D matures on the D-th settlement pass after it
//! was created (delay 0 behaves like delay 1). Matured entries are credited
//! in insertion order and the pass never changes total value.

use liquidity_simulator_core_rs::{settle_locked_balances, Event, LockedQueue, Registry, Topology, Venue};
use rust_decimal_macros::dec;

fn registry_with(venues: Vec<Venue>) -> Registry {
    Registry::new(Topology::PerRoute, venues, vec![]).unwrap()
}

#[test]
fn test_delay_d_matures_on_pass_d() {
    for delay in 1..=8usize {
        let mut venue = Venue::new("B".to_string(), dec!(0));
        venue.lock(dec!(1.9999), delay);
        let mut registry = registry_with(vec![venue]);

        for pass in 1..=delay {
            let result = settle_locked_balances(&mut registry, pass);
            let expected = if pass == delay { 1 } else { 0 };
            assert_eq!(result.settled_count, expected, "delay {} pass {}", delay, pass);
        }
        assert_eq!(registry.venue("B").unwrap().balance(), dec!(1.9999));
    }
}

#[test]
fn test_zero_delay_behaves_like_one() {
    let mut queue = LockedQueue::new();
    queue.push(dec!(1), 0);
    queue.push(dec!(2), 1);

    assert_eq!(queue.advance(), vec![dec!(1), dec!(2)]);
    assert!(queue.is_empty());
}

#[test]
fn test_counters_decrement_every_pass() {
    let mut venue = Venue::new("B".to_string(), dec!(0));
    venue.lock(dec!(1), 6);
    venue.lock(dec!(2), 4);
    let mut registry = registry_with(vec![venue]);

    settle_locked_balances(&mut registry, 0);
    let remaining: Vec<_> = registry
        .venue("B")
        .unwrap()
        .locked()
        .entries()
        .iter()
        .map(|e| e.remaining_ticks())
        .collect();
    assert_eq!(remaining, vec![5, 3]);
}

#[test]
fn test_matured_entries_credited_in_insertion_order() {
    let mut venue = Venue::new("B".to_string(), dec!(0));
    venue.lock(dec!(3), 2);
    venue.lock(dec!(1), 1);
    venue.lock(dec!(2), 2);
    let mut registry = registry_with(vec![venue]);

    let first = settle_locked_balances(&mut registry, 10);
    assert_eq!(first.settled_value, dec!(1));

    let second = settle_locked_balances(&mut registry, 11);
    let amounts: Vec<_> = second
        .events
        .iter()
        .map(|e| match e {
            Event::LockedBalanceSettled { tick, amount, .. } => {
                assert_eq!(*tick, 11);
                *amount
            }
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    assert_eq!(amounts, vec![dec!(3), dec!(2)]);
    assert!(registry.venue("B").unwrap().locked().is_empty());
}

#[test]
fn test_settlement_conserves_value_across_venues() {
    let mut a = Venue::new("A".to_string(), dec!(5));
    a.lock(dec!(0.25), 1);
    let mut b = Venue::new("B".to_string(), dec!(0));
    b.lock(dec!(1.9999), 3);
    let mut registry = registry_with(vec![a, b]);

    let before = registry.total_value();
    for tick in 0..5 {
        settle_locked_balances(&mut registry, tick);
        assert_eq!(registry.total_value(), before);
    }
    assert_eq!(registry.venue("A").unwrap().balance(), dec!(5.25));
    assert_eq!(registry.venue("B").unwrap().balance(), dec!(1.9999));
}
