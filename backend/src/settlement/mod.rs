//! Settlement Module
//!
//! Matures locked balances and credits them to their venues.
//!
//! - Each tick every locked entry counts down by one (never below zero)
//! - Entries reaching zero are removed and credited in the same tick
//! - Venues are processed in declared order, entries in insertion order
//!
//! # Critical Invariants
//!
//! 1. **Value Conservation**: settlement moves value from locked to spendable; the
//!    venue's total value does not change
//! 2. **Determinism**: the same queues always produce the same event sequence

pub mod maturity;

// Re-export public API
pub use maturity::{settle_locked_balances, SettlementResult};
