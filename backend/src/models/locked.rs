//! Locked balances (funds in transit)
//!
//! Every successful action credits its destination through a locked balance:
//! a pending amount plus a remaining-tick counter. The counter is decremented
//! once per tick; the entry matures when the counter reaches zero and its
//! amount becomes spendable in that same tick.

use crate::Amount;
use serde::{Deserialize, Serialize};

/// A pending credit awaiting maturity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockedBalance {
    amount: Amount,
    remaining_ticks: usize,
}

impl LockedBalance {
    pub fn new(amount: Amount, remaining_ticks: usize) -> Self {
        Self {
            amount,
            remaining_ticks,
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn remaining_ticks(&self) -> usize {
        self.remaining_ticks
    }
}

/// Per-venue queue of locked balances, kept in insertion order
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::LockedQueue;
/// use rust_decimal_macros::dec;
///
/// let mut queue = LockedQueue::new();
/// queue.push(dec!(1.9999), 2);
///
/// assert!(queue.advance().is_empty()); // 2 -> 1
/// assert_eq!(queue.advance(), vec![dec!(1.9999)]); // 1 -> 0, matured
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LockedQueue {
    entries: Vec<LockedBalance>,
}

impl LockedQueue {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Queue a new locked balance
    pub fn push(&mut self, amount: Amount, delay: usize) {
        self.entries.push(LockedBalance::new(amount, delay));
    }

    /// Advance every entry by one tick and drain the matured ones
    ///
    /// Counters floor at zero. Matured amounts are returned in insertion
    /// order; the remaining entries keep their relative order.
    pub fn advance(&mut self) -> Vec<Amount> {
        let mut matured = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining_ticks = entry.remaining_ticks.saturating_sub(1);
            if entry.remaining_ticks == 0 {
                matured.push(entry.amount);
                false
            } else {
                true
            }
        });
        matured
    }

    /// Sum of all locked amounts
    pub fn total(&self) -> Amount {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    /// Sum of all locked amounts, `None` on overflow
    pub fn checked_total(&self) -> Option<Amount> {
        self.entries
            .iter()
            .try_fold(Amount::ZERO, |total, entry| total.checked_add(entry.amount))
    }

    pub fn entries(&self) -> &[LockedBalance] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
