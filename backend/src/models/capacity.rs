//! Replenishing capacity counters
//!
//! Venues and routes each carry two capacities:
//! - **Order flow**: consumed by `execute` actions
//! - **Outflow**: consumed by `bridge` actions
//!
//! Every tick a capacity regenerates by a fixed amount. When a cap is
//! configured the counter is clamped to it; without a cap it grows until it
//! saturates at `Amount::MAX`.
//!
//! # Critical Invariants
//!
//! 1. `current` is never negative
//! 2. `current <= cap` whenever a cap is configured

use crate::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two capacity counters an action draws on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityKind {
    /// Capacity for executing order flow (consumed by `execute`)
    OrderFlow,
    /// Capacity for bridging funds out (consumed by `bridge`)
    Outflow,
}

impl std::fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityKind::OrderFlow => write!(f, "order-flow"),
            CapacityKind::Outflow => write!(f, "outflow"),
        }
    }
}

/// Errors that can occur when drawing on a capacity
#[derive(Debug, Error, PartialEq)]
pub enum CapacityError {
    #[error("Capacity exceeded: required {required}, available {available}")]
    Exceeded { required: Amount, available: Amount },
}

/// A replenishing, optionally capped capacity counter
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::Capacity;
/// use rust_decimal_macros::dec;
///
/// let mut capacity = Capacity::new(dec!(10), dec!(4), Some(dec!(15)));
/// capacity.replenish();
/// assert_eq!(capacity.current(), dec!(14));
/// capacity.replenish();
/// assert_eq!(capacity.current(), dec!(15)); // clamped
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    current: Amount,
    regen_per_tick: Amount,
    cap: Option<Amount>,
}

impl Capacity {
    /// Create a capacity with an initial value, regeneration rate and optional cap
    ///
    /// # Panics
    ///
    /// Panics if any value is negative or the initial value exceeds the cap.
    /// Configuration validation rejects such input before it reaches here.
    pub fn new(initial: Amount, regen_per_tick: Amount, cap: Option<Amount>) -> Self {
        assert!(initial >= Amount::ZERO, "initial capacity must be non-negative");
        assert!(
            regen_per_tick >= Amount::ZERO,
            "regen_per_tick must be non-negative"
        );
        if let Some(cap) = cap {
            assert!(initial <= cap, "initial capacity must not exceed cap");
        }
        Self {
            current: initial,
            regen_per_tick,
            cap,
        }
    }

    /// Currently available capacity
    pub fn current(&self) -> Amount {
        self.current
    }

    /// Regeneration per tick
    pub fn regen_per_tick(&self) -> Amount {
        self.regen_per_tick
    }

    /// Configured cap, if any
    pub fn cap(&self) -> Option<Amount> {
        self.cap
    }

    /// Regenerate by one tick's worth, clamped to the cap
    ///
    /// Uncapped growth saturates at `Amount::MAX`.
    pub fn replenish(&mut self) {
        self.current = self.clamp(self.current.saturating_add(self.regen_per_tick));
    }

    /// Whether `amount` can be drawn right now
    pub fn can_consume(&self, amount: Amount) -> bool {
        amount <= self.current
    }

    /// Draw `amount` from the capacity
    ///
    /// Leaves the counter untouched when `amount` exceeds what is available.
    pub fn consume(&mut self, amount: Amount) -> Result<(), CapacityError> {
        assert!(amount >= Amount::ZERO, "amount must be non-negative");

        if !self.can_consume(amount) {
            return Err(CapacityError::Exceeded {
                required: amount,
                available: self.current,
            });
        }

        self.current -= amount;
        Ok(())
    }

    /// Return `amount` to the capacity, clamped to the cap
    ///
    /// Used for the reciprocal outflow credit a source venue receives when it
    /// bridges funds out in the per-venue topology.
    pub fn restore(&mut self, amount: Amount) {
        assert!(amount >= Amount::ZERO, "amount must be non-negative");
        self.current = self.clamp(self.current.saturating_add(amount));
    }

    fn clamp(&self, value: Amount) -> Amount {
        match self.cap {
            Some(cap) => value.min(cap),
            None => value,
        }
    }
}
