//! Venue (chain) model
//!
//! Represents one chain the strategy holds inventory on.
//! Each venue has:
//! - Spendable balance (Decimal)
//! - Optional order-flow and outflow capacities
//! - Optional execution parameters (gas, surplus, delays)
//! - A queue of locked balances awaiting settlement
//!
//! Capacities and execution parameters are only required in the per-venue
//! topology, where the venue pair itself acts as the route. In the per-route
//! topology they live on `Route` instead.
//!
//! CRITICAL: Balance is never negative

use crate::models::capacity::{Capacity, CapacityKind};
use crate::models::locked::LockedQueue;
use crate::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during venue operations
#[derive(Debug, Error, PartialEq)]
pub enum VenueError {
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },
}

/// Cost and timing parameters of moving value over a link
///
/// In the per-venue topology the source venue's parameters apply; in the
/// per-route topology the route's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Gas charged per action, deducted from the action amount
    pub gas_cost: Amount,

    /// Multiplier applied to the post-gas amount of an `execute` action
    /// (e.g., 1.0005 = 5 bips surplus)
    pub execution_surplus: Amount,

    /// Ticks a bridged amount stays locked at the destination
    pub bridging_delay: usize,

    /// Ticks an executed amount stays locked at the destination
    pub inventory_lock_delay: usize,
}

/// Represents a venue in the simulation
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::Venue;
/// use rust_decimal_macros::dec;
///
/// let mut venue = Venue::new("A".to_string(), dec!(10));
/// venue.debit(dec!(2)).unwrap();
/// assert_eq!(venue.balance(), dec!(8));
///
/// venue.lock(dec!(1.5), 1);
/// assert_eq!(venue.total_value(), dec!(9.5));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    /// Unique venue name (e.g., "A")
    name: String,

    /// Spendable balance held by the strategy on this venue
    balance: Amount,

    /// Capacity consumed by `execute` actions targeting this venue
    orderflow: Option<Capacity>,

    /// Capacity consumed by `bridge` actions targeting this venue
    outflow: Option<Capacity>,

    /// Parameters applied when this venue is the source of an action
    params: Option<ExecutionParams>,

    /// Credits in transit to this venue
    locked: LockedQueue,
}

impl Venue {
    /// Create a new venue with no capacities or parameters
    pub fn new(name: String, balance: Amount) -> Self {
        assert!(balance >= Amount::ZERO, "balance must be non-negative");
        Self {
            name,
            balance,
            orderflow: None,
            outflow: None,
            params: None,
            locked: LockedQueue::new(),
        }
    }

    /// Attach order-flow and outflow capacities
    pub fn with_capacities(mut self, orderflow: Option<Capacity>, outflow: Option<Capacity>) -> Self {
        self.orderflow = orderflow;
        self.outflow = outflow;
        self
    }

    /// Attach execution parameters
    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spendable balance
    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn orderflow(&self) -> Option<&Capacity> {
        self.orderflow.as_ref()
    }

    pub fn outflow(&self) -> Option<&Capacity> {
        self.outflow.as_ref()
    }

    /// Get the capacity of the given kind
    pub fn capacity(&self, kind: CapacityKind) -> Option<&Capacity> {
        match kind {
            CapacityKind::OrderFlow => self.orderflow.as_ref(),
            CapacityKind::Outflow => self.outflow.as_ref(),
        }
    }

    pub(crate) fn capacity_mut(&mut self, kind: CapacityKind) -> Option<&mut Capacity> {
        match kind {
            CapacityKind::OrderFlow => self.orderflow.as_mut(),
            CapacityKind::Outflow => self.outflow.as_mut(),
        }
    }

    pub fn params(&self) -> Option<&ExecutionParams> {
        self.params.as_ref()
    }

    pub fn locked(&self) -> &LockedQueue {
        &self.locked
    }

    /// Sum of locked balances
    pub fn locked_total(&self) -> Amount {
        self.locked.total()
    }

    /// Spendable plus locked
    pub fn total_value(&self) -> Amount {
        self.balance + self.locked.total()
    }

    /// Spendable plus locked, `None` on overflow
    pub fn checked_total_value(&self) -> Option<Amount> {
        self.balance.checked_add(self.locked.checked_total()?)
    }

    /// Check if the venue holds at least `amount` spendable
    pub fn can_pay(&self, amount: Amount) -> bool {
        amount <= self.balance
    }

    /// Debit (decrease) balance
    ///
    /// # Returns
    /// - Ok(()) if successful
    /// - Err if balance is insufficient (balance unchanged)
    pub fn debit(&mut self, amount: Amount) -> Result<(), VenueError> {
        assert!(amount >= Amount::ZERO, "amount must be non-negative");

        if !self.can_pay(amount) {
            return Err(VenueError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        Ok(())
    }

    /// Credit (increase) balance
    pub fn credit(&mut self, amount: Amount) {
        assert!(amount >= Amount::ZERO, "amount must be non-negative");
        self.balance += amount;
    }

    /// Queue a locked balance that matures after `delay` ticks
    pub fn lock(&mut self, amount: Amount, delay: usize) {
        assert!(amount >= Amount::ZERO, "amount must be non-negative");
        self.locked.push(amount, delay);
    }

    /// Regenerate both capacities by one tick
    pub fn replenish(&mut self) {
        if let Some(orderflow) = self.orderflow.as_mut() {
            orderflow.replenish();
        }
        if let Some(outflow) = self.outflow.as_mut() {
            outflow.replenish();
        }
    }

    /// Advance the locked queue and credit matured amounts
    ///
    /// Returns matured amounts in insertion order.
    pub fn settle_matured(&mut self) -> Vec<Amount> {
        let matured = self.locked.advance();
        for amount in &matured {
            // Bounded by the registry total, which admission keeps representable
            self.balance = self.balance.saturating_add(*amount);
        }
        matured
    }
}
