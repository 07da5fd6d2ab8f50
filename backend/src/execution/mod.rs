//! Execution Module
//!
//! Validates proposed actions against the registry and applies the ones that
//! pass.
//!
//! # Critical Invariants
//!
//! 1. **No Partial Mutation**: a rejected action leaves every venue and route untouched
//! 2. **Check Order**: rejections report the first failing check, in a fixed order
//! 3. **Sequential Consistency**: actions are applied one by one; each sees the
//!    effects of the ones before it in the same tick
//!
//! # Example
//!
//! ```rust
//! use liquidity_simulator_core_rs::{execute_action, Action, Capacity, ExecutionParams, Registry, Topology, Venue};
//! use rust_decimal_macros::dec;
//!
//! let params = ExecutionParams {
//!     gas_cost: dec!(0.0001),
//!     execution_surplus: dec!(1.0005),
//!     bridging_delay: 4,
//!     inventory_lock_delay: 4,
//! };
//! let venue = |name: &str, balance| {
//!     Venue::new(name.to_string(), balance)
//!         .with_capacities(
//!             Some(Capacity::new(dec!(10), dec!(0), None)),
//!             Some(Capacity::new(dec!(30), dec!(0), None)),
//!         )
//!         .with_params(params.clone())
//! };
//! let mut registry = Registry::new(
//!     Topology::PerVenue,
//!     vec![venue("A", dec!(10)), venue("B", dec!(0))],
//!     vec![],
//! )
//! .unwrap();
//!
//! let receipt = execute_action(&mut registry, &Action::bridge("A", "B", dec!(2))).unwrap();
//! assert_eq!(receipt.credited, dec!(1.9999));
//! assert_eq!(registry.venue("A").unwrap().balance(), dec!(8));
//! assert_eq!(registry.venue("B").unwrap().locked_total(), dec!(1.9999));
//! ```

pub mod executor;

// Re-export public API
pub use executor::{execute_action, validate_action, ActionReceipt, RejectionReason, ValidatedAction};
