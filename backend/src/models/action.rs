//! Actions proposed by a strategy
//!
//! An action is a transient instruction: built by the strategy during a tick,
//! consumed by the executor in the same tick, never stored.

use crate::models::capacity::CapacityKind;
use crate::models::venue::ExecutionParams;
use crate::Amount;
use serde::{Deserialize, Serialize};

/// What an action does with the funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Move inventory from source to destination (net of gas)
    Bridge,
    /// Fill order flow funded on source, credited on destination with surplus
    Execute,
}

impl ActionKind {
    /// The capacity counter this kind of action draws on
    pub fn capacity_kind(&self) -> CapacityKind {
        match self {
            ActionKind::Bridge => CapacityKind::Outflow,
            ActionKind::Execute => CapacityKind::OrderFlow,
        }
    }

    /// Ticks the credited amount stays locked under the given parameters
    pub fn lock_delay(&self, params: &ExecutionParams) -> usize {
        match self {
            ActionKind::Bridge => params.bridging_delay,
            ActionKind::Execute => params.inventory_lock_delay,
        }
    }

    /// Amount credited to the destination for a gross `amount`
    ///
    /// Bridge: `amount - gas`. Execute: `(amount - gas) * surplus`.
    /// `None` when the result is not representable.
    pub fn credited_amount(&self, amount: Amount, params: &ExecutionParams) -> Option<Amount> {
        let after_gas = amount.checked_sub(params.gas_cost)?;
        match self {
            ActionKind::Bridge => Some(after_gas),
            ActionKind::Execute => after_gas.checked_mul(params.execution_surplus),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Bridge => write!(f, "bridge"),
            ActionKind::Execute => write!(f, "execute"),
        }
    }
}

/// A proposed instruction
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::{Action, ActionKind};
/// use rust_decimal_macros::dec;
///
/// let action = Action::bridge("A", "B", dec!(2)).via("a-b-fast");
/// assert_eq!(action.kind, ActionKind::Bridge);
/// assert_eq!(action.route.as_deref(), Some("a-b-fast"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub source: String,
    pub destination: String,
    pub amount: Amount,

    /// Pin a specific named route (per-route topology only).
    /// None = first declared route between source and destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl Action {
    pub fn new(kind: ActionKind, source: &str, destination: &str, amount: Amount) -> Self {
        Self {
            kind,
            source: source.to_string(),
            destination: destination.to_string(),
            amount,
            route: None,
        }
    }

    pub fn bridge(source: &str, destination: &str, amount: Amount) -> Self {
        Self::new(ActionKind::Bridge, source, destination, amount)
    }

    pub fn execute(source: &str, destination: &str, amount: Amount) -> Self {
        Self::new(ActionKind::Execute, source, destination, amount)
    }

    /// Pin the action to a named route
    pub fn via(mut self, route: &str) -> Self {
        self.route = Some(route.to_string());
        self
    }
}
