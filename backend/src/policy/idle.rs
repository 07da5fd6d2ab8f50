//! Idle strategy
//!
//! Baseline that never acts. Capacities still regenerate and in-flight
//! balances still settle, so it isolates the engine's own dynamics.

use super::Strategy;
use crate::models::action::Action;
use crate::models::registry::Registry;

/// Strategy that never proposes an action
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleStrategy;

impl Strategy for IdleStrategy {
    fn propose_actions(&mut self, _registry: &Registry, _tick: usize) -> Vec<Action> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "idle"
    }
}
