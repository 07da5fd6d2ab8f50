//! Scripted strategy
//!
//! Replays a fixed schedule: each entry names the tick at which its action is
//! proposed. Entries sharing a tick are proposed in schedule order. The
//! strategy ignores the registry entirely, which makes it the tool of choice
//! for reproducing a specific sequence of actions.

use super::Strategy;
use crate::models::action::Action;
use crate::models::registry::Registry;
use serde::{Deserialize, Serialize};

/// One action bound to the tick it is proposed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub tick: usize,
    pub action: Action,
}

/// Strategy that replays a fixed schedule
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::policy::{ScheduledAction, ScriptedStrategy};
/// use liquidity_simulator_core_rs::Action;
/// use rust_decimal_macros::dec;
///
/// let strategy = ScriptedStrategy::new(vec![
///     ScheduledAction { tick: 0, action: Action::bridge("A", "B", dec!(2)) },
///     ScheduledAction { tick: 3, action: Action::execute("B", "A", dec!(1)) },
/// ]);
/// assert_eq!(strategy.actions_at(0).len(), 1);
/// assert!(strategy.actions_at(1).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    schedule: Vec<ScheduledAction>,
}

impl ScriptedStrategy {
    pub fn new(schedule: Vec<ScheduledAction>) -> Self {
        Self { schedule }
    }

    /// Add one action at `tick`, after any already scheduled there
    pub fn at(mut self, tick: usize, action: Action) -> Self {
        self.schedule.push(ScheduledAction { tick, action });
        self
    }

    /// Actions scheduled for `tick`, in schedule order
    pub fn actions_at(&self, tick: usize) -> Vec<Action> {
        self.schedule
            .iter()
            .filter(|entry| entry.tick == tick)
            .map(|entry| entry.action.clone())
            .collect()
    }
}

impl Strategy for ScriptedStrategy {
    fn propose_actions(&mut self, _registry: &Registry, tick: usize) -> Vec<Action> {
        self.actions_at(tick)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_same_tick_keeps_schedule_order() {
        let strategy = ScriptedStrategy::default()
            .at(2, Action::bridge("A", "B", dec!(1)))
            .at(1, Action::bridge("A", "C", dec!(1)))
            .at(2, Action::execute("B", "A", dec!(3)));

        let actions = strategy.actions_at(2);
        assert_eq!(
            actions,
            vec![
                Action::bridge("A", "B", dec!(1)),
                Action::execute("B", "A", dec!(3)),
            ]
        );
    }
}
