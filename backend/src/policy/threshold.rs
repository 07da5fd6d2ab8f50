//! Threshold strategy
//!
//! A list of standing rules. Every tick each rule is checked against the
//! registry and proposes its action when:
//! - the source venue's spendable balance exceeds `amount + reserve`, and
//! - the capacity the action would draw on exceeds `amount`
//!
//! Both comparisons are strict. Rules are proposed in declaration order, and
//! they are checked against the tick's starting state: two rules drawing on
//! the same funds may both fire, and the executor rejects the second one.
//!
//! # Use Case
//!
//! - Steady rebalancing between a funded venue and a thin one
//! - Reference behaviour for comparing smarter strategies

use super::Strategy;
use crate::models::action::Action;
use crate::models::registry::Registry;
use crate::Amount;
use serde::{Deserialize, Serialize};

/// Standing rule: propose `action` whenever funds and capacity allow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub action: Action,

    /// Spendable balance to keep on the source on top of the action amount
    #[serde(default)]
    pub reserve: Amount,
}

impl ThresholdRule {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            reserve: Amount::ZERO,
        }
    }

    pub fn with_reserve(mut self, reserve: Amount) -> Self {
        self.reserve = reserve;
        self
    }

    /// Whether the rule fires against the given registry state
    pub fn fires(&self, registry: &Registry) -> bool {
        let action = &self.action;
        let funded = registry
            .venue(&action.source)
            .zip(action.amount.checked_add(self.reserve))
            .map_or(false, |(venue, needed)| venue.balance() > needed);
        if !funded {
            return false;
        }

        registry
            .link_capacity(
                action.kind.capacity_kind(),
                &action.source,
                &action.destination,
                action.route.as_deref(),
            )
            .map_or(false, |capacity| capacity.current() > action.amount)
    }
}

/// Strategy made of standing threshold rules
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::{Action, Strategy, ThresholdRule, ThresholdStrategy};
/// use rust_decimal_macros::dec;
///
/// let strategy = ThresholdStrategy::new(vec![
///     ThresholdRule::new(Action::bridge("A", "B", dec!(2))),
///     ThresholdRule::new(Action::execute("B", "A", dec!(5))),
/// ]);
/// assert_eq!(strategy.rules().len(), 2);
/// assert_eq!(strategy.name(), "threshold");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThresholdStrategy {
    rules: Vec<ThresholdRule>,
}

impl ThresholdStrategy {
    pub fn new(rules: Vec<ThresholdRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }
}

impl Strategy for ThresholdStrategy {
    fn propose_actions(&mut self, registry: &Registry, _tick: usize) -> Vec<Action> {
        self.rules
            .iter()
            .filter(|rule| rule.fires(registry))
            .map(|rule| rule.action.clone())
            .collect()
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::capacity::Capacity;
    use crate::models::registry::Topology;
    use crate::models::venue::{ExecutionParams, Venue};
    use rust_decimal_macros::dec;

    fn registry(a_balance: Amount, b_outflow: Amount) -> Registry {
        let params = ExecutionParams {
            gas_cost: dec!(0.0001),
            execution_surplus: dec!(1),
            bridging_delay: 1,
            inventory_lock_delay: 1,
        };
        let venue = |name: &str, balance: Amount, outflow: Amount| {
            Venue::new(name.to_string(), balance)
                .with_capacities(
                    Some(Capacity::new(dec!(10), dec!(0), None)),
                    Some(Capacity::new(outflow, dec!(0), None)),
                )
                .with_params(params.clone())
        };
        Registry::new(
            Topology::PerVenue,
            vec![venue("A", a_balance, dec!(10)), venue("B", dec!(0), b_outflow)],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_fires_when_funded_and_capacity_available() {
        let rule = ThresholdRule::new(Action::bridge("A", "B", dec!(2)));
        assert!(rule.fires(&registry(dec!(10), dec!(30))));
    }

    #[test]
    fn test_comparisons_are_strict() {
        let rule = ThresholdRule::new(Action::bridge("A", "B", dec!(2)));
        assert!(!rule.fires(&registry(dec!(2), dec!(30))));
        assert!(!rule.fires(&registry(dec!(10), dec!(2))));
    }

    #[test]
    fn test_reserve_raises_funding_bar() {
        let rule = ThresholdRule::new(Action::bridge("A", "B", dec!(2))).with_reserve(dec!(8));
        assert!(!rule.fires(&registry(dec!(10), dec!(30))));
        assert!(rule.fires(&registry(dec!(10.5), dec!(30))));
    }

    #[test]
    fn test_unrepresentable_reserve_never_fires() {
        let rule = ThresholdRule::new(Action::bridge("A", "B", dec!(2))).with_reserve(Amount::MAX);
        assert!(!rule.fires(&registry(dec!(10), dec!(30))));
    }

    #[test]
    fn test_unknown_venue_never_fires() {
        let rule = ThresholdRule::new(Action::bridge("Z", "B", dec!(2)));
        assert!(!rule.fires(&registry(dec!(10), dec!(30))));
    }

    #[test]
    fn test_rules_proposed_in_declaration_order() {
        let mut strategy = ThresholdStrategy::new(vec![
            ThresholdRule::new(Action::bridge("A", "B", dec!(2))),
            ThresholdRule::new(Action::bridge("B", "A", dec!(1))),
            ThresholdRule::new(Action::bridge("A", "B", dec!(3))),
        ]);

        let actions = strategy.propose_actions(&registry(dec!(10), dec!(30)), 0);
        assert_eq!(
            actions,
            vec![
                Action::bridge("A", "B", dec!(2)),
                Action::bridge("A", "B", dec!(3)),
            ]
        );
    }
}
