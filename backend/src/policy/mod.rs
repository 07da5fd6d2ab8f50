//! Strategy Module
//!
//! This module defines the interface through which a decision-making strategy
//! drives the simulation.
//!
//! # Overview
//!
//! Once per tick, after capacities regenerate, the orchestrator hands the
//! strategy a shared borrow of the registry. The strategy answers with an
//! ordered list of actions. It never mutates the simulation: every effect goes
//! through the executor, which validates and applies the actions in order.
//!
//! # Strategy Interface
//!
//! All strategies implement the `Strategy` trait:
//! ```rust
//! use liquidity_simulator_core_rs::{Action, Registry, Strategy};
//! use rust_decimal_macros::dec;
//!
//! struct AlwaysBridge;
//!
//! impl Strategy for AlwaysBridge {
//!     fn propose_actions(&mut self, _registry: &Registry, _tick: usize) -> Vec<Action> {
//!         vec![Action::bridge("A", "B", dec!(1))]
//!     }
//! }
//! ```
//!
//! # Reference Strategies
//!
//! 1. **Idle**: never acts (baseline)
//! 2. **Scripted**: replays a fixed tick → actions schedule
//! 3. **Threshold**: standing rules that fire when funds and capacity allow
//!
//! `StrategyConfig` selects one of these from configuration:
//!
//! ```rust
//! use liquidity_simulator_core_rs::StrategyConfig;
//!
//! let config: StrategyConfig = serde_json::from_str(r#"{"type":"idle"}"#).unwrap();
//! let strategy = config.build();
//! assert_eq!(strategy.name(), "idle");
//! ```

use crate::models::action::Action;
use crate::models::registry::Registry;
use serde::{Deserialize, Serialize};

pub mod idle;
pub mod scripted;
pub mod threshold;

pub use idle::IdleStrategy;
pub use scripted::{ScheduledAction, ScriptedStrategy};
pub use threshold::{ThresholdRule, ThresholdStrategy};

/// Decision-making policy invoked once per tick
///
/// Implementations receive the registry by shared reference and return the
/// actions to attempt this tick, in the order they should be applied.
pub trait Strategy {
    /// Propose this tick's actions
    fn propose_actions(&mut self, registry: &Registry, tick: usize) -> Vec<Action>;

    /// Short identifier used in reports
    fn name(&self) -> &str {
        "custom"
    }
}

/// Strategy selection from configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Never propose anything
    #[default]
    Idle,

    /// Replay a fixed schedule of actions
    Scripted { schedule: Vec<ScheduledAction> },

    /// Standing rules evaluated every tick
    Threshold { rules: Vec<ThresholdRule> },
}

impl StrategyConfig {
    /// Instantiate the configured strategy
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategyConfig::Idle => Box::new(IdleStrategy),
            StrategyConfig::Scripted { schedule } => Box::new(ScriptedStrategy::new(schedule.clone())),
            StrategyConfig::Threshold { rules } => Box::new(ThresholdStrategy::new(rules.clone())),
        }
    }
}
