//! Orchestrator Engine
//!
//! Main simulation loop integrating all components:
//! - Capacity replenishment
//! - Strategy invocation
//! - Locked-balance settlement
//! - Action validation and execution
//! - Event logging (complete simulation history)
//!
//! # Architecture
//!
//! ```text
//! For each tick t:
//! 1. Replenish every venue and route capacity (clamped to caps)
//! 2. Invoke the strategy with a read-only registry view
//! 3. Advance locked queues and credit matured balances
//! 4. Validate and execute the proposed actions in order
//! 5. Emit a periodic report if t is a report tick
//! 6. Advance time
//! ```
//!
//! Settlement runs after the strategy is invoked, so the strategy sees the
//! balances as they stood at the end of the previous tick. An entry locked at
//! tick t with delay D is therefore credited during tick t + D.
//!
//! # Example
//!
//! ```rust
//! use liquidity_simulator_core_rs::orchestrator::{CapacityConfig, Orchestrator, OrchestratorConfig, VenueConfig};
//! use liquidity_simulator_core_rs::{Action, ExecutionParams, ScriptedStrategy};
//! use rust_decimal_macros::dec;
//!
//! let params = ExecutionParams {
//!     gas_cost: dec!(0.0001),
//!     execution_surplus: dec!(1.0005),
//!     bridging_delay: 4,
//!     inventory_lock_delay: 4,
//! };
//! let venue = |name: &str, balance| VenueConfig {
//!     name: name.to_string(),
//!     opening_balance: balance,
//!     orderflow: Some(CapacityConfig::uncapped(dec!(10), dec!(0))),
//!     outflow: Some(CapacityConfig::uncapped(dec!(30), dec!(0))),
//!     params: Some(params.clone()),
//! };
//! let config = OrchestratorConfig {
//!     topology: Default::default(),
//!     venues: vec![venue("A", dec!(10)), venue("B", dec!(0))],
//!     routes: vec![],
//!     report_interval: None,
//! };
//!
//! let strategy = ScriptedStrategy::default().at(0, Action::bridge("A", "B", dec!(2)));
//! let mut orchestrator = Orchestrator::new(config, Box::new(strategy)).unwrap();
//!
//! let summary = orchestrator.run(5);
//! assert_eq!(summary.num_executed, 1);
//! assert_eq!(orchestrator.registry().venue("B").unwrap().balance(), dec!(1.9999));
//! ```

use crate::core::time::TimeManager;
use crate::execution::execute_action;
use crate::models::capacity::Capacity;
use crate::models::event::{Event, EventLog};
use crate::models::registry::{ConfigError, Registry, Topology};
use crate::models::route::Route;
use crate::models::venue::{ExecutionParams, Venue};
use crate::orchestrator::checkpoint::{compute_config_hash, StateSnapshot};
use crate::policy::{Strategy, StrategyConfig};
use crate::settlement::settle_locked_balances;
use crate::Amount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete orchestrator configuration
///
/// # Fields
///
/// * `topology` - Whether capacities live on venues or on routes
/// * `venues` - Venues in declared order
/// * `routes` - Routes in declared order (per-route topology only)
/// * `report_interval` - Ticks between periodic reports (None = never)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    #[serde(default)]
    pub topology: Topology,

    pub venues: Vec<VenueConfig>,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    #[serde(default)]
    pub report_interval: Option<usize>,
}

/// Per-venue configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Unique venue name
    pub name: String,

    /// Spendable balance at tick 0
    pub opening_balance: Amount,

    /// Order-flow capacity (required by the per-venue topology)
    #[serde(default)]
    pub orderflow: Option<CapacityConfig>,

    /// Outflow capacity (required by the per-venue topology)
    #[serde(default)]
    pub outflow: Option<CapacityConfig>,

    /// Execution parameters (required by the per-venue topology)
    #[serde(default)]
    pub params: Option<ExecutionParams>,
}

/// Per-route configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub orderflow: CapacityConfig,
    pub outflow: CapacityConfig,
    pub params: ExecutionParams,
}

/// Capacity configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Capacity available at tick 0
    pub initial: Amount,

    /// Amount regenerated at the start of every tick
    pub regen_per_tick: Amount,

    /// Upper bound (None = grows without bound)
    #[serde(default)]
    pub cap: Option<Amount>,
}

impl CapacityConfig {
    /// Capacity that grows without bound
    pub fn uncapped(initial: Amount, regen_per_tick: Amount) -> Self {
        Self {
            initial,
            regen_per_tick,
            cap: None,
        }
    }

    /// Capacity capped at `multiple` times its initial value (saturating)
    pub fn capped_at_multiple(initial: Amount, regen_per_tick: Amount, multiple: Amount) -> Self {
        Self {
            initial,
            regen_per_tick,
            cap: Some(initial.saturating_mul(multiple)),
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        non_negative(&format!("{}.initial", field), self.initial)?;
        non_negative(&format!("{}.regen_per_tick", field), self.regen_per_tick)?;
        if let Some(cap) = self.cap {
            non_negative(&format!("{}.cap", field), cap)?;
            if self.initial > cap {
                return Err(ConfigError::InitialAboveCap {
                    field: field.to_string(),
                    initial: self.initial,
                    cap,
                });
            }
        }
        Ok(())
    }

    fn build(&self) -> Capacity {
        Capacity::new(self.initial, self.regen_per_tick, self.cap)
    }
}

fn non_negative(field: &str, value: Amount) -> Result<(), ConfigError> {
    if value < Amount::ZERO {
        return Err(ConfigError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_params(field: &str, params: &ExecutionParams) -> Result<(), ConfigError> {
    non_negative(&format!("{}.gas_cost", field), params.gas_cost)?;
    non_negative(&format!("{}.execution_surplus", field), params.execution_surplus)
}

// ============================================================================
// Reporting Types
// ============================================================================

/// Spendable, locked and total value of one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueTotals {
    pub name: String,
    pub spendable: Amount,
    pub locked: Amount,
    pub total: Amount,
}

impl From<&Venue> for VenueTotals {
    fn from(venue: &Venue) -> Self {
        VenueTotals {
            name: venue.name().to_string(),
            spendable: venue.balance(),
            locked: venue.locked_total(),
            total: venue.total_value(),
        }
    }
}

/// Aggregate state of every venue at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReport {
    pub tick: usize,
    pub venues: Vec<VenueTotals>,
    pub grand_total: Amount,
}

impl StateReport {
    pub fn from_registry(registry: &Registry, tick: usize) -> Self {
        let venues: Vec<VenueTotals> = registry.venues().iter().map(VenueTotals::from).collect();
        let grand_total = venues.iter().map(|v| v.total).sum();
        StateReport {
            tick,
            venues,
            grand_total,
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Actions the strategy proposed
    pub num_proposed: usize,

    /// Actions applied
    pub num_executed: usize,

    /// Actions rejected
    pub num_rejected: usize,

    /// Locked entries credited this tick
    pub num_settlements: usize,

    /// Value moved from locked to spendable this tick
    pub settled_value: Amount,
}

/// Aggregate outcome of `Orchestrator::run`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks_run: usize,
    pub initial: StateReport,
    pub final_state: StateReport,
    pub num_executed: usize,
    pub num_rejected: usize,
    pub num_settlements: usize,
}

impl RunSummary {
    /// Change in total value over the run (gas spent net of execution surplus)
    pub fn value_change(&self) -> Amount {
        self.final_state.grand_total - self.initial.grand_total
    }
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator managing simulation state and tick loop
///
/// Owns the registry exclusively. The strategy only ever sees a shared
/// borrow of it; settlement and execution take it mutably, one phase at a
/// time.
///
/// # Determinism
///
/// There is no randomness and no wall-clock input. Same config + same
/// strategy = identical event log and state digest at every tick.
pub struct Orchestrator {
    /// Venues, routes, capacities and locked queues
    registry: Registry,

    /// Time management
    time_manager: TimeManager,

    /// Decision-making strategy
    strategy: Box<dyn Strategy>,

    /// Event log (all simulation events)
    event_log: EventLog,

    /// SHA256 of the configuration the run started from
    config_hash: String,
}

impl Orchestrator {
    /// Create new orchestrator from configuration and a strategy
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Successfully initialized orchestrator
    /// * `Err(SimulationError::Config)` - Configuration validation failed
    pub fn new(config: OrchestratorConfig, strategy: Box<dyn Strategy>) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;
        let config_hash = compute_config_hash(&config)?;

        let venues = config
            .venues
            .iter()
            .map(|vc| {
                let venue = Venue::new(vc.name.clone(), vc.opening_balance).with_capacities(
                    vc.orderflow.as_ref().map(CapacityConfig::build),
                    vc.outflow.as_ref().map(CapacityConfig::build),
                );
                match &vc.params {
                    Some(params) => venue.with_params(params.clone()),
                    None => venue,
                }
            })
            .collect();

        let routes = config
            .routes
            .iter()
            .map(|rc| {
                Route::new(
                    rc.name.clone(),
                    rc.source.clone(),
                    rc.destination.clone(),
                    rc.orderflow.build(),
                    rc.outflow.build(),
                    rc.params.clone(),
                )
            })
            .collect();

        let registry = Registry::new(config.topology, venues, routes)?;

        Ok(Self {
            registry,
            time_manager: TimeManager::new(config.report_interval),
            strategy,
            event_log: EventLog::new(),
            config_hash,
        })
    }

    /// Create an orchestrator running one of the reference strategies
    pub fn from_config(config: OrchestratorConfig, strategy: &StrategyConfig) -> Result<Self, SimulationError> {
        Self::new(config, strategy.build())
    }

    /// Check numeric fields before anything is constructed
    ///
    /// Structural checks (names, topology requirements) happen in
    /// `Registry::new`.
    fn validate_config(config: &OrchestratorConfig) -> Result<(), ConfigError> {
        if config.report_interval == Some(0) {
            return Err(ConfigError::ZeroReportInterval);
        }

        for venue in &config.venues {
            non_negative(&format!("{}.opening_balance", venue.name), venue.opening_balance)?;
            if let Some(capacity) = &venue.orderflow {
                capacity.validate(&format!("{}.orderflow", venue.name))?;
            }
            if let Some(capacity) = &venue.outflow {
                capacity.validate(&format!("{}.outflow", venue.name))?;
            }
            if let Some(params) = &venue.params {
                validate_params(&format!("{}.params", venue.name), params)?;
            }
        }

        for route in &config.routes {
            route.orderflow.validate(&format!("{}.orderflow", route.name))?;
            route.outflow.validate(&format!("{}.outflow", route.name))?;
            validate_params(&format!("{}.params", route.name), &route.params)?;
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current tick
    pub fn current_tick(&self) -> usize {
        self.time_manager.current_tick()
    }

    /// Read-only view of venues and routes
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn event_count(&self) -> usize {
        self.event_log.len()
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// SHA256 of the configuration this orchestrator was built from
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Aggregate state report as of now
    pub fn report(&self) -> StateReport {
        StateReport::from_registry(&self.registry, self.current_tick())
    }

    /// Snapshot of the full registry state
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.registry, self.current_tick())
    }

    /// SHA256 hex digest of the full registry state
    pub fn state_digest(&self) -> Result<String, SimulationError> {
        self.snapshot().digest()
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Execute one simulation tick
    ///
    /// Infallible: rejected actions are logged and skipped.
    pub fn tick(&mut self) -> TickResult {
        let tick = self.current_tick();

        // STEP 1: REPLENISH
        self.registry.replenish_all();

        // STEP 2: STRATEGY
        let actions = self.strategy.propose_actions(&self.registry, tick);
        self.log_event(Event::StrategyProposed {
            tick,
            num_actions: actions.len(),
        });

        // STEP 3: SETTLE
        let settlement = settle_locked_balances(&mut self.registry, tick);
        for event in settlement.events {
            self.log_event(event);
        }

        // STEP 4: EXECUTE (in submission order; later actions see earlier effects)
        let mut num_executed = 0;
        let mut num_rejected = 0;
        for action in &actions {
            match execute_action(&mut self.registry, action) {
                Ok(receipt) => {
                    num_executed += 1;
                    self.log_event(receipt.to_event(tick));
                }
                Err(reason) => {
                    num_rejected += 1;
                    self.log_event(Event::ActionRejected {
                        tick,
                        kind: action.kind,
                        source: action.source.clone(),
                        destination: action.destination.clone(),
                        route: action.route.clone(),
                        amount: action.amount,
                        reason,
                    });
                }
            }
        }

        // STEP 5: PERIODIC REPORT
        if self.time_manager.is_report_tick() {
            let report = self.report();
            self.log_event(Event::PeriodicReport { tick, report });
        }

        // STEP 6: ADVANCE TIME
        self.time_manager.advance_tick();

        TickResult {
            tick,
            num_proposed: actions.len(),
            num_executed,
            num_rejected,
            num_settlements: settlement.settled_count,
            settled_value: settlement.settled_value,
        }
    }

    /// Run `ticks` ticks, reporting aggregate state before and after
    pub fn run(&mut self, ticks: usize) -> RunSummary {
        let initial = self.report();
        let mut num_executed = 0;
        let mut num_rejected = 0;
        let mut num_settlements = 0;

        for _ in 0..ticks {
            let result = self.tick();
            num_executed += result.num_executed;
            num_rejected += result.num_rejected;
            num_settlements += result.num_settlements;
        }

        RunSummary {
            ticks_run: ticks,
            initial,
            final_state: self.report(),
            num_executed,
            num_rejected,
            num_settlements,
        }
    }

    fn log_event(&mut self, event: Event) {
        self.event_log.log(event);
    }
}

// Manual Debug implementation (strategies don't implement Debug)
impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("current_tick", &self.current_tick())
            .field("topology", &self.registry.topology())
            .field("num_venues", &self.registry.num_venues())
            .field("num_routes", &self.registry.routes().len())
            .field("strategy", &self.strategy.name())
            .field("event_count", &self.event_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::action::Action;
    use crate::policy::ScriptedStrategy;
    use rust_decimal_macros::dec;

    fn params() -> ExecutionParams {
        ExecutionParams {
            gas_cost: dec!(0.0001),
            execution_surplus: dec!(1.0005),
            bridging_delay: 4,
            inventory_lock_delay: 4,
        }
    }

    fn venue(name: &str, balance: Amount) -> VenueConfig {
        VenueConfig {
            name: name.to_string(),
            opening_balance: balance,
            orderflow: Some(CapacityConfig::uncapped(dec!(10), dec!(0))),
            outflow: Some(CapacityConfig::uncapped(dec!(30), dec!(0))),
            params: Some(params()),
        }
    }

    fn create_test_config() -> OrchestratorConfig {
        OrchestratorConfig {
            topology: Topology::PerVenue,
            venues: vec![venue("A", dec!(10)), venue("B", dec!(0))],
            routes: vec![],
            report_interval: None,
        }
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = Orchestrator::from_config(create_test_config(), &StrategyConfig::Idle).unwrap();

        assert_eq!(orchestrator.current_tick(), 0);
        assert_eq!(orchestrator.registry().num_venues(), 2);
        assert_eq!(orchestrator.strategy_name(), "idle");
        assert_eq!(orchestrator.config_hash().len(), 64);
    }

    #[test]
    fn test_negative_balance_rejected() {
        let mut config = create_test_config();
        config.venues[1].opening_balance = dec!(-1);

        let err = Orchestrator::from_config(config, &StrategyConfig::Idle).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Config(ConfigError::NegativeValue {
                field: "B.opening_balance".to_string(),
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn test_initial_above_cap_rejected() {
        let mut config = create_test_config();
        config.venues[0].outflow = Some(CapacityConfig {
            initial: dec!(30),
            regen_per_tick: dec!(1),
            cap: Some(dec!(20)),
        });

        let err = Orchestrator::from_config(config, &StrategyConfig::Idle).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Config(ConfigError::InitialAboveCap { .. })
        ));
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let mut config = create_test_config();
        config.report_interval = Some(0);

        let err = Orchestrator::from_config(config, &StrategyConfig::Idle).unwrap_err();
        assert_eq!(err, SimulationError::Config(ConfigError::ZeroReportInterval));
    }

    #[test]
    fn test_capped_at_multiple() {
        let capacity = CapacityConfig::capped_at_multiple(dec!(30), dec!(0.24), dec!(1.5));
        assert_eq!(capacity.cap, Some(dec!(45)));
    }

    #[test]
    fn test_tick_advances_time_and_logs_proposal() {
        let mut orchestrator = Orchestrator::from_config(create_test_config(), &StrategyConfig::Idle).unwrap();

        let result = orchestrator.tick();
        assert_eq!(result.tick, 0);
        assert_eq!(result.num_proposed, 0);
        assert_eq!(orchestrator.current_tick(), 1);
        assert_eq!(orchestrator.event_log().events_of_type("StrategyProposed").len(), 1);
    }

    #[test]
    fn test_rejection_logged_and_tick_continues() {
        let strategy = ScriptedStrategy::default()
            .at(0, Action::bridge("A", "B", dec!(50)))
            .at(0, Action::bridge("A", "B", dec!(1)));
        let mut orchestrator = Orchestrator::new(create_test_config(), Box::new(strategy)).unwrap();

        let result = orchestrator.tick();
        assert_eq!(result.num_rejected, 1);
        assert_eq!(result.num_executed, 1);

        let types: Vec<_> = orchestrator.event_log().events().iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["StrategyProposed", "ActionRejected", "ActionExecuted"]);
    }

    #[test]
    fn test_unrepresentable_credit_rejected_and_tick_completes() {
        let big = dec!(100000000000000);
        let mut config = create_test_config();
        config.venues[0].opening_balance = big;
        for venue in &mut config.venues {
            venue.orderflow = Some(CapacityConfig::uncapped(big, dec!(0)));
            if let Some(p) = venue.params.as_mut() {
                p.execution_surplus = dec!(1000000000000000);
            }
        }
        let strategy = ScriptedStrategy::default().at(0, Action::execute("A", "B", big));
        let mut orchestrator = Orchestrator::new(config, Box::new(strategy)).unwrap();

        let result = orchestrator.tick();
        assert_eq!(result.num_rejected, 1);
        assert_eq!(orchestrator.current_tick(), 1);
        assert_eq!(orchestrator.registry().total_value(), big);
        match orchestrator.event_log().events_of_type("ActionRejected")[0] {
            Event::ActionRejected { reason, .. } => assert_eq!(reason.code(), "arithmetic_overflow"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_uncapped_regen_saturates_over_run() {
        let mut config = create_test_config();
        config.venues[0].outflow = Some(CapacityConfig::uncapped(dec!(30), dec!(10000000000000000000000000000)));
        config.report_interval = Some(1);
        let mut orchestrator = Orchestrator::from_config(config, &StrategyConfig::Idle).unwrap();

        let summary = orchestrator.run(10);
        assert_eq!(summary.ticks_run, 10);
        let a = orchestrator.registry().venue("A").unwrap();
        assert_eq!(a.outflow().unwrap().current(), Amount::MAX);
        assert_eq!(summary.final_state.grand_total, dec!(10));
    }

    #[test]
    fn test_periodic_report_every_interval() {
        let mut config = create_test_config();
        config.report_interval = Some(3);
        let mut orchestrator = Orchestrator::from_config(config, &StrategyConfig::Idle).unwrap();

        orchestrator.run(7);
        let ticks: Vec<_> = orchestrator
            .event_log()
            .events_of_type("PeriodicReport")
            .iter()
            .map(|e| e.tick())
            .collect();
        assert_eq!(ticks, vec![0, 3, 6]);
    }

    #[test]
    fn test_debug_output() {
        let orchestrator = Orchestrator::from_config(create_test_config(), &StrategyConfig::Idle).unwrap();
        let debug = format!("{:?}", orchestrator);
        assert!(debug.contains("num_venues: 2"));
        assert!(debug.contains("\"idle\""));
    }
}
