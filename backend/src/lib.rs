//! Liquidity Simulator Core - Rust Engine
//!
//! Discrete-time simulation of liquidity moving between venues over
//! bridging and execution routes, with deterministic execution.
//!
//! # Architecture
//!
//! - **core**: Tick clock
//! - **models**: Domain types (Venue, Route, Capacity, LockedBalance, Action, Registry)
//! - **policy**: Strategy interface and reference strategies
//! - **execution**: Action validation and execution
//! - **settlement**: Locked-balance maturity and crediting
//! - **orchestrator**: Main simulation loop
//!
//! # Critical Invariants
//!
//! 1. All money values are `Decimal` (exact, never binary floating point)
//! 2. A rejected action leaves venue and route state untouched
//! 3. Same config + same strategy = identical event log and state digest

// Module declarations
pub mod core;
pub mod execution;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod settlement;

/// Monetary amount used throughout the engine.
pub type Amount = rust_decimal::Decimal;

// Re-exports for convenience
pub use core::time::TimeManager;
pub use execution::{execute_action, validate_action, ActionReceipt, RejectionReason};
pub use models::{
    action::{Action, ActionKind},
    capacity::{Capacity, CapacityKind},
    event::{Event, EventLog},
    locked::{LockedBalance, LockedQueue},
    registry::{ConfigError, Registry, Topology},
    route::Route,
    venue::{ExecutionParams, Venue},
};
pub use orchestrator::{
    CapacityConfig, Orchestrator, OrchestratorConfig, RouteConfig, RunSummary, SimulationError,
    StateReport, TickResult, VenueConfig, VenueTotals,
};
pub use policy::{IdleStrategy, ScriptedStrategy, Strategy, StrategyConfig, ThresholdRule, ThresholdStrategy};
pub use settlement::settle_locked_balances;
