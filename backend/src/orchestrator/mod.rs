//! Orchestrator - main simulation loop
//!
//! Owns the registry, the clock, the strategy and the event log, and drives
//! them through the tick phases.
//!
//! See `engine.rs` for full implementation.

pub mod checkpoint;
pub mod engine;


// Re-export main types for convenience
pub use engine::{
    CapacityConfig, Orchestrator, OrchestratorConfig, RouteConfig, RunSummary, SimulationError, StateReport,
    TickResult, VenueConfig, VenueTotals,
};

// Re-export checkpoint types
pub use checkpoint::{compute_config_hash, validate_snapshot, RouteSnapshot, StateSnapshot, VenueSnapshot};
