//! Domain models for the liquidity simulator

pub mod action;
pub mod capacity;
pub mod event;
pub mod locked;
pub mod registry;
pub mod route;
pub mod venue;

// Re-exports
pub use action::{Action, ActionKind};
pub use capacity::{Capacity, CapacityError, CapacityKind};
pub use event::{Event, EventLog};
pub use locked::{LockedBalance, LockedQueue};
pub use registry::{ConfigError, Registry, Topology};
pub use route::Route;
pub use venue::{ExecutionParams, Venue, VenueError};
