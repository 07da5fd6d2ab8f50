//! Checkpoint - State Snapshots and Digests
//!
//! Captures the complete registry state (balances, capacities, locked queues,
//! routes) as plain serde data. Snapshots are only ever taken, never
//! restored: their job is to make two runs comparable bit for bit.
//!
//! # Critical Invariants
//!
//! - **Determinism**: same config + same strategy produces the same digest at every tick
//! - **Non-negativity**: no balance, capacity or locked amount is ever negative
//! - **Cap Bound**: a capped capacity never exceeds its cap

use crate::models::capacity::Capacity;
use crate::models::locked::LockedBalance;
use crate::models::registry::{Registry, Topology};
use crate::models::route::Route;
use crate::models::venue::{ExecutionParams, Venue};
use crate::orchestrator::SimulationError;
use crate::Amount;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Snapshot Structures
// ============================================================================

/// Complete registry state at the start of a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Tick the snapshot was taken at (next tick to run)
    pub tick: usize,

    pub topology: Topology,

    /// All venues in declared order
    pub venues: Vec<VenueSnapshot>,

    /// All routes in declared order
    pub routes: Vec<RouteSnapshot>,
}

/// Venue state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSnapshot {
    pub name: String,
    pub balance: Amount,
    pub orderflow: Option<Capacity>,
    pub outflow: Option<Capacity>,
    pub params: Option<ExecutionParams>,
    pub locked: Vec<LockedBalance>,
}

impl From<&Venue> for VenueSnapshot {
    fn from(venue: &Venue) -> Self {
        VenueSnapshot {
            name: venue.name().to_string(),
            balance: venue.balance(),
            orderflow: venue.orderflow().cloned(),
            outflow: venue.outflow().cloned(),
            params: venue.params().cloned(),
            locked: venue.locked().entries().to_vec(),
        }
    }
}

/// Route state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub orderflow: Capacity,
    pub outflow: Capacity,
    pub params: ExecutionParams,
}

impl From<&Route> for RouteSnapshot {
    fn from(route: &Route) -> Self {
        use crate::models::capacity::CapacityKind;

        RouteSnapshot {
            name: route.name().to_string(),
            source: route.source().to_string(),
            destination: route.destination().to_string(),
            orderflow: route.capacity(CapacityKind::OrderFlow).clone(),
            outflow: route.capacity(CapacityKind::Outflow).clone(),
            params: route.params().clone(),
        }
    }
}

impl StateSnapshot {
    /// Capture the registry as of `tick`
    pub fn capture(registry: &Registry, tick: usize) -> Self {
        StateSnapshot {
            tick,
            topology: registry.topology(),
            venues: registry.venues().iter().map(VenueSnapshot::from).collect(),
            routes: registry.routes().iter().map(RouteSnapshot::from).collect(),
        }
    }

    /// Total spendable plus locked value across venues
    pub fn total_value(&self) -> Amount {
        self.venues
            .iter()
            .map(|v| v.balance + v.locked.iter().map(|l| l.amount()).sum::<Amount>())
            .sum()
    }

    /// SHA-256 hex digest of the snapshot's canonical JSON
    pub fn digest(&self) -> Result<String, SimulationError> {
        compute_config_hash(self)
    }
}

// ============================================================================
// Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of any serialisable value
///
/// Uses canonical JSON serialization with sorted keys, so the hash does not
/// depend on field declaration order.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| SimulationError::Serialization(format!("serialization failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| SimulationError::Serialization(format!("serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

/// Validate snapshot invariants
///
/// Checks:
/// - Balances and locked amounts are non-negative
/// - Capacities are non-negative and within their cap
/// - Total value equals `expected_total` when one is given
pub fn validate_snapshot(snapshot: &StateSnapshot, expected_total: Option<Amount>) -> Result<(), SimulationError> {
    let check_capacity = |owner: &str, label: &str, capacity: &Capacity| -> Result<(), SimulationError> {
        if capacity.current() < Amount::ZERO {
            return violation(format!("{} {} capacity is negative: {}", owner, label, capacity.current()));
        }
        if let Some(cap) = capacity.cap() {
            if capacity.current() > cap {
                return violation(format!(
                    "{} {} capacity {} exceeds cap {}",
                    owner,
                    label,
                    capacity.current(),
                    cap
                ));
            }
        }
        Ok(())
    };

    for venue in &snapshot.venues {
        if venue.balance < Amount::ZERO {
            return violation(format!("{} balance is negative: {}", venue.name, venue.balance));
        }
        if let Some(entry) = venue.locked.iter().find(|l| l.amount() < Amount::ZERO) {
            return violation(format!("{} has negative locked amount {}", venue.name, entry.amount()));
        }
        if let Some(capacity) = &venue.orderflow {
            check_capacity(&venue.name, "order-flow", capacity)?;
        }
        if let Some(capacity) = &venue.outflow {
            check_capacity(&venue.name, "outflow", capacity)?;
        }
    }

    for route in &snapshot.routes {
        check_capacity(&route.name, "order-flow", &route.orderflow)?;
        check_capacity(&route.name, "outflow", &route.outflow)?;
    }

    if let Some(expected) = expected_total {
        let total = snapshot.total_value();
        if total != expected {
            return violation(format!("total value {} differs from expected {}", total, expected));
        }
    }

    Ok(())
}

fn violation(msg: String) -> Result<(), SimulationError> {
    Err(SimulationError::InvariantViolation(msg))
}
