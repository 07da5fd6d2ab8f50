//! Route model (per-route topology)
//!
//! A route is a directed link from one venue to another with its own
//! capacities and execution parameters. Venues are referenced by name and
//! resolved through the registry on every lookup.

use crate::models::capacity::{Capacity, CapacityKind};
use crate::models::venue::ExecutionParams;
use serde::{Deserialize, Serialize};

/// Directed link between two venues
///
/// Parameters are fixed at construction; only the two capacity counters
/// change while the simulation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    name: String,
    source: String,
    destination: String,
    orderflow: Capacity,
    outflow: Capacity,
    params: ExecutionParams,
}

impl Route {
    pub fn new(
        name: String,
        source: String,
        destination: String,
        orderflow: Capacity,
        outflow: Capacity,
        params: ExecutionParams,
    ) -> Self {
        Self {
            name,
            source,
            destination,
            orderflow,
            outflow,
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the venue funds leave from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the venue funds arrive at
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether this route carries funds from `source` to `destination`
    pub fn connects(&self, source: &str, destination: &str) -> bool {
        self.source == source && self.destination == destination
    }

    pub fn capacity(&self, kind: CapacityKind) -> &Capacity {
        match kind {
            CapacityKind::OrderFlow => &self.orderflow,
            CapacityKind::Outflow => &self.outflow,
        }
    }

    pub(crate) fn capacity_mut(&mut self, kind: CapacityKind) -> &mut Capacity {
        match kind {
            CapacityKind::OrderFlow => &mut self.orderflow,
            CapacityKind::Outflow => &mut self.outflow,
        }
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Regenerate both capacities by one tick
    pub fn replenish(&mut self) {
        self.orderflow.replenish();
        self.outflow.replenish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn route(name: &str, source: &str, destination: &str) -> Route {
        Route::new(
            name.to_string(),
            source.to_string(),
            destination.to_string(),
            Capacity::new(dec!(10), dec!(1), None),
            Capacity::new(dec!(20), dec!(2), Some(dec!(30))),
            ExecutionParams {
                gas_cost: dec!(0.001),
                execution_surplus: dec!(1.0005),
                bridging_delay: 4,
                inventory_lock_delay: 2,
            },
        )
    }

    #[test]
    fn test_connects_is_directional() {
        let r = route("ab", "A", "B");
        assert!(r.connects("A", "B"));
        assert!(!r.connects("B", "A"));
    }

    #[test]
    fn test_connects_requires_full_name_match() {
        let r = route("arb-bas", "ARB", "BASE");
        assert!(!r.connects("A", "B"));
        assert!(!r.connects("AR", "BASE"));
        assert!(r.connects("ARB", "BASE"));
    }

    #[test]
    fn test_replenish_both_capacities() {
        let mut r = route("ab", "A", "B");
        r.replenish();
        assert_eq!(r.capacity(CapacityKind::OrderFlow).current(), dec!(11));
        assert_eq!(r.capacity(CapacityKind::Outflow).current(), dec!(22));
    }
}
