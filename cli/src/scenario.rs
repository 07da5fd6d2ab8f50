//! Built-in reference scenario
//!
//! Three venues in the per-venue topology, every capacity capped at 1.5x its
//! initial value. Only A starts funded.

use liquidity_simulator_core_rs::{
    Action, Amount, CapacityConfig, ExecutionParams, OrchestratorConfig, StrategyConfig, ThresholdRule, Topology,
    VenueConfig,
};
use rust_decimal_macros::dec;

/// Ceiling applied to every capacity, as a multiple of its initial value
const CAP_MULTIPLE: Amount = dec!(1.5);

struct Seed {
    name: &'static str,
    opening_balance: Amount,
    orderflow: (Amount, Amount),
    outflow: (Amount, Amount),
    gas_cost: Amount,
    execution_surplus: Amount,
    bridging_delay: usize,
    inventory_lock_delay: usize,
}

const SEEDS: [Seed; 3] = [
    // High order flow, slow bridging, cheap gas
    Seed {
        name: "A",
        opening_balance: dec!(10),
        orderflow: (dec!(10), dec!(0.64)),
        outflow: (dec!(30), dec!(0.24)),
        gas_cost: dec!(0.0001),
        execution_surplus: dec!(1.0005),
        bridging_delay: 4,
        inventory_lock_delay: 4,
    },
    Seed {
        name: "B",
        opening_balance: dec!(0),
        orderflow: (dec!(30), dec!(0.38)),
        outflow: (dec!(10), dec!(0.4)),
        gas_cost: dec!(0.0005),
        execution_surplus: dec!(1.0003),
        bridging_delay: 6,
        inventory_lock_delay: 6,
    },
    // Thin order flow, fast bridging, expensive gas
    Seed {
        name: "C",
        opening_balance: dec!(0),
        orderflow: (dec!(40), dec!(0.24)),
        outflow: (dec!(30), dec!(0.61)),
        gas_cost: dec!(0.0008),
        execution_surplus: dec!(1.0009),
        bridging_delay: 4,
        inventory_lock_delay: 8,
    },
];

pub fn reference_config(report_interval: Option<usize>) -> OrchestratorConfig {
    let venues = SEEDS
        .iter()
        .map(|seed| VenueConfig {
            name: seed.name.to_string(),
            opening_balance: seed.opening_balance,
            orderflow: Some(CapacityConfig::capped_at_multiple(
                seed.orderflow.0,
                seed.orderflow.1,
                CAP_MULTIPLE,
            )),
            outflow: Some(CapacityConfig::capped_at_multiple(
                seed.outflow.0,
                seed.outflow.1,
                CAP_MULTIPLE,
            )),
            params: Some(ExecutionParams {
                gas_cost: seed.gas_cost,
                execution_surplus: seed.execution_surplus,
                bridging_delay: seed.bridging_delay,
                inventory_lock_delay: seed.inventory_lock_delay,
            }),
        })
        .collect();

    OrchestratorConfig {
        topology: Topology::PerVenue,
        venues,
        routes: vec![],
        report_interval,
    }
}

/// Bridge 2 from A to B, and fill orders of 5 on B funded towards A
pub fn reference_strategy() -> StrategyConfig {
    StrategyConfig::Threshold {
        rules: vec![
            ThresholdRule::new(Action::bridge("A", "B", dec!(2))),
            ThresholdRule::new(Action::execute("B", "A", dec!(5))),
        ],
    }
}
