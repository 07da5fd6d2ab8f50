//! Console rendering of engine events and reports

use liquidity_simulator_core_rs::{Event, RunSummary, StateReport};
use tracing::{debug, info, warn};

/// Log one engine event at the level matching its significance
pub fn log_event(event: &Event) {
    match event {
        Event::StrategyProposed { tick, num_actions } => {
            if *num_actions > 0 {
                debug!(tick, actions = num_actions, "Strategy proposed actions");
            }
        }
        Event::LockedBalanceSettled { tick, venue, amount } => {
            debug!(tick, venue = %venue, amount = %amount, "Locked balance now available");
        }
        Event::ActionExecuted {
            tick,
            kind,
            source,
            destination,
            route,
            amount,
            gas_cost,
            credited,
            delay,
        } => {
            debug!(
                tick,
                kind = %kind,
                source = %source,
                destination = %destination,
                route = route.as_deref().unwrap_or("-"),
                amount = %amount,
                gas = %gas_cost,
                credited = %credited,
                delay,
                "Action executed"
            );
        }
        Event::ActionRejected {
            tick,
            kind,
            source,
            destination,
            route,
            amount,
            reason,
        } => {
            warn!(
                tick,
                kind = %kind,
                source = %source,
                destination = %destination,
                route = route.as_deref().unwrap_or("-"),
                amount = %amount,
                code = reason.code(),
                "Action rejected: {}",
                reason
            );
        }
        Event::PeriodicReport { report, .. } => log_state_report("Periodic report", report),
    }
}

/// Log per-venue spendable, locked and total value plus the grand total
pub fn log_state_report(label: &str, report: &StateReport) {
    for venue in &report.venues {
        info!(
            tick = report.tick,
            venue = %venue.name,
            spendable = %venue.spendable,
            locked = %venue.locked,
            total = %venue.total,
            "{}",
            label
        );
    }
    info!(tick = report.tick, grand_total = %report.grand_total, "{}", label);
}

pub fn log_run_summary(summary: &RunSummary) {
    info!(
        ticks = summary.ticks_run,
        executed = summary.num_executed,
        rejected = summary.num_rejected,
        settlements = summary.num_settlements,
        value_change = %summary.value_change(),
        "Simulation finished"
    );
}
