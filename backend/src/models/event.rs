//! Event logging for simulation replay and auditing.
//!
//! This module defines the Event enum which captures all significant state changes
//! during simulation. The engine never prints; reporting collaborators render
//! these values however they need.
//!
//! # Event Types
//!
//! Events are categorized by tick phase:
//! - **Strategy**: Number of actions the strategy proposed
//! - **Settlement**: Locked balance matured and became spendable
//! - **Execution**: Action executed or rejected (with reason)
//! - **Report**: Periodic aggregate state report
//!
//! # Example
//!
//! ```rust
//! use liquidity_simulator_core_rs::Event;
//! use rust_decimal_macros::dec;
//!
//! let event = Event::LockedBalanceSettled {
//!     tick: 4,
//!     venue: "B".to_string(),
//!     amount: dec!(1.9999),
//! };
//!
//! assert_eq!(event.tick(), 4);
//! assert_eq!(event.venue(), Some("B"));
//! ```

use crate::execution::RejectionReason;
use crate::models::action::ActionKind;
use crate::orchestrator::StateReport;
use crate::Amount;
use serde::Serialize;

/// Simulation event capturing a state change.
///
/// All events include a tick number for temporal ordering.
/// Events are logged in the order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Strategy produced its action list for this tick
    StrategyProposed { tick: usize, num_actions: usize },

    /// Locked balance matured and was credited to the venue
    LockedBalanceSettled {
        tick: usize,
        venue: String,
        amount: Amount,
    },

    /// Action passed validation and was applied
    ActionExecuted {
        tick: usize,
        kind: ActionKind,
        source: String,
        destination: String,
        route: Option<String>,
        amount: Amount,
        gas_cost: Amount,
        credited: Amount,
        delay: usize,
    },

    /// Action failed validation; no state changed
    ActionRejected {
        tick: usize,
        kind: ActionKind,
        source: String,
        destination: String,
        /// Route the action was pinned to, if any
        route: Option<String>,
        amount: Amount,
        reason: RejectionReason,
    },

    /// Periodic aggregate report
    PeriodicReport { tick: usize, report: StateReport },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::StrategyProposed { tick, .. } => *tick,
            Event::LockedBalanceSettled { tick, .. } => *tick,
            Event::ActionExecuted { tick, .. } => *tick,
            Event::ActionRejected { tick, .. } => *tick,
            Event::PeriodicReport { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::StrategyProposed { .. } => "StrategyProposed",
            Event::LockedBalanceSettled { .. } => "LockedBalanceSettled",
            Event::ActionExecuted { .. } => "ActionExecuted",
            Event::ActionRejected { .. } => "ActionRejected",
            Event::PeriodicReport { .. } => "PeriodicReport",
        }
    }

    /// Get the venue an event primarily concerns
    ///
    /// Settlements report the credited venue; actions report their source.
    pub fn venue(&self) -> Option<&str> {
        match self {
            Event::LockedBalanceSettled { venue, .. } => Some(venue),
            Event::ActionExecuted { source, .. } => Some(source),
            Event::ActionRejected { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the event touches `venue`, as source or destination of an action
    pub fn involves(&self, venue: &str) -> bool {
        match self {
            Event::ActionExecuted {
                source, destination, ..
            }
            | Event::ActionRejected {
                source, destination, ..
            } => source == venue || destination == venue,
            _ => self.venue() == Some(venue),
        }
    }
}

/// Event log for storing and querying simulation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events involving a venue
    ///
    /// Actions match on either endpoint, so a venue sees the executions
    /// credited to it as well as the ones it funded.
    pub fn events_for_venue(&self, venue: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.involves(venue)).collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn settled(tick: usize, venue: &str) -> Event {
        Event::LockedBalanceSettled {
            tick,
            venue: venue.to_string(),
            amount: dec!(1),
        }
    }

    #[test]
    fn test_event_log_filters() {
        let mut log = EventLog::new();
        log.log(Event::StrategyProposed {
            tick: 0,
            num_actions: 2,
        });
        log.log(settled(1, "A"));
        log.log(settled(1, "B"));
        log.log(settled(2, "A"));

        assert_eq!(log.len(), 4);
        assert_eq!(log.events_at_tick(1).len(), 2);
        assert_eq!(log.events_of_type("LockedBalanceSettled").len(), 3);
        assert_eq!(log.events_for_venue("A").len(), 2);
    }

    #[test]
    fn test_events_for_venue_matches_destination() {
        let mut log = EventLog::new();
        log.log(Event::ActionExecuted {
            tick: 0,
            kind: ActionKind::Bridge,
            source: "A".to_string(),
            destination: "B".to_string(),
            route: None,
            amount: dec!(2),
            gas_cost: dec!(0.0001),
            credited: dec!(1.9999),
            delay: 4,
        });
        log.log(Event::ActionRejected {
            tick: 0,
            kind: ActionKind::Execute,
            source: "C".to_string(),
            destination: "B".to_string(),
            route: Some("c-b".to_string()),
            amount: dec!(5),
            reason: RejectionReason::InsufficientSourceFunds {
                venue: "C".to_string(),
                required: dec!(5),
                available: dec!(0),
            },
        });
        log.log(settled(4, "B"));

        assert_eq!(log.events_for_venue("B").len(), 3);
        assert_eq!(log.events_for_venue("A").len(), 1);
        assert_eq!(log.events_for_venue("C").len(), 1);

        let json = serde_json::to_value(&log.events()[1]).unwrap();
        assert_eq!(json["route"], "c-b");
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(settled(3, "C")).unwrap();
        assert_eq!(json["type"], "LockedBalanceSettled");
        assert_eq!(json["venue"], "C");
        assert_eq!(json["tick"], 3);
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new();
        log.log(settled(0, "A"));
        log.clear();
        assert!(log.is_empty());
    }
}
