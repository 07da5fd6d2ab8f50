//! Time management for the simulation
//!
//! The simulation operates in discrete ticks. An optional report interval
//! marks the ticks on which a periodic state report is emitted.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks
///
/// # Example
/// ```
/// use liquidity_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new(Some(100));
/// assert_eq!(time.current_tick(), 0);
/// assert!(time.is_report_tick());
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// assert!(!time.is_report_tick());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Emit a periodic report every `report_interval` ticks (None = never)
    report_interval: Option<usize>,
}

impl TimeManager {
    /// Create a new TimeManager
    ///
    /// # Arguments
    /// * `report_interval` - Ticks between periodic reports, or `None`
    ///
    /// # Panics
    ///
    /// Panics if `report_interval` is `Some(0)`.
    pub fn new(report_interval: Option<usize>) -> Self {
        assert!(
            report_interval != Some(0),
            "report_interval must be positive"
        );
        Self {
            current_tick: 0,
            report_interval,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Check whether the current tick is a periodic report tick
    ///
    /// Tick 0 counts as a report tick when an interval is configured.
    pub fn is_report_tick(&self) -> bool {
        match self.report_interval {
            Some(interval) => self.current_tick % interval == 0,
            None => false,
        }
    }

    /// Get the configured report interval
    pub fn report_interval(&self) -> Option<usize> {
        self.report_interval
    }
}
