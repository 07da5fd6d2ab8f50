//! Venue / Route Registry
//!
//! Owns the authoritative lists of venues and routes for a simulation.
//!
//! # Topologies
//!
//! - **PerVenue**: each venue owns its capacities and execution parameters.
//!   An action from S to D draws on D's capacity and pays S's gas.
//! - **PerRoute**: capacities and parameters live on explicit routes. An
//!   action from S to D draws on the first declared route S→D (or the route
//!   it names).
//!
//! # Critical Invariants
//!
//! 1. **Name Uniqueness**: venue names and route names are unique (checked at construction)
//! 2. **Declared Order**: venues and routes are kept in the order given, so
//!    every scan (replenish, settle, lookup) is deterministic
//! 3. **No Orphan Routes**: every route references two existing, distinct venues

use crate::models::capacity::{Capacity, CapacityKind};
use crate::models::route::Route;
use crate::models::venue::{ExecutionParams, Venue};
use crate::Amount;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Who owns capacities and execution parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Capacities and parameters live on venues
    #[default]
    PerVenue,
    /// Capacities and parameters live on routes
    PerRoute,
}

/// Malformed seed data, fatal at construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Must have at least one venue")]
    NoVenues,

    #[error("Duplicate venue name: {0}")]
    DuplicateVenue(String),

    #[error("Duplicate route name: {0}")]
    DuplicateRoute(String),

    #[error("Route {route} references unknown venue {venue}")]
    UnknownRouteEndpoint { route: String, venue: String },

    #[error("Route {0} has the same source and destination")]
    SelfLoopRoute(String),

    #[error("Venue {venue} has no {kind} capacity (required by per-venue topology)")]
    MissingVenueCapacity { venue: String, kind: CapacityKind },

    #[error("Venue {0} has no execution parameters (required by per-venue topology)")]
    MissingVenueParams(String),

    #[error("Routes are not used by the per-venue topology ({0} declared)")]
    RoutesInPerVenueTopology(usize),

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: String, value: Amount },

    #[error("{field}: initial capacity {initial} exceeds cap {cap}")]
    InitialAboveCap {
        field: String,
        initial: Amount,
        cap: Amount,
    },

    #[error("report_interval must be > 0")]
    ZeroReportInterval,

    #[error("Total opening value across venues is not representable")]
    TotalValueOverflow,
}

/// Authoritative collection of venues and routes
///
/// # Example
///
/// ```rust
/// use liquidity_simulator_core_rs::{Registry, Topology, Venue};
/// use rust_decimal_macros::dec;
///
/// let registry = Registry::new(
///     Topology::PerRoute,
///     vec![
///         Venue::new("A".to_string(), dec!(10)),
///         Venue::new("B".to_string(), dec!(0)),
///     ],
///     vec![],
/// )
/// .unwrap();
///
/// assert!(registry.venue("A").is_some());
/// assert!(registry.venue("C").is_none());
/// assert_eq!(registry.total_value(), dec!(10));
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    topology: Topology,
    venues: Vec<Venue>,
    routes: Vec<Route>,
}

impl Registry {
    /// Create a registry, validating names and topology requirements
    pub fn new(topology: Topology, venues: Vec<Venue>, routes: Vec<Route>) -> Result<Self, ConfigError> {
        if venues.is_empty() {
            return Err(ConfigError::NoVenues);
        }

        let mut names = HashSet::new();
        for venue in &venues {
            if !names.insert(venue.name()) {
                return Err(ConfigError::DuplicateVenue(venue.name().to_string()));
            }
        }

        match topology {
            Topology::PerVenue => {
                if !routes.is_empty() {
                    return Err(ConfigError::RoutesInPerVenueTopology(routes.len()));
                }
                for venue in &venues {
                    for kind in [CapacityKind::OrderFlow, CapacityKind::Outflow] {
                        if venue.capacity(kind).is_none() {
                            return Err(ConfigError::MissingVenueCapacity {
                                venue: venue.name().to_string(),
                                kind,
                            });
                        }
                    }
                    if venue.params().is_none() {
                        return Err(ConfigError::MissingVenueParams(venue.name().to_string()));
                    }
                }
            }
            Topology::PerRoute => {
                let mut route_names = HashSet::new();
                for route in &routes {
                    if !route_names.insert(route.name()) {
                        return Err(ConfigError::DuplicateRoute(route.name().to_string()));
                    }
                    if route.source() == route.destination() {
                        return Err(ConfigError::SelfLoopRoute(route.name().to_string()));
                    }
                    for endpoint in [route.source(), route.destination()] {
                        if !names.contains(endpoint) {
                            return Err(ConfigError::UnknownRouteEndpoint {
                                route: route.name().to_string(),
                                venue: endpoint.to_string(),
                            });
                        }
                    }
                }
            }
        }

        let registry = Self {
            topology,
            venues,
            routes,
        };
        if registry.checked_total_value().is_none() {
            return Err(ConfigError::TotalValueOverflow);
        }
        Ok(registry)
    }

    // ========================================================================
    // Venue access
    // ========================================================================

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// All venues in declared order
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn num_venues(&self) -> usize {
        self.venues.len()
    }

    /// Look up a venue by exact name
    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venues.iter().find(|venue| venue.name() == name)
    }

    /// Position of a venue in declared order
    pub fn venue_index(&self, name: &str) -> Option<usize> {
        self.venues.iter().position(|venue| venue.name() == name)
    }

    pub fn venue_at(&self, index: usize) -> Option<&Venue> {
        self.venues.get(index)
    }

    pub(crate) fn venue_at_mut(&mut self, index: usize) -> Option<&mut Venue> {
        self.venues.get_mut(index)
    }

    pub(crate) fn venues_mut(&mut self) -> &mut [Venue] {
        &mut self.venues
    }

    // ========================================================================
    // Route access
    // ========================================================================

    /// All routes in declared order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by exact name
    pub fn route_named(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name() == name)
    }

    /// First declared route from `source` to `destination`
    pub fn route_between(&self, source: &str, destination: &str) -> Option<&Route> {
        self.find_route(source, destination, None)
            .and_then(|index| self.routes.get(index))
    }

    /// Index of the route an action from `source` to `destination` would use
    ///
    /// With `name`, the route must carry that name and join the two venues.
    /// Without, the first declared route joining them wins.
    pub fn find_route(&self, source: &str, destination: &str, name: Option<&str>) -> Option<usize> {
        self.routes.iter().position(|route| {
            route.connects(source, destination) && name.map_or(true, |n| route.name() == n)
        })
    }

    pub fn route_at(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub(crate) fn route_at_mut(&mut self, index: usize) -> Option<&mut Route> {
        self.routes.get_mut(index)
    }

    // ========================================================================
    // Link resolution (topology-aware)
    // ========================================================================

    /// Capacity an action of `kind` from `source` to `destination` draws on
    ///
    /// Per-venue: the destination venue's capacity. Per-route: the resolved
    /// route's capacity. None when no such link exists.
    pub fn link_capacity(
        &self,
        kind: CapacityKind,
        source: &str,
        destination: &str,
        route: Option<&str>,
    ) -> Option<&Capacity> {
        match self.topology {
            Topology::PerVenue => {
                if route.is_some() {
                    return None;
                }
                self.venue(source)?;
                self.venue(destination)?.capacity(kind)
            }
            Topology::PerRoute => {
                let index = self.find_route(source, destination, route)?;
                self.routes.get(index).map(|r| r.capacity(kind))
            }
        }
    }

    /// Execution parameters applied to an action from `source` to `destination`
    ///
    /// Per-venue: the source venue's parameters. Per-route: the resolved route's.
    pub fn link_params(&self, source: &str, destination: &str, route: Option<&str>) -> Option<&ExecutionParams> {
        match self.topology {
            Topology::PerVenue => {
                if route.is_some() {
                    return None;
                }
                self.venue(destination)?;
                self.venue(source)?.params()
            }
            Topology::PerRoute => {
                let index = self.find_route(source, destination, route)?;
                self.routes.get(index).map(|r| r.params())
            }
        }
    }

    // ========================================================================
    // Tick-level operations
    // ========================================================================

    /// Regenerate every venue and route capacity by one tick
    pub fn replenish_all(&mut self) {
        for venue in &mut self.venues {
            venue.replenish();
        }
        for route in &mut self.routes {
            route.replenish();
        }
    }

    /// Sum of spendable and locked value across all venues
    pub fn total_value(&self) -> Amount {
        self.venues.iter().map(|venue| venue.total_value()).sum()
    }

    /// Same as `total_value`, `None` on overflow
    ///
    /// Construction and action admission both keep this `Some`, so every
    /// per-venue and grand total the engine reports is representable.
    pub fn checked_total_value(&self) -> Option<Amount> {
        self.venues
            .iter()
            .try_fold(Amount::ZERO, |total, venue| total.checked_add(venue.checked_total_value()?))
    }
}
