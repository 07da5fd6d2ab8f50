//! Action Validator & Executor
//!
//! # Check Order
//!
//! ```text
//! 0. amount >= 0                                 → NegativeAmount
//! 1. source != destination                       → SelfTransfer
//! 2. venues resolve; link (route) resolves       → UnknownVenue / UnknownRoute
//! 3. source balance >= amount                    → InsufficientSourceFunds
//! 4/5. link capacity (outflow | order flow) >= amount
//!                                                → InsufficientDestinationCapacity
//!      amount >= gas cost                        → AmountBelowGasCost
//! 6. credit and resulting total representable    → ArithmeticOverflow
//! ```
//!
//! Validation never mutates. Only a `ValidatedAction` can be applied, so a
//! rejected action cannot leave partial changes behind.

use crate::models::action::{Action, ActionKind};
use crate::models::capacity::{CapacityError, CapacityKind};
use crate::models::event::Event;
use crate::models::registry::{Registry, Topology};
use crate::models::venue::VenueError;
use crate::Amount;
use serde::Serialize;
use thiserror::Error;

/// Why an action was dropped
///
/// Recoverable: the action is skipped, the tick continues.
#[derive(Debug, Error, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("Negative action amount {amount}")]
    NegativeAmount { amount: Amount },

    #[error("Source and destination are the same venue ({venue})")]
    SelfTransfer { venue: String },

    #[error("Unknown venue {venue}")]
    UnknownVenue { venue: String },

    #[error("No route from {source_venue} to {destination_venue}")]
    UnknownRoute {
        source_venue: String,
        destination_venue: String,
        route: Option<String>,
    },

    #[error("Insufficient funds on {venue}: required {required}, available {available}")]
    InsufficientSourceFunds {
        venue: String,
        required: Amount,
        available: Amount,
    },

    #[error("Insufficient {kind} capacity: required {required}, available {available}")]
    InsufficientDestinationCapacity {
        kind: CapacityKind,
        required: Amount,
        available: Amount,
    },

    #[error("Amount {amount} does not cover gas cost {gas_cost}")]
    AmountBelowGasCost { amount: Amount, gas_cost: Amount },

    #[error("Crediting {amount} on {venue} overflows the representable range")]
    ArithmeticOverflow { venue: String, amount: Amount },
}

impl RejectionReason {
    /// Stable short code for reporting
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::NegativeAmount { .. } => "negative_amount",
            RejectionReason::SelfTransfer { .. } => "self_transfer",
            RejectionReason::UnknownVenue { .. } => "unknown_venue",
            RejectionReason::UnknownRoute { .. } => "unknown_route",
            RejectionReason::InsufficientSourceFunds { .. } => "insufficient_source_funds",
            RejectionReason::InsufficientDestinationCapacity { .. } => {
                "insufficient_destination_capacity"
            }
            RejectionReason::AmountBelowGasCost { .. } => "amount_below_gas_cost",
            RejectionReason::ArithmeticOverflow { .. } => "arithmetic_overflow",
        }
    }
}

/// An action that passed every check against the current registry state
///
/// Holds resolved positions and the precomputed credit so that applying it
/// needs no further decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAction {
    kind: ActionKind,
    source_index: usize,
    destination_index: usize,
    route_index: Option<usize>,
    amount: Amount,
    gas_cost: Amount,
    credited: Amount,
    delay: usize,
    reciprocal_outflow: bool,
}

impl ValidatedAction {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Amount that will be locked at the destination
    pub fn credited(&self) -> Amount {
        self.credited
    }

    /// Ticks until the credit matures
    pub fn delay(&self) -> usize {
        self.delay
    }
}

/// What a successful action did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReceipt {
    pub kind: ActionKind,
    pub source: String,
    pub destination: String,
    pub route: Option<String>,
    pub amount: Amount,
    pub gas_cost: Amount,
    pub credited: Amount,
    pub delay: usize,
}

impl ActionReceipt {
    /// Build the execution event for this receipt
    pub fn to_event(&self, tick: usize) -> Event {
        Event::ActionExecuted {
            tick,
            kind: self.kind,
            source: self.source.clone(),
            destination: self.destination.clone(),
            route: self.route.clone(),
            amount: self.amount,
            gas_cost: self.gas_cost,
            credited: self.credited,
            delay: self.delay,
        }
    }
}

/// Check an action against the registry without touching it
pub fn validate_action(registry: &Registry, action: &Action) -> Result<ValidatedAction, RejectionReason> {
    let amount = action.amount;
    if amount < Amount::ZERO {
        return Err(RejectionReason::NegativeAmount { amount });
    }

    if action.source == action.destination {
        return Err(RejectionReason::SelfTransfer {
            venue: action.source.clone(),
        });
    }

    let source_index = registry
        .venue_index(&action.source)
        .ok_or_else(|| RejectionReason::UnknownVenue {
            venue: action.source.clone(),
        })?;
    let destination_index = registry
        .venue_index(&action.destination)
        .ok_or_else(|| RejectionReason::UnknownVenue {
            venue: action.destination.clone(),
        })?;

    let unknown_route = || RejectionReason::UnknownRoute {
        source_venue: action.source.clone(),
        destination_venue: action.destination.clone(),
        route: action.route.clone(),
    };

    let route_name = action.route.as_deref();
    let route_index = match registry.topology() {
        Topology::PerVenue => None,
        Topology::PerRoute => Some(
            registry
                .find_route(&action.source, &action.destination, route_name)
                .ok_or_else(unknown_route)?,
        ),
    };

    let capacity_kind = action.kind.capacity_kind();
    let capacity = registry
        .link_capacity(capacity_kind, &action.source, &action.destination, route_name)
        .ok_or_else(unknown_route)?;
    let params = registry
        .link_params(&action.source, &action.destination, route_name)
        .ok_or_else(unknown_route)?;

    let source = registry
        .venue_at(source_index)
        .ok_or_else(|| RejectionReason::UnknownVenue {
            venue: action.source.clone(),
        })?;
    if !source.can_pay(amount) {
        return Err(RejectionReason::InsufficientSourceFunds {
            venue: action.source.clone(),
            required: amount,
            available: source.balance(),
        });
    }

    if !capacity.can_consume(amount) {
        return Err(RejectionReason::InsufficientDestinationCapacity {
            kind: capacity_kind,
            required: amount,
            available: capacity.current(),
        });
    }

    if amount < params.gas_cost {
        return Err(RejectionReason::AmountBelowGasCost {
            amount,
            gas_cost: params.gas_cost,
        });
    }

    let overflow = || RejectionReason::ArithmeticOverflow {
        venue: action.destination.clone(),
        amount,
    };
    let credited = action.kind.credited_amount(amount, params).ok_or_else(overflow)?;
    // amount <= source balance <= total, so only the credit can overflow
    registry
        .checked_total_value()
        .and_then(|total| (total - amount).checked_add(credited))
        .ok_or_else(overflow)?;

    Ok(ValidatedAction {
        kind: action.kind,
        source_index,
        destination_index,
        route_index,
        amount,
        gas_cost: params.gas_cost,
        credited,
        delay: action.kind.lock_delay(params),
        reciprocal_outflow: registry.topology() == Topology::PerVenue && action.kind == ActionKind::Bridge,
    })
}

/// Commit a validated action to the registry
///
/// Must be called on the registry the action was validated against, with no
/// mutation in between.
pub(crate) fn apply_validated(
    registry: &mut Registry,
    validated: ValidatedAction,
) -> Result<ActionReceipt, RejectionReason> {
    let capacity_kind = validated.kind.capacity_kind();
    let amount = validated.amount;

    let exceeded = |e: CapacityError| match e {
        CapacityError::Exceeded {
            required,
            available,
        } => RejectionReason::InsufficientDestinationCapacity {
            kind: capacity_kind,
            required,
            available,
        },
    };

    // Draw on the link capacity
    let route = match validated.route_index {
        Some(index) => {
            let route = registry
                .route_at_mut(index)
                .ok_or_else(|| stale_index(index))?;
            route.capacity_mut(capacity_kind).consume(amount).map_err(exceeded)?;
            Some(route.name().to_string())
        }
        None => {
            let destination = registry
                .venue_at_mut(validated.destination_index)
                .ok_or_else(|| stale_index(validated.destination_index))?;
            destination
                .capacity_mut(capacity_kind)
                .ok_or(RejectionReason::InsufficientDestinationCapacity {
                    kind: capacity_kind,
                    required: amount,
                    available: Amount::ZERO,
                })?
                .consume(amount)
                .map_err(exceeded)?;
            None
        }
    };

    // Debit the source (and credit its own outflow in the per-venue topology)
    let source = registry
        .venue_at_mut(validated.source_index)
        .ok_or_else(|| stale_index(validated.source_index))?;
    let source_name = source.name().to_string();
    source.debit(amount).map_err(|e| match e {
        VenueError::InsufficientBalance {
            required,
            available,
        } => RejectionReason::InsufficientSourceFunds {
            venue: source_name.clone(),
            required,
            available,
        },
    })?;
    if validated.reciprocal_outflow {
        if let Some(outflow) = source.capacity_mut(CapacityKind::Outflow) {
            outflow.restore(amount);
        }
    }

    // Lock the credit at the destination
    let destination = registry
        .venue_at_mut(validated.destination_index)
        .ok_or_else(|| stale_index(validated.destination_index))?;
    destination.lock(validated.credited, validated.delay);

    Ok(ActionReceipt {
        kind: validated.kind,
        source: source_name,
        destination: destination.name().to_string(),
        route,
        amount,
        gas_cost: validated.gas_cost,
        credited: validated.credited,
        delay: validated.delay,
    })
}

/// Validate an action and, if it passes, apply it
pub fn execute_action(registry: &mut Registry, action: &Action) -> Result<ActionReceipt, RejectionReason> {
    let validated = validate_action(registry, action)?;
    apply_validated(registry, validated)
}

fn stale_index(index: usize) -> RejectionReason {
    RejectionReason::UnknownVenue {
        venue: format!("#{}", index),
    }
}
