//! Error types for the few operations in `gadget-core` that can reject input.
//!
//! Gameplay paths (activation, tracking, effects) never fail: lookup misses,
//! missing targets and vanished objects are ordinary outcomes reported through
//! enums such as [`crate::Resolution`]. Errors here only guard ids and
//! tuning data before they enter the registry.

use thiserror::Error;

/// Rejected item identifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("item id must not be empty")]
    Empty,

    #[error("item id '{id}' contains invalid character {ch:?} (allowed: a-z, 0-9, '_', '-')")]
    InvalidCharacter { id: String, ch: char },
}

/// Invalid item tuning.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{item}: required_stationary_ticks must be at least 1")]
    ZeroStationaryTicks { item: &'static str },

    #[error("{item}: failsafe_ticks ({failsafe}) is shorter than min_flight_ticks ({min_flight})")]
    FailsafeBeforeFlight {
        item: &'static str,
        failsafe: u32,
        min_flight: u32,
    },

    #[error("{item}: targeting range must be at least 1 block")]
    ZeroRange { item: &'static str },

    #[error("{item}: {field} must be a positive finite number")]
    NonPositive {
        item: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Id(#[from] IdError),
}
