//! # Driving State and Restriction Mode
//!
//! Defines the two enums that key every restriction rule: the coarse
//! vehicle [`DrivingState`] and the [`RestrictionMode`] selecting between the
//! always-present baseline rules and the optional passenger overrides.
//!
//! ## Ordering Invariant
//!
//! [`DrivingState::ALL`] lists states as Unknown, Parked, Idling, Moving.
//! The binary configuration encoding writes per-state lists in exactly this
//! order, and [`DrivingState::index()`] maps each state to its slot in the
//! fixed-size per-state tables. Reordering the variants is a wire break.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Coarse vehicle state gating which restriction set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingState {
    /// The driving state could not be determined.
    Unknown,
    /// The vehicle is parked (gear in park).
    Parked,
    /// The vehicle is not parked but has zero speed.
    Idling,
    /// The vehicle is moving. Only this state supports speed sub-ranges.
    Moving,
}

/// Number of driving states. Sizes the per-state rule tables.
pub const DRIVING_STATE_COUNT: usize = 4;

impl DrivingState {
    /// All driving states in serialization order.
    pub const ALL: [DrivingState; DRIVING_STATE_COUNT] =
        [Self::Unknown, Self::Parked, Self::Idling, Self::Moving];

    /// Position of this state in [`DrivingState::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Parked => 1,
            Self::Idling => 2,
            Self::Moving => 3,
        }
    }

    /// Returns the lowercase name used in diagnostics and document keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Parked => "parked",
            Self::Idling => "idling",
            Self::Moving => "moving",
        }
    }

    /// Whether restrictions for this state may be split by speed range.
    pub fn supports_speed_ranges(self) -> bool {
        matches!(self, Self::Moving)
    }
}

impl std::fmt::Display for DrivingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrivingState {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "parked" => Ok(Self::Parked),
            "idling" => Ok(Self::Idling),
            "moving" => Ok(Self::Moving),
            other => Err(ConfigError::InvalidArgument(format!(
                "unknown driving state: {other:?}"
            ))),
        }
    }
}

/// Selects which rule set applies in a given driving state.
///
/// Baseline rules are always present (missing states are filled with the
/// fully-restricted default). Passenger rules are an optional override used
/// while a non-driver occupant interacts with the display; wherever they do
/// not resolve, baseline applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionMode {
    /// Default rule set.
    #[default]
    Baseline,
    /// Optional override rule set.
    Passenger,
}

impl RestrictionMode {
    /// Both modes in serialization order.
    pub const ALL: [RestrictionMode; 2] = [Self::Baseline, Self::Passenger];

    /// Integer code used by the binary encoding.
    pub fn code(self) -> i32 {
        match self {
            Self::Baseline => 0,
            Self::Passenger => 1,
        }
    }

    /// Inverse of [`RestrictionMode::code()`].
    pub fn from_code(code: i32) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Self::Baseline),
            1 => Ok(Self::Passenger),
            other => Err(ConfigError::InvalidArgument(format!(
                "unrecognized restriction mode code {other}"
            ))),
        }
    }

    /// Returns the lowercase mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Passenger => "passenger",
        }
    }
}

impl std::fmt::Display for RestrictionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestrictionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Self::Baseline),
            "passenger" => Ok(Self::Passenger),
            other => Err(ConfigError::InvalidArgument(format!(
                "unknown restriction mode: {other:?}"
            ))),
        }
    }
}
