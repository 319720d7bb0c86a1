//! # Speed Range — Half-Open Speed Intervals
//!
//! A [`SpeedRange`] is the interval `[min, max)` in meters per second over
//! which a moving-state restriction applies. A range with no upper bound uses
//! [`SpeedRange::MAX_SPEED`] (`f32::INFINITY`) as its maximum.
//!
//! ## Invariants
//!
//! - `0 <= min <= max`, neither bound is NaN.
//! - `min` is never `MAX_SPEED`, so every range contains at least one speed
//!   or is the empty range `[x, x)`.
//! - Negative zero is normalized to zero, so ordering and equality agree.
//!
//! Bounds are stored as `f32`, the width used by the binary encoding, and
//! compared exactly. Partition checks in the builder rely on
//! `previous.max_speed() == next.min_speed()` with no tolerance.

use std::cmp::Ordering;

use crate::error::ConfigError;

/// Half-open interval `[min, max)` of vehicle speeds in meters per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRange {
    min_speed: f32,
    max_speed: f32,
}

impl SpeedRange {
    /// Sentinel maximum meaning "no upper bound".
    pub const MAX_SPEED: f32 = f32::INFINITY;

    /// The full speed range `[0, MAX_SPEED)`.
    pub const FULL: SpeedRange = SpeedRange {
        min_speed: 0.0,
        max_speed: Self::MAX_SPEED,
    };

    /// Create a range `[min_speed, max_speed)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if either bound is negative or
    /// NaN, if `min_speed` is `MAX_SPEED`, or if `min_speed > max_speed`.
    pub fn new(min_speed: f32, max_speed: f32) -> Result<Self, ConfigError> {
        if min_speed.is_nan() || max_speed.is_nan() {
            return Err(ConfigError::InvalidArgument(
                "speed cannot be NaN".to_string(),
            ));
        }
        if min_speed < 0.0 || max_speed < 0.0 {
            return Err(ConfigError::InvalidArgument(format!(
                "speed cannot be negative: [{min_speed}, {max_speed})"
            )));
        }
        if min_speed == Self::MAX_SPEED {
            return Err(ConfigError::InvalidArgument(
                "min speed cannot be MAX_SPEED".to_string(),
            ));
        }
        if min_speed > max_speed {
            return Err(ConfigError::InvalidArgument(format!(
                "min speed {min_speed} should not be greater than max speed {max_speed}"
            )));
        }
        Ok(Self {
            min_speed: normalize_zero(min_speed),
            max_speed: normalize_zero(max_speed),
        })
    }

    /// Create a range `[min_speed, MAX_SPEED)`.
    pub fn starting_at(min_speed: f32) -> Result<Self, ConfigError> {
        Self::new(min_speed, Self::MAX_SPEED)
    }

    /// Inclusive lower bound.
    pub fn min_speed(&self) -> f32 {
        self.min_speed
    }

    /// Exclusive upper bound; `MAX_SPEED` when unbounded.
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Whether the range has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.max_speed == Self::MAX_SPEED
    }

    /// Whether `speed` lies in `[min, max)`.
    pub fn includes(&self, speed: f32) -> bool {
        self.min_speed <= speed && speed < self.max_speed
    }
}

fn normalize_zero(v: f32) -> f32 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

// NaN is rejected at construction, so equality is total.
impl Eq for SpeedRange {}

impl PartialOrd for SpeedRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpeedRange {
    /// Orders by min speed, then by max speed.
    fn cmp(&self, other: &Self) -> Ordering {
        self.min_speed
            .total_cmp(&other.min_speed)
            .then_with(|| self.max_speed.total_cmp(&other.max_speed))
    }
}

impl std::fmt::Display for SpeedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unbounded() {
            write!(f, "[min: {}; max: max_speed]", self.min_speed)
        } else {
            write!(f, "[min: {}; max: {}]", self.min_speed, self.max_speed)
        }
    }
}
