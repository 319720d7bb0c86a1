//! # Codec — Persisted Configuration Forms
//!
//! Two independent encodings of a [`crate::Configuration`]:
//!
//! - **Text** (`text.rs`): the JSON document format, also readable from YAML.
//! - **Binary** (`binary.rs`): a compact little-endian layout for transfer
//!   between processes.
//!
//! Both decoders feed a [`crate::ConfigurationBuilder`], so every decoded
//! configuration satisfies the same invariants as a hand-built one, and
//! `decode(encode(c)) == c` for every built `c`.

pub mod binary;
pub mod text;

use uxr_core::{ConfigError, DrivingState};

/// Order in which the textual form lists per-state rules.
pub const TEXT_LIST_ORDER: [DrivingState; 4] = [
    DrivingState::Parked,
    DrivingState::Idling,
    DrivingState::Moving,
    DrivingState::Unknown,
];

/// Order in which the binary form lists per-state rules.
pub const BINARY_LIST_ORDER: [DrivingState; 4] = DrivingState::ALL;

/// Wire value for an unspecified content limit.
pub(crate) const UNSPECIFIED_LIMIT: i64 = -1;

/// Interpret a wire limit: `-1` is unspecified, other negatives are invalid.
pub(crate) fn limit_from_wire(name: &str, value: i64) -> Result<Option<u32>, ConfigError> {
    if value == UNSPECIFIED_LIMIT {
        return Ok(None);
    }
    u32::try_from(value).map(Some).map_err(|_| {
        ConfigError::MalformedEncoding(format!("{name} out of range: {value}"))
    })
}

pub(crate) fn limit_to_wire(value: Option<u32>) -> i64 {
    value.map_or(UNSPECIFIED_LIMIT, i64::from)
}
