//! # Error Types — Configuration Error Taxonomy
//!
//! Every way a restriction configuration can be rejected, as one `thiserror`
//! enum. Errors are raised synchronously from segment construction,
//! `ConfigurationBuilder::build()` and the decoders; resolution itself never
//! fails.
//!
//! ## Design
//!
//! - Argument errors carry the offending value in the message.
//! - Partition errors name the restriction mode and the speed ranges involved.
//! - Decode errors carry the underlying parser message.

use thiserror::Error;

use crate::speed::SpeedRange;
use crate::state::{DrivingState, RestrictionMode};

/// Error raised while constructing or decoding a restriction configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An argument was outside its valid domain (port outside a byte, speed
    /// range on a non-moving state, negative speed).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A segment waives distraction optimization but still declares
    /// active restrictions.
    #[error("distraction optimization is not required but restrictions {restrictions:#x} are active")]
    InconsistentSegment {
        /// The non-baseline restriction bitmask.
        restrictions: u32,
    },

    /// A non-moving state has more than one baseline segment.
    #[error("{state} state must contain exactly one baseline restriction, found {count}")]
    TooManySegments {
        /// The offending driving state.
        state: DrivingState,
        /// Number of segments configured.
        count: usize,
    },

    /// A multi-segment bucket mixes a range-less segment with ranged ones.
    #[error("every {mode} restriction for the {state} state must specify a speed range")]
    MissingSpeedRange {
        /// The offending driving state.
        state: DrivingState,
        /// The offending restriction mode.
        mode: RestrictionMode,
    },

    /// Sorted speed ranges do not span `[0, +inf)`.
    #[error("{mode} speed ranges do not cover the full speed range: {reason}")]
    IncompleteCoverage {
        /// The restriction mode whose ranges are incomplete.
        mode: RestrictionMode,
        /// Which end of the range is uncovered.
        reason: String,
    },

    /// Adjacent sorted speed ranges overlap or leave a gap.
    #[error("{mode} speed ranges {previous} and {next} overlap or leave a gap")]
    DiscontinuousRange {
        /// The restriction mode whose ranges are discontinuous.
        mode: RestrictionMode,
        /// The lower of the two adjacent ranges.
        previous: SpeedRange,
        /// The upper of the two adjacent ranges.
        next: SpeedRange,
    },

    /// An encoded configuration could not be decoded.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),

    /// A configuration set was constructed from an empty list.
    #[error("configuration set must contain at least one configuration")]
    EmptyConfigurationSet,

    /// Configurations in a set disagree on content-limit parameters.
    #[error("configurations in a set must share the same restriction parameters")]
    MismatchedParameters,

    /// A multi-configuration set contains a configuration without a port.
    #[error("a set of multiple configurations requires every configuration to set a physical port")]
    MissingPhysicalPort,

    /// Two configurations in a set target the same physical port.
    #[error("multiple configurations for physical port {0}")]
    DuplicatePhysicalPort(u8),
}
