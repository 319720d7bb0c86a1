//! # Resolver — Restrictions In Force
//!
//! Maps `(driving state, speed, mode)` to the restrictions currently in force
//! on a display.
//!
//! ## Lookup
//!
//! 1. In `Passenger` mode, the passenger bucket for the state is searched
//!    first. A bucket with no matching segment falls back to baseline.
//! 2. The baseline bucket is searched. A bucket holding a single range-less
//!    segment covers every speed. Otherwise only a ranged segment whose
//!    `[min, max)` includes the speed matches; range-less segments in a
//!    bucket of several are ignored.
//! 3. If nothing matches, the fully-restricted fail-safe is returned and a
//!    warning is logged. This is unreachable for a built configuration.
//!
//! ## Security Invariant
//!
//! Resolution never fails and never relaxes restrictions on a miss. Any
//! resolved bitmask other than `UxRestrictions::BASELINE` is reported with
//! distraction optimization required, whatever the segment declared.

use serde::{Deserialize, Serialize};
use uxr_core::{DrivingState, RestrictionMode, RestrictionSegment, UxRestrictions};

use crate::configuration::Configuration;

/// Result of resolving a configuration for the current driving conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRestriction {
    /// Whether content must be distraction optimized.
    pub requires_distraction_optimization: bool,
    /// Active `UxRestrictions` flags.
    pub restriction_bitmask: u32,
    /// Maximum displayed string length, if specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_string_length: Option<u32>,
    /// Maximum cumulative number of content items, if specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cumulative_content_items: Option<u32>,
    /// Maximum depth of browsable content, if specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_content_depth: Option<u32>,
}

impl ResolvedRestriction {
    /// Whether both results impose identical restrictions.
    ///
    /// Consumers use this to suppress redundant change notifications.
    pub fn is_same_restrictions(&self, other: &ResolvedRestriction) -> bool {
        self.requires_distraction_optimization == other.requires_distraction_optimization
            && self.restriction_bitmask == other.restriction_bitmask
            && self.max_string_length == other.max_string_length
            && self.max_cumulative_content_items == other.max_cumulative_content_items
            && self.max_content_depth == other.max_content_depth
    }

    /// Whether no restriction flag is active.
    pub fn is_unrestricted(&self) -> bool {
        self.restriction_bitmask == UxRestrictions::BASELINE
    }
}

impl Configuration {
    /// Resolve the restrictions in force for `state` at `speed` in `mode`.
    ///
    /// Never fails. A lookup that matches no segment yields the
    /// fully-restricted fail-safe.
    pub fn resolve(
        &self,
        state: DrivingState,
        speed: f32,
        mode: RestrictionMode,
    ) -> ResolvedRestriction {
        let passenger = match mode {
            RestrictionMode::Passenger => {
                find_segment(self.restrictions(state, RestrictionMode::Passenger), speed)
            }
            RestrictionMode::Baseline => None,
        };
        let segment = passenger
            .or_else(|| find_segment(self.restrictions(state, RestrictionMode::Baseline), speed));

        let (requires_distraction_optimization, restriction_bitmask) = match segment {
            Some(segment) => {
                let mask = segment.restriction_bitmask();
                (
                    segment.requires_distraction_optimization()
                        || mask != UxRestrictions::BASELINE,
                    mask,
                )
            }
            None => {
                tracing::warn!(
                    driving_state = %state,
                    speed,
                    mode = %mode,
                    "no restriction segment matched; using fully restricted fail-safe"
                );
                (true, UxRestrictions::FULLY_RESTRICTED)
            }
        };

        ResolvedRestriction {
            requires_distraction_optimization,
            restriction_bitmask,
            max_string_length: self.max_string_length,
            max_cumulative_content_items: self.max_cumulative_content_items,
            max_content_depth: self.max_content_depth,
        }
    }
}

/// A lone range-less segment covers the whole bucket. Otherwise only a
/// segment whose range includes `speed` matches.
fn find_segment(segments: &[RestrictionSegment], speed: f32) -> Option<&RestrictionSegment> {
    match segments {
        [only] if only.speed_range().is_none() => Some(only),
        _ => segments
            .iter()
            .find(|segment| segment.speed_range().is_some() && segment.covers(speed)),
    }
}
