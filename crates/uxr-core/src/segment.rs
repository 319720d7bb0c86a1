//! # Restriction Segment — One Rule
//!
//! A [`RestrictionSegment`] is one restriction rule: for one restriction
//! mode, whether distraction optimization is required, which restriction
//! flags are active, and optionally the speed sub-range it covers.
//!
//! ## Invariant
//!
//! A segment that does not require distraction optimization must carry the
//! baseline (empty) bitmask. Waiving optimization while declaring active
//! restrictions is contradictory and rejected at construction with
//! `ConfigError::InconsistentSegment`.

use crate::error::ConfigError;
use crate::restrictions::UxRestrictions;
use crate::speed::SpeedRange;
use crate::state::RestrictionMode;

/// One restriction rule covering one speed sub-range in one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestrictionSegment {
    mode: RestrictionMode,
    requires_distraction_optimization: bool,
    restriction_bitmask: u32,
    speed_range: Option<SpeedRange>,
}

impl RestrictionSegment {
    /// Create a segment.
    ///
    /// A `speed_range` of `None` means the segment covers every speed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InconsistentSegment` if optimization is not
    /// required but `restriction_bitmask` is not `UxRestrictions::BASELINE`.
    pub fn new(
        mode: RestrictionMode,
        requires_distraction_optimization: bool,
        restriction_bitmask: u32,
        speed_range: Option<SpeedRange>,
    ) -> Result<Self, ConfigError> {
        if !requires_distraction_optimization && restriction_bitmask != UxRestrictions::BASELINE {
            return Err(ConfigError::InconsistentSegment {
                restrictions: restriction_bitmask,
            });
        }
        Ok(Self {
            mode,
            requires_distraction_optimization,
            restriction_bitmask,
            speed_range,
        })
    }

    /// A baseline-mode segment without a speed range.
    pub fn baseline(
        requires_distraction_optimization: bool,
        restriction_bitmask: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(
            RestrictionMode::Baseline,
            requires_distraction_optimization,
            restriction_bitmask,
            None,
        )
    }

    /// The fail-safe segment: optimization required, every flag set, all
    /// speeds, baseline mode.
    pub fn fully_restricted() -> Self {
        Self {
            mode: RestrictionMode::Baseline,
            requires_distraction_optimization: true,
            restriction_bitmask: UxRestrictions::FULLY_RESTRICTED,
            speed_range: None,
        }
    }

    /// A segment with no restrictions and no optimization requirement.
    pub fn unrestricted(mode: RestrictionMode) -> Self {
        Self {
            mode,
            requires_distraction_optimization: false,
            restriction_bitmask: UxRestrictions::BASELINE,
            speed_range: None,
        }
    }

    /// Return a copy of this segment assigned to `mode`.
    pub fn with_mode(mut self, mode: RestrictionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Return a copy of this segment restricted to `range`.
    pub fn with_speed_range(mut self, range: SpeedRange) -> Self {
        self.speed_range = Some(range);
        self
    }

    /// The restriction mode this segment belongs to.
    pub fn mode(&self) -> RestrictionMode {
        self.mode
    }

    /// Whether distraction optimization is required.
    pub fn requires_distraction_optimization(&self) -> bool {
        self.requires_distraction_optimization
    }

    /// Active restriction flags.
    pub fn restriction_bitmask(&self) -> u32 {
        self.restriction_bitmask
    }

    /// The covered speed range; `None` covers every speed.
    pub fn speed_range(&self) -> Option<&SpeedRange> {
        self.speed_range.as_ref()
    }

    /// Whether this segment applies at `speed`.
    ///
    /// A range-less segment applies at every speed.
    pub fn covers(&self, speed: f32) -> bool {
        self.speed_range.map_or(true, |r| r.includes(speed))
    }
}

impl std::fmt::Display for RestrictionSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Mode is {}; Requires DO? {}; Restrictions: {:b}; Speed range: ",
            self.mode, self.requires_distraction_optimization, self.restriction_bitmask
        )?;
        match &self.speed_range {
            Some(range) => write!(f, "{range}]"),
            None => f.write_str("null]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consistent_segments_accepted() {
        assert!(RestrictionSegment::baseline(true, UxRestrictions::NO_VIDEO).is_ok());
        assert!(RestrictionSegment::baseline(true, UxRestrictions::BASELINE).is_ok());
        assert!(RestrictionSegment::baseline(false, UxRestrictions::BASELINE).is_ok());
    }

    #[test]
    fn test_waived_optimization_with_restrictions_rejected() {
        let err = RestrictionSegment::baseline(false, UxRestrictions::NO_KEYBOARD).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InconsistentSegment {
                restrictions: UxRestrictions::NO_KEYBOARD
            }
        );
    }

    #[test]
    fn test_fully_restricted_default() {
        let seg = RestrictionSegment::fully_restricted();
        assert_eq!(seg.mode(), RestrictionMode::Baseline);
        assert!(seg.requires_distraction_optimization());
        assert_eq!(seg.restriction_bitmask(), UxRestrictions::FULLY_RESTRICTED);
        assert!(seg.speed_range().is_none());
    }

    #[test]
    fn test_covers() {
        let seg = RestrictionSegment::fully_restricted();
        assert!(seg.covers(0.0));
        assert!(seg.covers(1000.0));

        let ranged = seg.with_speed_range(SpeedRange::new(1.0, 2.0).unwrap());
        assert!(!ranged.covers(0.5));
        assert!(ranged.covers(1.0));
        assert!(!ranged.covers(2.0));
    }

    #[test]
    fn test_with_mode() {
        let seg = RestrictionSegment::unrestricted(RestrictionMode::Baseline)
            .with_mode(RestrictionMode::Passenger);
        assert_eq!(seg.mode(), RestrictionMode::Passenger);
    }

    #[test]
    fn test_display() {
        let seg = RestrictionSegment::new(
            RestrictionMode::Passenger,
            true,
            UxRestrictions::NO_VIDEO,
            Some(SpeedRange::new(0.0, 5.0).unwrap()),
        )
        .unwrap();
        assert_eq!(
            seg.to_string(),
            "[Mode is passenger; Requires DO? true; Restrictions: 10000; Speed range: [min: 0; max: 5]]"
        );
    }
}
