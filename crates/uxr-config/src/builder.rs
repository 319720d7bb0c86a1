//! # Configuration Builder — Whole-Object Validation
//!
//! [`ConfigurationBuilder`] collects restriction segments and content-limit
//! parameters, then [`ConfigurationBuilder::build()`] validates the collected
//! rules as a whole and freezes them into a [`Configuration`].
//!
//! ## Build Pipeline
//!
//! 1. **Default fill.** Every driving state without a baseline segment gets
//!    the fully-restricted segment. An unconfigured state is maximally
//!    restrictive.
//! 2. **Shape.** Non-moving baseline buckets hold exactly one segment. Any
//!    bucket with more than one segment must give every segment a range.
//! 3. **Sort.** Multi-segment moving buckets are sorted by `(min, max)`.
//! 4. **Coverage.** Sorted multi-segment buckets start at `0` and end at
//!    `MAX_SPEED`. A lone ranged baseline moving segment must also span the
//!    full range; a lone passenger segment may cover a subset, with baseline
//!    applying outside it.
//! 5. **Continuity.** Each range ends exactly where the next begins.
//!
//! Steps 3–5 run separately for the baseline and passenger moving buckets.
//! The first failure aborts the build; no partially valid configuration is
//! ever returned.

use uxr_core::{ConfigError, DrivingState, RestrictionMode, RestrictionSegment, SpeedRange};

use crate::configuration::{Configuration, RuleTable};

/// Validate that `port` fits in a single unsigned byte.
///
/// # Errors
///
/// Returns `ConfigError::InvalidArgument` when `port` is outside `0..=255`.
pub fn validate_port(port: i64) -> Result<u8, ConfigError> {
    u8::try_from(port).map_err(|_| {
        ConfigError::InvalidArgument(format!(
            "port value should be within the range of a byte, got {port}"
        ))
    })
}

/// Mutable, single-owner staging area for a [`Configuration`].
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    physical_port: Option<u8>,
    max_content_depth: Option<u32>,
    max_cumulative_content_items: Option<u32>,
    max_string_length: Option<u32>,
    baseline: RuleTable,
    passenger: RuleTable,
}

impl ConfigurationBuilder {
    /// Create an empty builder. Building it as-is yields the fully-restricted
    /// configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the physical display port this configuration applies to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `port` does not fit in a byte.
    pub fn set_physical_port(mut self, port: i64) -> Result<Self, ConfigError> {
        self.physical_port = Some(validate_port(port)?);
        Ok(self)
    }

    /// Set the maximum displayed string length.
    pub fn set_max_string_length(mut self, max_string_length: u32) -> Self {
        self.max_string_length = Some(max_string_length);
        self
    }

    /// Set the maximum cumulative number of content items.
    pub fn set_max_cumulative_content_items(mut self, max_items: u32) -> Self {
        self.max_cumulative_content_items = Some(max_items);
        self
    }

    /// Set the maximum depth of browsable content.
    pub fn set_max_content_depth(mut self, max_content_depth: u32) -> Self {
        self.max_content_depth = Some(max_content_depth);
        self
    }

    /// Append `segment` to the bucket for `(state, segment.mode())`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if the segment carries a speed
    /// range and `state` is not `DrivingState::Moving`.
    pub fn set_restrictions(
        mut self,
        state: DrivingState,
        segment: RestrictionSegment,
    ) -> Result<Self, ConfigError> {
        if segment.speed_range().is_some() && !state.supports_speed_ranges() {
            return Err(ConfigError::InvalidArgument(format!(
                "non-moving driving state {state} should not specify a speed range"
            )));
        }
        let table = match segment.mode() {
            RestrictionMode::Baseline => &mut self.baseline,
            RestrictionMode::Passenger => &mut self.passenger,
        };
        table[state].push(segment);
        Ok(self)
    }

    /// Validate the collected rules and freeze them.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidArgument`: a content limit exceeds `i32::MAX`.
    /// - `ConfigError::TooManySegments`: a non-moving state has several
    ///   baseline segments.
    /// - `ConfigError::MissingSpeedRange`: a multi-segment bucket contains a
    ///   segment without a speed range.
    /// - `ConfigError::IncompleteCoverage`: sorted ranges do not start at 0
    ///   or do not end at `MAX_SPEED`.
    /// - `ConfigError::DiscontinuousRange`: adjacent ranges overlap or leave
    ///   a gap.
    pub fn build(mut self) -> Result<Configuration, ConfigError> {
        validate_limit("max_content_depth", self.max_content_depth)?;
        validate_limit("max_cumulative_content_items", self.max_cumulative_content_items)?;
        validate_limit("max_string_length", self.max_string_length)?;
        self.fill_default_baseline();

        for state in DrivingState::ALL {
            validate_bucket(state, RestrictionMode::Baseline, &mut self.baseline[state])?;
        }
        validate_bucket(
            DrivingState::Moving,
            RestrictionMode::Passenger,
            &mut self.passenger[DrivingState::Moving],
        )?;

        tracing::debug!(
            physical_port = ?self.physical_port,
            baseline_segments = self.baseline.segment_count(),
            passenger_segments = self.passenger.segment_count(),
            "built UX restriction configuration"
        );

        Ok(Configuration {
            physical_port: self.physical_port,
            max_content_depth: self.max_content_depth,
            max_cumulative_content_items: self.max_cumulative_content_items,
            max_string_length: self.max_string_length,
            baseline: self.baseline,
            passenger: self.passenger,
        })
    }

    fn fill_default_baseline(&mut self) {
        for state in DrivingState::ALL {
            let bucket = &mut self.baseline[state];
            if bucket.is_empty() {
                tracing::info!(
                    driving_state = %state,
                    "using default restrictions for unconfigured driving state"
                );
                bucket.push(RestrictionSegment::fully_restricted());
            }
        }
    }
}

/// Content limits travel as signed 32-bit integers with `-1` reserved.
fn validate_limit(name: &str, limit: Option<u32>) -> Result<(), ConfigError> {
    match limit {
        Some(value) if i32::try_from(value).is_err() => Err(ConfigError::InvalidArgument(format!(
            "{name} {value} exceeds {}",
            i32::MAX
        ))),
        _ => Ok(()),
    }
}

/// Check shape, order, coverage and continuity of one bucket.
fn validate_bucket(
    state: DrivingState,
    mode: RestrictionMode,
    segments: &mut [RestrictionSegment],
) -> Result<(), ConfigError> {
    if mode == RestrictionMode::Baseline && !state.supports_speed_ranges() && segments.len() != 1 {
        return Err(ConfigError::TooManySegments {
            state,
            count: segments.len(),
        });
    }

    match segments {
        [] => Ok(()),
        [only] => match (mode, only.speed_range()) {
            // A lone range-less segment covers the whole state.
            (_, None) => Ok(()),
            (RestrictionMode::Baseline, Some(range)) => {
                validate_coverage(mode, range, range)
            }
            (RestrictionMode::Passenger, Some(_)) => Ok(()),
        },
        _ => {
            let ranges = collect_ranges(state, mode, segments)?;
            validate_coverage(mode, &ranges[0], &ranges[ranges.len() - 1])?;
            validate_continuity(mode, &ranges)
        }
    }
}

/// Sort a multi-segment bucket in place and return its ranges in order.
fn collect_ranges(
    state: DrivingState,
    mode: RestrictionMode,
    segments: &mut [RestrictionSegment],
) -> Result<Vec<SpeedRange>, ConfigError> {
    if segments.iter().any(|s| s.speed_range().is_none()) {
        return Err(ConfigError::MissingSpeedRange { state, mode });
    }
    segments.sort_by(|a, b| a.speed_range().cmp(&b.speed_range()));
    Ok(segments.iter().filter_map(|s| s.speed_range().copied()).collect())
}

fn validate_coverage(
    mode: RestrictionMode,
    first: &SpeedRange,
    last: &SpeedRange,
) -> Result<(), ConfigError> {
    if first.min_speed() != 0.0 {
        return Err(ConfigError::IncompleteCoverage {
            mode,
            reason: format!("lowest range {first} should start at 0"),
        });
    }
    if !last.is_unbounded() {
        return Err(ConfigError::IncompleteCoverage {
            mode,
            reason: format!("highest range {last} should end at max_speed"),
        });
    }
    Ok(())
}

fn validate_continuity(mode: RestrictionMode, ranges: &[SpeedRange]) -> Result<(), ConfigError> {
    for pair in ranges.windows(2) {
        if pair[0].max_speed() != pair[1].min_speed() {
            return Err(ConfigError::DiscontinuousRange {
                mode,
                previous: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxr_core::UxRestrictions;

    fn ranged(mode: RestrictionMode, min: f32, max: f32) -> RestrictionSegment {
        RestrictionSegment::new(
            mode,
            true,
            UxRestrictions::FULLY_RESTRICTED,
            Some(SpeedRange::new(min, max).unwrap()),
        )
        .unwrap()
    }

    fn baseline_ranged(min: f32, max: f32) -> RestrictionSegment {
        ranged(RestrictionMode::Baseline, min, max)
    }

    // ── Construction ──────────────────────────────────────────────────

    #[test]
    fn test_construction() {
        ConfigurationBuilder::new().build().unwrap();

        ConfigurationBuilder::new()
            .set_max_string_length(1)
            .build()
            .unwrap();

        ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Parked,
                RestrictionSegment::baseline(false, UxRestrictions::BASELINE).unwrap(),
            )
            .unwrap()
            .build()
            .unwrap();

        ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Moving,
                RestrictionSegment::baseline(true, UxRestrictions::FULLY_RESTRICTED).unwrap(),
            )
            .unwrap()
            .build()
            .unwrap();

        ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, f32::INFINITY))
            .unwrap()
            .build()
            .unwrap();

        ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, 1.0))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(1.0, f32::INFINITY))
            .unwrap()
            .build()
            .unwrap();
    }

    #[test]
    fn test_port_validation() {
        assert_eq!(validate_port(0).unwrap(), 0);
        assert_eq!(validate_port(255).unwrap(), 255);
        assert!(matches!(validate_port(256), Err(ConfigError::InvalidArgument(_))));
        assert!(matches!(validate_port(-1), Err(ConfigError::InvalidArgument(_))));
        assert!(ConfigurationBuilder::new().set_physical_port(300).is_err());
    }

    #[test]
    fn test_limit_beyond_i32_rejected() {
        let result = ConfigurationBuilder::new()
            .set_max_string_length(u32::MAX)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidArgument(_))));
        ConfigurationBuilder::new()
            .set_max_string_length(i32::MAX as u32)
            .build()
            .unwrap();
    }

    // ── Default fill ──────────────────────────────────────────────────

    #[test]
    fn test_empty_builder_is_fully_restricted() {
        let config = ConfigurationBuilder::new().build().unwrap();
        for state in DrivingState::ALL {
            assert_eq!(
                config.restrictions(state, RestrictionMode::Baseline),
                &[RestrictionSegment::fully_restricted()]
            );
            assert!(config
                .restrictions(state, RestrictionMode::Passenger)
                .is_empty());
        }
    }

    #[test]
    fn test_unspecified_state_uses_restrictive_default() {
        let config = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Moving,
                RestrictionSegment::baseline(false, UxRestrictions::BASELINE).unwrap(),
            )
            .unwrap()
            .build()
            .unwrap();
        for state in [DrivingState::Parked, DrivingState::Idling, DrivingState::Unknown] {
            assert_eq!(
                config.restrictions(state, RestrictionMode::Baseline),
                &[RestrictionSegment::fully_restricted()]
            );
        }
    }

    // ── Shape ─────────────────────────────────────────────────────────

    #[test]
    fn test_non_moving_state_has_one_restriction() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Idling,
                RestrictionSegment::baseline(true, UxRestrictions::NO_VIDEO).unwrap(),
            )
            .unwrap()
            .set_restrictions(
                DrivingState::Idling,
                RestrictionSegment::baseline(false, UxRestrictions::BASELINE).unwrap(),
            )
            .unwrap()
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::TooManySegments {
                state: DrivingState::Idling,
                count: 2
            }
        );
    }

    #[test]
    fn test_non_moving_state_cannot_use_speed_range() {
        for state in [DrivingState::Parked, DrivingState::Idling, DrivingState::Unknown] {
            let result = ConfigurationBuilder::new()
                .set_restrictions(state, baseline_ranged(0.0, f32::INFINITY));
            assert!(matches!(result, Err(ConfigError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_multiple_moving_restrictions_should_all_contain_speed_range() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Moving,
                RestrictionSegment::baseline(true, UxRestrictions::FULLY_RESTRICTED).unwrap(),
            )
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(1.0, f32::INFINITY))
            .unwrap()
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingSpeedRange {
                state: DrivingState::Moving,
                mode: RestrictionMode::Baseline
            }
        );
    }

    // ── Coverage ──────────────────────────────────────────────────────

    #[test]
    fn test_multiple_speed_ranges_non_zero_start() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(1.0, 2.0))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(2.0, f32::INFINITY))
            .unwrap()
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::IncompleteCoverage {
                mode: RestrictionMode::Baseline,
                ..
            })
        ));
    }

    #[test]
    fn test_single_speed_range_non_zero_start() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(1.0, f32::INFINITY))
            .unwrap()
            .build();
        assert!(matches!(result, Err(ConfigError::IncompleteCoverage { .. })));
    }

    #[test]
    fn test_single_bounded_speed_range_rejected() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, 5.0))
            .unwrap()
            .build();
        assert!(matches!(result, Err(ConfigError::IncompleteCoverage { .. })));
    }

    #[test]
    fn test_last_range_must_be_unbounded() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, 1.0))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(1.0, 100.0))
            .unwrap()
            .build();
        assert!(matches!(result, Err(ConfigError::IncompleteCoverage { .. })));
    }

    // ── Continuity ────────────────────────────────────────────────────

    #[test]
    fn test_speed_range_overlap() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, 5.0))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(2.0, f32::INFINITY))
            .unwrap()
            .build();
        assert!(matches!(result, Err(ConfigError::DiscontinuousRange { .. })));
    }

    #[test]
    fn test_speed_range_gap() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, 10.0))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(15.0, f32::INFINITY))
            .unwrap()
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DiscontinuousRange {
                mode: RestrictionMode::Baseline,
                previous: SpeedRange::new(0.0, 10.0).unwrap(),
                next: SpeedRange::new(15.0, f32::INFINITY).unwrap(),
            }
        );
    }

    #[test]
    fn test_segments_sorted_by_speed_range() {
        let config = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Moving, baseline_ranged(5.0, f32::INFINITY))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(0.0, 1.0))
            .unwrap()
            .set_restrictions(DrivingState::Moving, baseline_ranged(1.0, 5.0))
            .unwrap()
            .build()
            .unwrap();
        let mins: Vec<f32> = config
            .restrictions(DrivingState::Moving, RestrictionMode::Baseline)
            .iter()
            .map(|s| s.speed_range().unwrap().min_speed())
            .collect();
        assert_eq!(mins, vec![0.0, 1.0, 5.0]);
    }

    // ── Passenger mode ────────────────────────────────────────────────

    #[test]
    fn test_passenger_mode_no_speed_range_overlap() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Moving,
                ranged(RestrictionMode::Passenger, 0.0, 2.0),
            )
            .unwrap()
            .set_restrictions(
                DrivingState::Moving,
                ranged(RestrictionMode::Passenger, 1.0, f32::INFINITY),
            )
            .unwrap()
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::DiscontinuousRange {
                mode: RestrictionMode::Passenger,
                ..
            })
        ));
    }

    #[test]
    fn test_passenger_mode_can_specify_subset_of_speed_range() {
        let config = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Moving,
                ranged(RestrictionMode::Passenger, 1.0, 2.0),
            )
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config
                .restrictions(DrivingState::Moving, RestrictionMode::Passenger)
                .len(),
            1
        );
    }

    #[test]
    fn test_passenger_multi_segment_requires_full_coverage() {
        let result = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Moving,
                ranged(RestrictionMode::Passenger, 0.0, 2.0),
            )
            .unwrap()
            .set_restrictions(
                DrivingState::Moving,
                ranged(RestrictionMode::Passenger, 2.0, 4.0),
            )
            .unwrap()
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::IncompleteCoverage {
                mode: RestrictionMode::Passenger,
                ..
            })
        ));
    }

    #[test]
    fn test_passenger_non_moving_buckets_not_shape_checked() {
        let passenger = RestrictionSegment::unrestricted(RestrictionMode::Passenger);
        let config = ConfigurationBuilder::new()
            .set_restrictions(DrivingState::Parked, passenger)
            .unwrap()
            .set_restrictions(DrivingState::Parked, passenger)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config
                .restrictions(DrivingState::Parked, RestrictionMode::Passenger)
                .len(),
            2
        );
    }

    #[test]
    fn test_unspecified_mode_defaults_to_baseline() {
        let config = ConfigurationBuilder::new()
            .set_restrictions(
                DrivingState::Parked,
                RestrictionSegment::baseline(true, UxRestrictions::NO_VIDEO).unwrap(),
            )
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config.restrictions(DrivingState::Parked, RestrictionMode::Baseline)[0]
                .restriction_bitmask(),
            UxRestrictions::NO_VIDEO
        );
        assert!(config
            .restrictions(DrivingState::Parked, RestrictionMode::Passenger)
            .is_empty());
    }
}
