//! # Configuration — Frozen Restriction Rules
//!
//! A [`Configuration`] holds, for one physical display, the ordered
//! restriction segments for every `(DrivingState, RestrictionMode)` pair plus
//! three content-limit parameters.
//!
//! ## Invariants (established by `ConfigurationBuilder::build()`)
//!
//! - Every driving state has a non-empty baseline bucket.
//! - Non-moving baseline buckets hold exactly one range-less segment.
//! - Multi-segment moving buckets are sorted by speed range and partition
//!   their speeds without gaps or overlaps.
//!
//! The per-state tables are fixed-size arrays indexed by
//! `DrivingState::index()`, so a missing state is unrepresentable. There are
//! no mutating methods; a configuration is `Send + Sync` and can be shared
//! across threads freely.

use std::fmt;
use std::ops::{Index, IndexMut};

use uxr_core::{
    DrivingState, RestrictionMode, RestrictionSegment, UxRestrictions, DRIVING_STATE_COUNT,
};

/// Ordered restriction segments for every driving state, in one mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable([Vec<RestrictionSegment>; DRIVING_STATE_COUNT]);

impl RuleTable {
    /// Iterate `(state, segments)` in `DrivingState::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (DrivingState, &[RestrictionSegment])> {
        DrivingState::ALL
            .into_iter()
            .map(move |state| (state, self[state].as_slice()))
    }

    /// Total number of segments across all states.
    pub fn segment_count(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

impl Index<DrivingState> for RuleTable {
    type Output = Vec<RestrictionSegment>;

    fn index(&self, state: DrivingState) -> &Self::Output {
        &self.0[state.index()]
    }
}

impl IndexMut<DrivingState> for RuleTable {
    fn index_mut(&mut self, state: DrivingState) -> &mut Self::Output {
        &mut self.0[state.index()]
    }
}

/// Validated, immutable UX restriction configuration for one display.
///
/// Construct with [`crate::ConfigurationBuilder`] or one of the decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) physical_port: Option<u8>,
    pub(crate) max_content_depth: Option<u32>,
    pub(crate) max_cumulative_content_items: Option<u32>,
    pub(crate) max_string_length: Option<u32>,
    pub(crate) baseline: RuleTable,
    pub(crate) passenger: RuleTable,
}

impl Configuration {
    /// Physical display port this configuration targets.
    ///
    /// `None` means the configuration applies to the default display.
    pub fn physical_port(&self) -> Option<u8> {
        self.physical_port
    }

    /// Maximum depth of browsable content, if specified.
    pub fn max_content_depth(&self) -> Option<u32> {
        self.max_content_depth
    }

    /// Maximum cumulative number of content items, if specified.
    pub fn max_cumulative_content_items(&self) -> Option<u32> {
        self.max_cumulative_content_items
    }

    /// Maximum displayed string length, if specified.
    pub fn max_string_length(&self) -> Option<u32> {
        self.max_string_length
    }

    /// The rule table for `mode`.
    pub fn rules(&self, mode: RestrictionMode) -> &RuleTable {
        match mode {
            RestrictionMode::Baseline => &self.baseline,
            RestrictionMode::Passenger => &self.passenger,
        }
    }

    /// Segments configured for `(state, mode)`, in resolution order.
    pub fn restrictions(&self, state: DrivingState, mode: RestrictionMode) -> &[RestrictionSegment] {
        &self.rules(mode)[state]
    }

    /// Whether both configurations carry the same content-limit parameters.
    ///
    /// Ignores the physical port and every restriction rule.
    pub fn has_same_parameters(&self, other: &Configuration) -> bool {
        self.max_content_depth == other.max_content_depth
            && self.max_cumulative_content_items == other.max_cumulative_content_items
            && self.max_string_length == other.max_string_length
    }

    /// Write a human-readable listing of the configuration.
    pub fn dump(&self, out: &mut impl fmt::Write) -> fmt::Result {
        const RULE: &str = "===========================================";
        const SEPARATOR: &str = "-------------------------------------------";

        match self.physical_port {
            Some(port) => writeln!(out, "Physical display port: {port}")?,
            None => writeln!(out, "Physical display port: null")?,
        }
        writeln!(out, "{RULE}")?;
        for mode in RestrictionMode::ALL {
            let title = match mode {
                RestrictionMode::Baseline => "Baseline",
                RestrictionMode::Passenger => "Passenger",
            };
            writeln!(out, "{title} mode UXR:")?;
            writeln!(out, "{SEPARATOR}")?;
            for (state, segments) in self.rules(mode).iter() {
                writeln!(out, "State:{state} num restrictions:{}", segments.len())?;
                for segment in segments {
                    writeln!(
                        out,
                        "Requires DO? {}",
                        segment.requires_distraction_optimization()
                    )?;
                    let mask = segment.restriction_bitmask();
                    writeln!(
                        out,
                        "Restrictions: {mask:#x} [{}]",
                        UxRestrictions::flag_names(mask).join(", ")
                    )?;
                    match segment.speed_range() {
                        Some(range) => writeln!(out, "Speed Range: {range}")?,
                        None => writeln!(out, "Speed Range: None")?,
                    }
                    writeln!(out, "{SEPARATOR}")?;
                }
            }
        }
        writeln!(out, "Max String length: {}", limit_label(self.max_string_length))?;
        writeln!(
            out,
            "Max Cumulative Content Items: {}",
            limit_label(self.max_cumulative_content_items)
        )?;
        writeln!(out, "Max Content depth: {}", limit_label(self.max_content_depth))?;
        writeln!(out, "{RULE}")
    }

    /// Assemble a configuration without running builder validation.
    #[cfg(test)]
    pub(crate) fn from_tables_unchecked(baseline: RuleTable, passenger: RuleTable) -> Self {
        Self {
            physical_port: None,
            max_content_depth: None,
            max_cumulative_content_items: None,
            max_string_length: None,
            baseline,
            passenger,
        }
    }
}

fn limit_label(limit: Option<u32>) -> String {
    limit.map_or_else(|| "unspecified".to_string(), |n| n.to_string())
}
