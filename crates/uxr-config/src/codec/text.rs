//! # Text Codec — JSON and YAML Documents
//!
//! The document is a single object:
//!
//! ```json
//! {
//!   "physical_port": 1,
//!   "max_content_depth": -1,
//!   "max_cumulative_content_items": -1,
//!   "max_string_length": 120,
//!   "parked_restrictions": [
//!     { "requires_distraction_optimization": false, "restriction_bitmask": 0 }
//!   ],
//!   "idling_restrictions": [],
//!   "moving_restrictions": [
//!     { "requires_distraction_optimization": true, "restriction_bitmask": 3,
//!       "speed_range": { "min_speed": 0.0, "max_speed": "Infinity" } }
//!   ],
//!   "unknown_restrictions": [],
//!   "passenger_parked_restrictions": [],
//!   "passenger_idling_restrictions": [],
//!   "passenger_moving_restrictions": [],
//!   "passenger_unknown_restrictions": []
//! }
//! ```
//!
//! `-1` marks an unspecified limit and `null` an absent port. JSON has no
//! literal for infinity, so an unbounded `max_speed` is the string
//! `"Infinity"`. A missing `max_speed` is unbounded; a missing `min_speed`
//! is malformed.
//!
//! Decoding is lenient about field names: the short forms `req_opt` and
//! `restrictions` are accepted as aliases, and unrecognized fields are logged
//! and skipped. Everything else is validated by the builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uxr_core::{ConfigError, DrivingState, RestrictionMode, RestrictionSegment, SpeedRange};

use super::{limit_from_wire, limit_to_wire, TEXT_LIST_ORDER};
use crate::builder::ConfigurationBuilder;
use crate::configuration::Configuration;
use crate::set::ConfigurationSet;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    physical_port: Option<i64>,
    #[serde(default)]
    max_content_depth: Option<i64>,
    #[serde(default)]
    max_cumulative_content_items: Option<i64>,
    #[serde(default)]
    max_string_length: Option<i64>,
    #[serde(default)]
    parked_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    idling_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    moving_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    unknown_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    passenger_parked_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    passenger_idling_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    passenger_moving_restrictions: Vec<SegmentDocument>,
    #[serde(default)]
    passenger_unknown_restrictions: Vec<SegmentDocument>,
    /// Always empty when encoding.
    #[serde(flatten)]
    unrecognized: BTreeMap<String, serde_json::Value>,
}

impl ConfigDocument {
    fn list(&self, state: DrivingState, mode: RestrictionMode) -> &Vec<SegmentDocument> {
        match (mode, state) {
            (RestrictionMode::Baseline, DrivingState::Parked) => &self.parked_restrictions,
            (RestrictionMode::Baseline, DrivingState::Idling) => &self.idling_restrictions,
            (RestrictionMode::Baseline, DrivingState::Moving) => &self.moving_restrictions,
            (RestrictionMode::Baseline, DrivingState::Unknown) => &self.unknown_restrictions,
            (RestrictionMode::Passenger, DrivingState::Parked) => {
                &self.passenger_parked_restrictions
            }
            (RestrictionMode::Passenger, DrivingState::Idling) => {
                &self.passenger_idling_restrictions
            }
            (RestrictionMode::Passenger, DrivingState::Moving) => {
                &self.passenger_moving_restrictions
            }
            (RestrictionMode::Passenger, DrivingState::Unknown) => {
                &self.passenger_unknown_restrictions
            }
        }
    }

    fn list_mut(&mut self, state: DrivingState, mode: RestrictionMode) -> &mut Vec<SegmentDocument> {
        match (mode, state) {
            (RestrictionMode::Baseline, DrivingState::Parked) => &mut self.parked_restrictions,
            (RestrictionMode::Baseline, DrivingState::Idling) => &mut self.idling_restrictions,
            (RestrictionMode::Baseline, DrivingState::Moving) => &mut self.moving_restrictions,
            (RestrictionMode::Baseline, DrivingState::Unknown) => &mut self.unknown_restrictions,
            (RestrictionMode::Passenger, DrivingState::Parked) => {
                &mut self.passenger_parked_restrictions
            }
            (RestrictionMode::Passenger, DrivingState::Idling) => {
                &mut self.passenger_idling_restrictions
            }
            (RestrictionMode::Passenger, DrivingState::Moving) => {
                &mut self.passenger_moving_restrictions
            }
            (RestrictionMode::Passenger, DrivingState::Unknown) => {
                &mut self.passenger_unknown_restrictions
            }
        }
    }

    fn from_configuration(config: &Configuration) -> Self {
        let mut doc = ConfigDocument {
            physical_port: config.physical_port().map(i64::from),
            max_content_depth: Some(limit_to_wire(config.max_content_depth())),
            max_cumulative_content_items: Some(limit_to_wire(
                config.max_cumulative_content_items(),
            )),
            max_string_length: Some(limit_to_wire(config.max_string_length())),
            ..Default::default()
        };
        for mode in RestrictionMode::ALL {
            for state in TEXT_LIST_ORDER {
                *doc.list_mut(state, mode) = config
                    .restrictions(state, mode)
                    .iter()
                    .map(SegmentDocument::from_segment)
                    .collect();
            }
        }
        doc
    }

    fn into_configuration(self) -> Result<Configuration, ConfigError> {
        log_unrecognized("configuration", &self.unrecognized);

        let mut builder = ConfigurationBuilder::new();
        if let Some(port) = self.physical_port {
            builder = builder.set_physical_port(port)?;
        }
        if let Some(depth) = optional_limit("max_content_depth", self.max_content_depth)? {
            builder = builder.set_max_content_depth(depth);
        }
        if let Some(items) = optional_limit(
            "max_cumulative_content_items",
            self.max_cumulative_content_items,
        )? {
            builder = builder.set_max_cumulative_content_items(items);
        }
        if let Some(length) = optional_limit("max_string_length", self.max_string_length)? {
            builder = builder.set_max_string_length(length);
        }

        for mode in RestrictionMode::ALL {
            for state in TEXT_LIST_ORDER {
                for segment in self.list(state, mode) {
                    builder = builder.set_restrictions(state, segment.to_segment(mode)?)?;
                }
            }
        }
        builder.build()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SegmentDocument {
    #[serde(default, alias = "req_opt")]
    requires_distraction_optimization: bool,
    #[serde(default, alias = "restrictions")]
    restriction_bitmask: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed_range: Option<SpeedRangeDocument>,
    #[serde(flatten)]
    unrecognized: BTreeMap<String, serde_json::Value>,
}

impl SegmentDocument {
    fn from_segment(segment: &RestrictionSegment) -> Self {
        Self {
            requires_distraction_optimization: segment.requires_distraction_optimization(),
            restriction_bitmask: segment.restriction_bitmask(),
            speed_range: segment.speed_range().map(|range| SpeedRangeDocument {
                min_speed: range.min_speed(),
                max_speed: range.max_speed(),
            }),
            unrecognized: BTreeMap::new(),
        }
    }

    fn to_segment(&self, mode: RestrictionMode) -> Result<RestrictionSegment, ConfigError> {
        log_unrecognized("restriction", &self.unrecognized);
        let range = self
            .speed_range
            .as_ref()
            .map(|r| SpeedRange::new(r.min_speed, r.max_speed))
            .transpose()?;
        RestrictionSegment::new(
            mode,
            self.requires_distraction_optimization,
            self.restriction_bitmask,
            range,
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SpeedRangeDocument {
    #[serde(with = "speed")]
    min_speed: f32,
    #[serde(with = "speed", default = "unbounded")]
    max_speed: f32,
}

fn unbounded() -> f32 {
    SpeedRange::MAX_SPEED
}

/// Speeds as JSON numbers, with infinity spelled as a string.
mod speed {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SpeedRepr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if *value == f32::INFINITY {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_f32(*value)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match SpeedRepr::deserialize(deserializer)? {
            SpeedRepr::Number(n) => Ok(n as f32),
            SpeedRepr::Text(s) => match s.as_str() {
                "Infinity" | "+Infinity" | "inf" | "+inf" | ".inf" => Ok(f32::INFINITY),
                other => Err(serde::de::Error::custom(format!(
                    "invalid speed value: {other:?}"
                ))),
            },
        }
    }
}

fn optional_limit(name: &str, value: Option<i64>) -> Result<Option<u32>, ConfigError> {
    match value {
        Some(v) => limit_from_wire(name, v),
        None => Ok(None),
    }
}

fn log_unrecognized(context: &str, fields: &BTreeMap<String, serde_json::Value>) {
    for name in fields.keys() {
        tracing::warn!(context, field = %name, "skipping unknown field");
    }
}

fn malformed(err: impl std::fmt::Display) -> ConfigError {
    ConfigError::MalformedEncoding(err.to_string())
}

/// Encode a configuration as compact JSON.
///
/// # Errors
///
/// Returns `ConfigError::MalformedEncoding` if serialization fails.
pub fn encode_json(config: &Configuration) -> Result<String, ConfigError> {
    let json = serde_json::to_string(&ConfigDocument::from_configuration(config)).map_err(malformed)?;
    tracing::debug!(bytes = json.len(), "encoded configuration as JSON");
    Ok(json)
}

/// Encode a configuration as indented JSON.
pub fn encode_json_pretty(config: &Configuration) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(&ConfigDocument::from_configuration(config)).map_err(malformed)
}

/// Decode a configuration from a JSON document.
///
/// # Errors
///
/// Returns `ConfigError::MalformedEncoding` for syntax or type errors, or
/// any error the builder raises for the decoded rules.
pub fn decode_json(json: &str) -> Result<Configuration, ConfigError> {
    let doc: ConfigDocument = serde_json::from_str(json).map_err(malformed)?;
    doc.into_configuration()
}

/// Decode a configuration from a YAML document of the same shape.
///
/// YAML's `.inf` is accepted for an unbounded `max_speed`.
pub fn decode_yaml(yaml: &str) -> Result<Configuration, ConfigError> {
    let doc: ConfigDocument = serde_yaml::from_str(yaml).map_err(malformed)?;
    doc.into_configuration()
}

/// Encode a configuration set as a JSON array.
pub fn encode_json_set(set: &ConfigurationSet) -> Result<String, ConfigError> {
    let docs: Vec<ConfigDocument> = set
        .configs()
        .iter()
        .map(ConfigDocument::from_configuration)
        .collect();
    let json = serde_json::to_string(&docs).map_err(malformed)?;
    tracing::debug!(
        configurations = docs.len(),
        bytes = json.len(),
        "encoded configuration set as JSON"
    );
    Ok(json)
}

/// Decode a configuration set from a JSON array.
///
/// Each element is decoded as by [`decode_json`], then the set is validated
/// as a whole.
pub fn decode_json_set(json: &str) -> Result<ConfigurationSet, ConfigError> {
    let docs: Vec<ConfigDocument> = serde_json::from_str(json).map_err(malformed)?;
    let configs = docs
        .into_iter()
        .map(ConfigDocument::into_configuration)
        .collect::<Result<Vec<_>, _>>()?;
    ConfigurationSet::new(configs)
}
