//! # Binary Codec — Compact Transfer Layout
//!
//! All integers and floats are little-endian.
//!
//! ```text
//! for mode in [baseline, passenger]:
//!     for state in [unknown, parked, idling, moving]:
//!         u32  segment count
//!         per segment:
//!             i32  mode code (0 baseline, 1 passenger)
//!             u8   requires distraction optimization (0/1)
//!             u32  restriction bitmask
//!             u8   speed range present (0/1)
//!             f32  min speed   } only when present
//!             f32  max speed   }
//! u8   physical port present (0/1)
//! u8   physical port (0 when absent)
//! i32  max content depth              } -1 when unspecified
//! i32  max cumulative content items   }
//! i32  max string length              }
//! ```
//!
//! Decoding is strict. Truncated input, trailing bytes, flag bytes other
//! than 0 or 1, unknown mode codes, and a segment whose mode code does not
//! match the list it appears in are all `ConfigError::MalformedEncoding`.
//! The decoded rules then pass through the builder.

use uxr_core::{ConfigError, RestrictionMode, RestrictionSegment, SpeedRange};

use super::{limit_from_wire, limit_to_wire, BINARY_LIST_ORDER};
use crate::builder::ConfigurationBuilder;
use crate::configuration::Configuration;

/// Encode a configuration in the binary layout.
pub fn encode_binary(config: &Configuration) -> Vec<u8> {
    let mut writer = Writer::default();
    for mode in RestrictionMode::ALL {
        for state in BINARY_LIST_ORDER {
            let segments = config.restrictions(state, mode);
            writer.put_u32(segments.len() as u32);
            for segment in segments {
                writer.put_segment(segment);
            }
        }
    }
    writer.put_flag(config.physical_port().is_some());
    writer.put_u8(config.physical_port().unwrap_or(0));
    for limit in [
        config.max_content_depth(),
        config.max_cumulative_content_items(),
        config.max_string_length(),
    ] {
        writer.put_limit(limit);
    }
    tracing::debug!(bytes = writer.buf.len(), "encoded configuration as binary");
    writer.buf
}

/// Decode a configuration from the binary layout.
///
/// # Errors
///
/// Returns `ConfigError::MalformedEncoding` for any structural fault, or
/// any error the builder raises for the decoded rules.
pub fn decode_binary(bytes: &[u8]) -> Result<Configuration, ConfigError> {
    let mut reader = Reader::new(bytes);
    let mut builder = ConfigurationBuilder::new();

    for mode in RestrictionMode::ALL {
        for state in BINARY_LIST_ORDER {
            let count = reader.u32()?;
            for _ in 0..count {
                let segment = reader.segment()?;
                if segment.mode() != mode {
                    return Err(ConfigError::MalformedEncoding(format!(
                        "{} segment found in {mode} list for {state}",
                        segment.mode()
                    )));
                }
                builder = builder.set_restrictions(state, segment)?;
            }
        }
    }

    let has_port = reader.flag()?;
    let port = reader.u8()?;
    if has_port {
        builder = builder.set_physical_port(i64::from(port))?;
    }
    if let Some(depth) = limit_from_wire("max_content_depth", i64::from(reader.i32()?))? {
        builder = builder.set_max_content_depth(depth);
    }
    if let Some(items) =
        limit_from_wire("max_cumulative_content_items", i64::from(reader.i32()?))?
    {
        builder = builder.set_max_cumulative_content_items(items);
    }
    if let Some(length) = limit_from_wire("max_string_length", i64::from(reader.i32()?))? {
        builder = builder.set_max_string_length(length);
    }
    reader.finish()?;

    builder.build()
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn put_flag(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn put_limit(&mut self, limit: Option<u32>) {
        let wire = limit_to_wire(limit);
        // The builder caps limits at i32::MAX.
        debug_assert!(
            i32::try_from(wire).is_ok(),
            "content limit {wire} exceeds the i32 wire range"
        );
        self.put_i32(i32::try_from(wire).unwrap_or(i32::MAX));
    }

    fn put_segment(&mut self, segment: &RestrictionSegment) {
        self.put_i32(segment.mode().code());
        self.put_flag(segment.requires_distraction_optimization());
        self.put_u32(segment.restriction_bitmask());
        match segment.speed_range() {
            Some(range) => {
                self.put_flag(true);
                self.put_f32(range.min_speed());
                self.put_f32(range.max_speed());
            }
            None => self.put_flag(false),
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ConfigError> {
        let end = self.pos + N;
        let chunk = self.bytes.get(self.pos..end).ok_or_else(|| {
            ConfigError::MalformedEncoding(format!(
                "truncated input: needed {N} bytes at offset {}, have {}",
                self.pos,
                self.bytes.len().saturating_sub(self.pos)
            ))
        })?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, ConfigError> {
        Ok(self.take::<1>()?[0])
    }

    fn flag(&mut self) -> Result<bool, ConfigError> {
        let offset = self.pos;
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ConfigError::MalformedEncoding(format!(
                "invalid flag byte {other} at offset {offset}"
            ))),
        }
    }

    fn u32(&mut self) -> Result<u32, ConfigError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn i32(&mut self) -> Result<i32, ConfigError> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    fn f32(&mut self) -> Result<f32, ConfigError> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    fn segment(&mut self) -> Result<RestrictionSegment, ConfigError> {
        let mode = RestrictionMode::from_code(self.i32()?)
            .map_err(|e| ConfigError::MalformedEncoding(e.to_string()))?;
        let requires_distraction_optimization = self.flag()?;
        let restriction_bitmask = self.u32()?;
        let speed_range = if self.flag()? {
            let min = self.f32()?;
            let max = self.f32()?;
            Some(SpeedRange::new(min, max)?)
        } else {
            None
        };
        RestrictionSegment::new(
            mode,
            requires_distraction_optimization,
            restriction_bitmask,
            speed_range,
        )
    }

    fn finish(&self) -> Result<(), ConfigError> {
        let trailing = self.bytes.len() - self.pos;
        if trailing != 0 {
            return Err(ConfigError::MalformedEncoding(format!(
                "{trailing} trailing bytes after configuration"
            )));
        }
        Ok(())
    }
}
