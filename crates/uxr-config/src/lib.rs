//! # uxr-config — UX Restriction Configuration Engine
//!
//! Assembles the rule model from `uxr-core` into a validated, immutable
//! [`Configuration`], resolves the restrictions in force for a driving state,
//! speed, and restriction mode, and encodes configurations for persistence
//! and transfer.
//!
//! ## Modules
//!
//! - **Configuration** (`configuration.rs`): the frozen aggregate, per-state
//!   rule tables indexed by `DrivingState`, parameter comparison and the
//!   diagnostics dump.
//!
//! - **Builder** (`builder.rs`): the only construction path. Fills unconfigured
//!   states with the fully-restricted default, then checks bucket shape, speed
//!   coverage, and speed continuity before freezing.
//!
//! - **Resolver** (`resolver.rs`): pure lookup with passenger-to-baseline
//!   fallback. Never fails; unresolvable lookups yield the fully-restricted
//!   fail-safe.
//!
//! - **Codec** (`codec/`): textual JSON form (YAML accepted for authoring) and
//!   a compact little-endian binary form. Both decoders route through the
//!   builder, so a decoded configuration satisfies every build invariant.
//!
//! - **Configuration set** (`set.rs`): per-display configurations validated
//!   together and routed by physical port.
//!
//! ## Example
//!
//! ```
//! use uxr_config::{ConfigurationBuilder, DrivingState, RestrictionMode, RestrictionSegment, SpeedRange};
//!
//! let slow = RestrictionSegment::baseline(true, 0x3)?
//!     .with_speed_range(SpeedRange::new(0.0, 13.9)?);
//! let fast = RestrictionSegment::baseline(false, 0x0)?
//!     .with_speed_range(SpeedRange::starting_at(13.9)?);
//!
//! let config = ConfigurationBuilder::new()
//!     .set_restrictions(DrivingState::Moving, slow)?
//!     .set_restrictions(DrivingState::Moving, fast)?
//!     .build()?;
//!
//! let resolved = config.resolve(DrivingState::Moving, 10.0, RestrictionMode::Baseline);
//! assert_eq!(resolved.restriction_bitmask, 0x3);
//! # Ok::<(), uxr_config::ConfigError>(())
//! ```

pub mod builder;
pub mod codec;
pub mod configuration;
pub mod resolver;
pub mod set;

pub use builder::{validate_port, ConfigurationBuilder};
pub use codec::binary::{decode_binary, encode_binary};
pub use codec::text::{
    decode_json, decode_json_set, decode_yaml, encode_json, encode_json_pretty, encode_json_set,
};
pub use configuration::Configuration;
pub use resolver::ResolvedRestriction;
pub use set::ConfigurationSet;

// Re-export the rule model so consumers need a single dependency.
pub use uxr_core::{
    ConfigError, DrivingState, RestrictionMode, RestrictionSegment, SpeedRange, UxRestrictions,
};
