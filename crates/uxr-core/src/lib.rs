//! # uxr-core — Rule Model for UX Restrictions
//!
//! This crate defines the immutable value types from which a UX restriction
//! configuration is assembled. It knows nothing about how rules are grouped,
//! validated as a whole, resolved, or encoded; that lives in `uxr-config`.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for vehicle state.** `DrivingState` and `RestrictionMode`
//!    are exhaustive enums with a fixed iteration order. Wire formats depend
//!    on that order, so it is exposed as `DrivingState::ALL`.
//!
//! 2. **Validated constructors.** `SpeedRange::new()` and
//!    `RestrictionSegment::new()` are the only construction paths and return
//!    `Result`. A segment that waives distraction optimization while still
//!    declaring active restrictions cannot exist.
//!
//! 3. **Exact bounds.** The open upper bound of a speed range is
//!    `f32::INFINITY`, never a large magic number, so adjacency checks can
//!    compare bounds exactly.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `uxr-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod restrictions;
pub mod segment;
pub mod speed;
pub mod state;

// Re-export primary types for ergonomic imports.
pub use error::ConfigError;
pub use restrictions::UxRestrictions;
pub use segment::RestrictionSegment;
pub use speed::SpeedRange;
pub use state::{DrivingState, RestrictionMode, DRIVING_STATE_COUNT};
