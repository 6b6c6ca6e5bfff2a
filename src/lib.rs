// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Chicane: a deterministic engine for dice-driven racing board games.
//!
//! This crate simulates a gear-and-dice racing board game on a directed
//! graph track:
//! - Typed track nodes (straights, curves with mandatory stops, grid,
//!   finish line) kept free of 2-cycles by construction
//! - Exact-distance movement resolution with curve-stop semantics and
//!   overshoot damage
//! - Target enumeration over every braking amount, with survivability
//!   filtering and a distinct "no legal move" signal
//! - A collision proximity model over the track's own geometry
//! - Swappable AI pilots built on the same primitives
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Race Driver (race)          │
//! ├─────────────────────────────────────┤
//! │      AI Strategy Engine (ai)        │
//! ├─────────────────────────────────────┤
//! │      Game Rules Layer (game)        │
//! └─────────────────────────────────────┘
//! ```
//!
//! Every random draw flows through an explicitly passed generator, so any
//! race is bit-for-bit reproducible from its seed.

pub mod ai;
pub mod error;
pub mod game;
pub mod race;

pub use error::{EngineError, EngineResult, GearError, TrackError};

// Re-export key types at crate root for convenience
pub use ai::PilotKind;
pub use game::{
    DamageAndPath, MoveOutcome, NodeId, NodeKind, PlayerId, PlayerState, TargetOption, Track,
    death_check, enumerate_targets, is_close_to, resolve_movement, validate_gear,
};
pub use race::{RaceConfig, RaceError, RaceResult, run_race};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
