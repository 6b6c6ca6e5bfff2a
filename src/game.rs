//! Game rules layer for Chicane.
//!
//! Implements the board-game rules on top of the track graph:
//! - Track with typed nodes (straights, curves, start boxes, finish line)
//! - Gear-dependent dice
//! - Movement resolution (exact-distance reachability, curve stops)
//! - Target enumeration (braking sweep, survivability, death check)
//! - Collision proximity rules
//! - Player snapshots and gear legality

mod collision;
mod dice;
mod movement;
mod player;
mod targets;
mod track;

pub use collision::{COLLISION_CHANCE_IN_20, collision_roll, is_close_to};
pub use dice::{
    MAX_GEAR, MAX_ROLL, MIN_GEAR, PIT_GEAR_LIMIT, max_roll, min_roll, roll_gear, roll_range,
};
pub use movement::{DamageAndPath, resolve_movement};
pub use player::{PlayerId, PlayerState, validate_gear};
pub use targets::{MoveOutcome, TargetOption, death_check, enumerate_targets};
pub use track::{NodeId, NodeKind, ParentMap, Track};
