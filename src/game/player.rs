//! Player snapshots and the gear legality rule.

use serde::{Deserialize, Serialize};

use crate::error::GearError;
use crate::game::dice::{MAX_GEAR, MIN_GEAR, PIT_GEAR_LIMIT};
use crate::game::track::NodeId;

/// Unique identifier for a player.
pub type PlayerId = u8;

/// Snapshot of a single car as consumed by the core.
///
/// The external game driver owns and mutates this state; the core only
/// reads snapshots and returns proposed deltas (damage, destination, path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Player identity.
    pub id: PlayerId,
    /// Node the car currently occupies.
    pub node: NodeId,
    /// Remaining hitpoints; the race is over for the car at zero or below.
    pub hitpoints: i32,
    /// Current gear, 0 before the race starts.
    pub gear: u8,
    /// Turns the car has ended inside its current curve run.
    pub curve_stops: u32,
    /// Laps still to complete; negative once the car has finished.
    pub laps_left: i32,
}

impl PlayerState {
    /// Create a car on the grid: gear 0, no curve stops.
    #[must_use]
    pub const fn new(id: PlayerId, node: NodeId, hitpoints: i32, laps: i32) -> Self {
        Self {
            id,
            node,
            hitpoints,
            gear: 0,
            curve_stops: 0,
            laps_left: laps,
        }
    }

    /// Check whether the car is still in the race.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hitpoints > 0
    }

    /// Check whether the car has crossed the line on its last lap.
    #[must_use]
    pub const fn has_finished(&self) -> bool {
        self.laps_left < 0
    }

    /// Check whether the car is on its final lap.
    #[must_use]
    pub const fn on_final_lap(&self) -> bool {
        self.laps_left == 0
    }
}

/// Validate a gear change and return its hitpoint cost.
///
/// A change is legal when the gears are adjacent (cost 0), or when
/// downshifting `old - new - 1 = d` extra steps with `0 < d < 4` and
/// strictly more than `d` hitpoints remaining (cost `d`, paid immediately
/// by the driver). Upshifting more than one step is never legal, and gears
/// above 4 are not selectable in the pit lane.
///
/// # Errors
///
/// Returns a [`GearError`] describing why the request was rejected; the
/// request is never silently clamped.
pub fn validate_gear(
    old: u8,
    new: u8,
    hitpoints: i32,
    in_pits: bool,
) -> Result<i32, GearError> {
    if new < MIN_GEAR || new > MAX_GEAR {
        return Err(GearError::OutOfRange(new));
    }
    if in_pits && new > PIT_GEAR_LIMIT {
        return Err(GearError::PitLimit(new));
    }
    if new > old {
        if new - old > 1 {
            return Err(GearError::UpshiftTooFar { from: old, to: new });
        }
        return Ok(0);
    }
    if old - new <= 1 {
        return Ok(0);
    }
    let damage = i32::from(old - new) - 1;
    if damage < 4 && hitpoints > damage {
        Ok(damage)
    } else {
        Err(GearError::DownshiftTooFar { from: old, to: new })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_shifts_are_free() {
        assert_eq!(validate_gear(3, 3, 5, false), Ok(0));
        assert_eq!(validate_gear(3, 4, 5, false), Ok(0));
        assert_eq!(validate_gear(3, 2, 5, false), Ok(0));
        // Standing start: gear 0 -> 1.
        assert_eq!(validate_gear(0, 1, 5, false), Ok(0));
    }

    #[test]
    fn test_deep_upshift_rejected() {
        assert_eq!(
            validate_gear(2, 4, 20, false),
            Err(GearError::UpshiftTooFar { from: 2, to: 4 })
        );
        assert_eq!(
            validate_gear(0, 2, 20, false),
            Err(GearError::UpshiftTooFar { from: 0, to: 2 })
        );
    }

    #[test]
    fn test_deep_downshift_costs_hitpoints() {
        // 6 -> 4: d = 1.
        assert_eq!(validate_gear(6, 4, 2, false), Ok(1));
        // 6 -> 2: d = 3, needs hitpoints > 3.
        assert_eq!(validate_gear(6, 2, 4, false), Ok(3));
        assert_eq!(
            validate_gear(6, 2, 3, false),
            Err(GearError::DownshiftTooFar { from: 6, to: 2 })
        );
        // 6 -> 1: d = 4 is outside the window regardless of hitpoints.
        assert_eq!(
            validate_gear(6, 1, 100, false),
            Err(GearError::DownshiftTooFar { from: 6, to: 1 })
        );
    }

    #[test]
    fn test_out_of_range_gears() {
        assert_eq!(validate_gear(1, 0, 5, false), Err(GearError::OutOfRange(0)));
        assert_eq!(validate_gear(6, 7, 5, false), Err(GearError::OutOfRange(7)));
    }

    #[test]
    fn test_pit_lane_limit() {
        assert_eq!(validate_gear(4, 5, 5, true), Err(GearError::PitLimit(5)));
        assert_eq!(validate_gear(4, 4, 5, true), Ok(0));
        assert_eq!(validate_gear(4, 5, 5, false), Ok(0));
    }

    #[test]
    fn test_snapshot_flags() {
        let mut player = PlayerState::new(1, 0, 18, 2);
        assert!(player.is_alive());
        assert!(!player.has_finished());
        assert!(!player.on_final_lap());
        player.laps_left = 0;
        assert!(player.on_final_lap());
        player.laps_left = -1;
        assert!(player.has_finished());
        player.hitpoints = 0;
        assert!(!player.is_alive());
    }
}
