//! AI strategy layer for Chicane.
//!
//! Strategies are a tagged variant so the race driver can mix pilots
//! without generics. Gear selection is a pure function of the snapshot;
//! move selection threads the caller's RNG for tie-breaking only, so a
//! fixed seed reproduces every decision.

mod gear;
mod moves;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{PlayerState, TargetOption, Track};

/// Available pilot strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotKind {
    /// Full heuristic pipeline: curve-aware gearing, priority-filtered
    /// move choice.
    Heuristic,
    /// Conservative baseline that never leaves the low gears.
    Steady,
}

impl PilotKind {
    /// Stable name for CLI output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PilotKind::Heuristic => "heuristic",
            PilotKind::Steady => "steady",
        }
    }

    /// Choose a gear for this turn.
    ///
    /// Deterministic in the snapshot; the result is already clamped to the
    /// gear legality rule (with the documented one-step demotion), so the
    /// driver's validation should never reject it. `in_pits` is supplied
    /// by the driver.
    #[must_use]
    pub fn select_gear(self, track: &Track, you: &PlayerState, in_pits: bool) -> u8 {
        match self {
            PilotKind::Heuristic => gear::heuristic_gear(track, you, in_pits),
            PilotKind::Steady => gear::steady_gear(track, you, in_pits),
        }
    }

    /// Choose a target by index into `targets`.
    ///
    /// Remaining ties break uniformly at random through `rng`; with no
    /// candidates surviving the filters the first enumerated option is the
    /// documented fallback.
    pub fn select_move<R: Rng>(
        self,
        track: &Track,
        you: &PlayerState,
        targets: &[TargetOption],
        rng: &mut R,
    ) -> usize {
        match self {
            PilotKind::Heuristic => moves::heuristic_move(track, you, targets, rng),
            PilotKind::Steady => moves::steady_move(targets),
        }
    }
}
