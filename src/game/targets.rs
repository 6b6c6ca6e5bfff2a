//! Target enumeration: the braking sweep over movement resolution.
//!
//! A roll does not have to be used in full: each point of braking shortens
//! the move by one node and costs one hitpoint. Enumeration produces every
//! survivable (destination, overshoot, braking) option; the same node may
//! appear once per braking amount, so callers choose by index, never by
//! node.

use std::collections::BTreeSet;

use crate::error::EngineResult;
use crate::game::movement::resolve_movement;
use crate::game::track::{NodeId, Track};

/// One enumerated destination option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOption {
    /// Destination node.
    pub node: NodeId,
    /// Overshoot damage from the movement itself.
    pub overshoot: u32,
    /// Braking damage paid to shorten the roll.
    pub braking: u32,
    /// Node path from the current position to the destination, inclusive.
    pub path: Vec<NodeId>,
}

impl TargetOption {
    /// Combined hitpoint cost of taking this option.
    #[must_use]
    pub const fn total_damage(&self) -> u32 {
        self.overshoot + self.braking
    }

    /// Distance actually traveled.
    #[must_use]
    pub fn traveled(&self) -> u32 {
        (self.path.len() as u32).saturating_sub(1)
    }
}

/// Outcome of the two-phase move decision flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Options exist; the chosen index decides the car's fate.
    Options(Vec<TargetOption>),
    /// No destination is reachable even at maximum braking: the car is
    /// dead regardless of choice.
    Doomed,
}

/// Enumerate every survivable target for a roll.
///
/// Tries each braking amount `b` in `0..=roll` (braking the entire roll is
/// the car choosing not to move), resolves movement at distance `roll - b`,
/// and keeps options whose combined damage is strictly below `hitpoints`.
/// Options are ordered by braking amount, then ascending node id.
///
/// # Errors
///
/// Propagates [`EngineError`](crate::error::EngineError) from movement
/// resolution.
pub fn enumerate_targets(
    track: &Track,
    start: NodeId,
    roll: u32,
    hitpoints: i32,
    curve_stops: u32,
    final_lap: bool,
    forbidden: &BTreeSet<NodeId>,
) -> EngineResult<Vec<TargetOption>> {
    let mut options = Vec::new();
    for braking in 0..=roll {
        let reached = resolve_movement(
            track,
            start,
            roll - braking,
            forbidden,
            true,
            curve_stops,
            final_lap,
        )?;
        for (node, dp) in reached {
            let total = i64::from(dp.damage) + i64::from(braking);
            if total < i64::from(hitpoints) {
                options.push(TargetOption {
                    node,
                    overshoot: dp.damage,
                    braking,
                    path: dp.path,
                });
            }
        }
    }
    Ok(options)
}

/// Two-phase decision flow: enumerate survivable targets, and when none
/// exist retry at the largest roll reduction that keeps the car alive.
///
/// The retry ignores survivability: any destination it finds is a legal
/// move even though taking it kills the car. Only when the retry reaches
/// nothing at all is the car [`MoveOutcome::Doomed`] - boxed in with no
/// legal move, as opposed to free to "choose anything" and die.
///
/// # Errors
///
/// Propagates [`EngineError`](crate::error::EngineError) from movement
/// resolution.
pub fn death_check(
    track: &Track,
    start: NodeId,
    roll: u32,
    hitpoints: i32,
    curve_stops: u32,
    final_lap: bool,
    forbidden: &BTreeSet<NodeId>,
) -> EngineResult<MoveOutcome> {
    let options = enumerate_targets(track, start, roll, hitpoints, curve_stops, final_lap, forbidden)?;
    if !options.is_empty() {
        return Ok(MoveOutcome::Options(options));
    }

    let max_adjust = u32::try_from(hitpoints.max(1) - 1).unwrap_or(0);
    let braking = max_adjust.min(roll);
    let reached = resolve_movement(
        track,
        start,
        roll - braking,
        forbidden,
        true,
        curve_stops,
        final_lap,
    )?;
    if reached.is_empty() {
        return Ok(MoveOutcome::Doomed);
    }
    let options = reached
        .into_iter()
        .map(|(node, dp)| TargetOption {
            node,
            overshoot: dp.damage,
            braking,
            path: dp.path,
        })
        .collect();
    Ok(MoveOutcome::Options(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::track::NodeKind;

    fn chain(kinds: &[NodeKind]) -> Track {
        let mut track = Track::new();
        for (id, &kind) in kinds.iter().enumerate() {
            track.add_node(id as NodeId, kind).unwrap();
        }
        for id in 1..kinds.len() {
            track.add_edge((id - 1) as NodeId, id as NodeId).unwrap();
        }
        track
    }

    fn none() -> BTreeSet<NodeId> {
        BTreeSet::new()
    }

    #[test]
    fn test_enumeration_covers_all_braking_amounts() {
        let track = chain(&[
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
        ]);
        let options = enumerate_targets(&track, 0, 3, 18, 0, false, &none()).unwrap();
        // One option per braking amount: distances 3, 2, 1, 0.
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].node, 3);
        assert_eq!(options[0].braking, 0);
        assert_eq!(options[3].node, 0);
        assert_eq!(options[3].braking, 3);
        assert!(options.iter().all(|option| option.overshoot == 0));
    }

    #[test]
    fn test_survivability_filter() {
        let track = chain(&[
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
        ]);
        let options = enumerate_targets(&track, 0, 5, 3, 0, false, &none()).unwrap();
        assert!(!options.is_empty());
        for option in &options {
            assert!(
                option.total_damage() < 3,
                "option {option:?} exceeds survivable damage"
            );
        }
        // Braking 3 or more is fatal at 3 hitpoints.
        assert!(options.iter().all(|option| option.braking < 3));
    }

    #[test]
    fn test_options_are_addressed_by_index() {
        let track = chain(&[
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
        ]);
        let options = enumerate_targets(&track, 0, 2, 18, 0, false, &none()).unwrap();
        let nodes: Vec<NodeId> = options.iter().map(|option| option.node).collect();
        assert_eq!(nodes, vec![2, 1, 0]);
        // Index addresses the option, not the node.
        assert_eq!(options[1].braking, 1);
    }

    #[test]
    fn test_death_check_survivable() {
        let track = chain(&[NodeKind::Straight, NodeKind::Straight]);
        let outcome = death_check(&track, 0, 1, 18, 0, false, &none()).unwrap();
        assert!(matches!(outcome, MoveOutcome::Options(_)));
    }

    #[test]
    fn test_death_check_choose_anything() {
        // Every use of the roll costs at least 2 damage at 2 hitpoints, so
        // phase one is empty. Phase two retries at maximum braking and
        // offers the least-bad move even though taking it is fatal.
        let track = chain(&[
            NodeKind::Straight,
            NodeKind::Curve1,
            NodeKind::Straight,
            NodeKind::Straight,
        ]);
        let outcome = death_check(&track, 0, 3, 2, 0, false, &none()).unwrap();
        let MoveOutcome::Options(options) = outcome else {
            panic!("expected options");
        };
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].node, 2);
        assert_eq!(options[0].overshoot, 1);
        assert_eq!(options[0].braking, 1);
    }

    #[test]
    fn test_death_check_doomed() {
        // Boxed in: the only exit is occupied and the car must move.
        let track = chain(&[NodeKind::Straight, NodeKind::Straight, NodeKind::Straight]);
        let forbidden: BTreeSet<NodeId> = [1].into_iter().collect();
        let outcome = death_check(&track, 0, 2, 1, 0, false, &forbidden).unwrap();
        assert_eq!(outcome, MoveOutcome::Doomed);
    }
}
