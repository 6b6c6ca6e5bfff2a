//! Race invariants - sanity checks that detect bugs.
//!
//! These should never trigger in a correctly implemented race loop. If
//! they do, it indicates a bug in movement application or damage
//! accounting, not a gameplay condition.

use crate::game::{NodeKind, PlayerState, Track};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all race invariants.
///
/// Returns the violations found, empty if all invariants hold.
#[must_use]
pub fn check_invariants(
    track: &Track,
    players: &[PlayerState],
    starting_hitpoints: i32,
    laps: i32,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for player in players {
        if !track.contains(player.node) {
            violations.push(InvariantViolation {
                message: format!("player {} is on unknown node {}", player.id, player.node),
            });
            continue;
        }
        if player.hitpoints > starting_hitpoints {
            violations.push(InvariantViolation {
                message: format!(
                    "player {} has {} hitpoints, above the starting {}",
                    player.id, player.hitpoints, starting_hitpoints
                ),
            });
        }
        if player.laps_left > laps {
            violations.push(InvariantViolation {
                message: format!(
                    "player {} has {} laps left, above the race's {}",
                    player.id, player.laps_left, laps
                ),
            });
        }
        let on_curve = track.kind(player.node).is_some_and(NodeKind::is_curve);
        if !on_curve && player.curve_stops != 0 {
            violations.push(InvariantViolation {
                message: format!(
                    "player {} carries curve stops {} on a non-curve node",
                    player.id, player.curve_stops
                ),
            });
        }
    }

    // No two live, unfinished cars may share a node.
    for (i, a) in players.iter().enumerate() {
        if !a.is_alive() || a.has_finished() {
            continue;
        }
        for b in players.iter().skip(i + 1) {
            if b.is_alive() && !b.has_finished() && a.node == b.node {
                violations.push(InvariantViolation {
                    message: format!(
                        "players {} and {} both occupy node {}",
                        a.id, b.id, a.node
                    ),
                });
            }
        }
    }

    violations
}

/// Assert all race invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(
    track: &Track,
    players: &[PlayerState],
    starting_hitpoints: i32,
    laps: i32,
) {
    let violations = check_invariants(track, players, starting_hitpoints, laps);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Race invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(
    _track: &Track,
    _players: &[PlayerState],
    _starting_hitpoints: i32,
    _laps: i32,
) {
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::NodeId;

    fn two_node_track() -> Track {
        let mut track = Track::new();
        track.add_node(0, NodeKind::Start).unwrap();
        track.add_node(1, NodeKind::Finish).unwrap();
        track.add_edge(0, 1).unwrap();
        track
    }

    #[test]
    fn test_clean_state_has_no_violations() {
        let track = two_node_track();
        let players = vec![PlayerState::new(1, 0, 18, 2), PlayerState::new(2, 1, 18, 2)];
        assert!(check_invariants(&track, &players, 18, 2).is_empty());
    }

    #[test]
    fn test_shared_node_is_flagged() {
        let track = two_node_track();
        let players = vec![PlayerState::new(1, 0, 18, 2), PlayerState::new(2, 0, 18, 2)];
        let violations = check_invariants(&track, &players, 18, 2);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_unknown_node_is_flagged() {
        let track = two_node_track();
        let players = vec![PlayerState::new(1, 9 as NodeId, 18, 2)];
        assert!(!check_invariants(&track, &players, 18, 2).is_empty());
    }

    #[test]
    fn test_stray_curve_stops_are_flagged() {
        let track = two_node_track();
        let mut player = PlayerState::new(1, 0, 18, 2);
        player.curve_stops = 1;
        assert!(!check_invariants(&track, &[player], 18, 2).is_empty());
    }
}
