//! Movement resolution: exact-distance reachability with curve semantics.
//!
//! Given a start node and a distance budget, computes every node reachable
//! at exactly that distance together with the minimum damage required and
//! one path achieving it. Straight-line traversal is shortest-path
//! deduplicated; curve interiors are distance-sensitive (stop accounting)
//! and may be revisited at different distances. Leaving a curve before its
//! mandatory stops are complete costs the remaining distance budget as
//! overshoot damage and continues as a fresh search past the exit.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::{EngineError, EngineResult};
use crate::game::track::{NodeId, NodeKind, Track};

/// A movement result: damage to reach a destination plus one cheapest path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageAndPath {
    /// Overshoot damage required to reach the destination.
    pub damage: u32,
    /// Node sequence from start to destination, both inclusive.
    ///
    /// Always one node longer than the distance traveled.
    pub path: Vec<NodeId>,
}

/// Compute all nodes reachable at exactly `distance` from `start`.
///
/// * `forbidden` - nodes occupied by other cars; never entered.
/// * `allow_curve_entry` - whether a straight->curve edge may be taken.
/// * `stops_done` - stops already completed in the current curve run.
/// * `final_lap` - when set, a finish node encountered at any distance
///   short of the full budget is also a valid damage-0 target (a car may
///   stop exactly on the line).
///
/// Results merge by destination keeping the lower damage. Iteration order
/// of the returned map is ascending node id, so callers inherit a
/// deterministic ordering independent of graph adjacency order.
///
/// # Errors
///
/// Returns an [`EngineError`] if `start` is not in the track or if path
/// reconstruction detects corrupt traversal state.
pub fn resolve_movement(
    track: &Track,
    start: NodeId,
    distance: u32,
    forbidden: &BTreeSet<NodeId>,
    allow_curve_entry: bool,
    stops_done: u32,
    final_lap: bool,
) -> EngineResult<BTreeMap<NodeId, DamageAndPath>> {
    let start_kind = kind_of(track, start)?;

    let mut layers: Vec<BTreeSet<NodeId>> = vec![BTreeSet::new(); distance as usize + 1];
    layers[0].insert(start);

    // Only non-curve nodes are deduplicated across layers: straight-line
    // shortest paths are distance-monotonic, curve traversal is not.
    let mut visited: HashSet<NodeId> = HashSet::new();
    if !start_kind.is_curve() {
        visited.insert(start);
    }

    let mut results: BTreeMap<NodeId, DamageAndPath> = BTreeMap::new();

    for k in 0..distance {
        let frontier: Vec<NodeId> = layers[k as usize].iter().copied().collect();
        for node in frontier {
            let node_kind = kind_of(track, node)?;
            for &child in track.children(node) {
                if forbidden.contains(&child) {
                    continue;
                }
                let child_kind = kind_of(track, child)?;
                match (node_kind.is_curve(), child_kind.is_curve()) {
                    (false, false) => {
                        if visited.insert(child) {
                            layers[k as usize + 1].insert(child);
                            if final_lap && child_kind == NodeKind::Finish && k + 1 < distance {
                                let path =
                                    reconstruct_path(track, &layers, k as usize + 1, child, allow_curve_entry)?;
                                merge_min(&mut results, child, DamageAndPath { damage: 0, path });
                            }
                        }
                    }
                    (false, true) => {
                        if allow_curve_entry {
                            layers[k as usize + 1].insert(child);
                        }
                    }
                    (true, true) => {
                        layers[k as usize + 1].insert(child);
                    }
                    (true, false) => {
                        let stops_to_do = node_kind.stop_count().saturating_sub(stops_done);
                        if stops_to_do > 1 {
                            continue;
                        }
                        let allow_reentry = stops_to_do == 0;
                        let exit_damage = if stops_to_do == 0 { 0 } else { distance - k };
                        let prefix =
                            reconstruct_path(track, &layers, k as usize, node, allow_curve_entry)?;
                        if final_lap && child_kind == NodeKind::Finish {
                            let mut path = prefix.clone();
                            path.push(child);
                            merge_min(
                                &mut results,
                                child,
                                DamageAndPath { damage: exit_damage, path },
                            );
                        }
                        let sub = resolve_movement(
                            track,
                            child,
                            distance - k - 1,
                            forbidden,
                            allow_reentry,
                            0,
                            final_lap,
                        )?;
                        for (dest, sub_dp) in sub {
                            let mut path = prefix.clone();
                            path.extend_from_slice(&sub_dp.path);
                            let merged = DamageAndPath {
                                damage: sub_dp.damage + exit_damage,
                                path,
                            };
                            check_path_length(&merged.path, distance as usize + 1)?;
                            merge_min(&mut results, dest, merged);
                        }
                    }
                }
            }
        }
    }

    let final_frontier: Vec<NodeId> = layers[distance as usize].iter().copied().collect();
    for node in final_frontier {
        let path = reconstruct_path(track, &layers, distance as usize, node, allow_curve_entry)?;
        check_path_length(&path, distance as usize + 1)?;
        merge_min(&mut results, node, DamageAndPath { damage: 0, path });
    }

    Ok(results)
}

/// Keep the lower-damage entry on collision.
fn merge_min(results: &mut BTreeMap<NodeId, DamageAndPath>, node: NodeId, dp: DamageAndPath) {
    match results.entry(node) {
        std::collections::btree_map::Entry::Vacant(entry) => {
            entry.insert(dp);
        }
        std::collections::btree_map::Entry::Occupied(mut entry) => {
            if dp.damage < entry.get().damage {
                entry.insert(dp);
            }
        }
    }
}

/// Fail fast on a path of unexpected length: corrupt traversal state.
fn check_path_length(path: &[NodeId], expected: usize) -> EngineResult<()> {
    if path.len() == expected {
        Ok(())
    } else {
        Err(EngineError::PathLength {
            expected,
            found: path.len(),
        })
    }
}

/// Walk backward through the per-distance layers to recover one path from
/// the start node to `node` at layer `layer`.
///
/// At each step any predecessor in the previous layer with a traversable
/// edge to the current node qualifies; ties resolve to the smallest node id
/// so reconstruction is deterministic. Curve->straight edges never qualify
/// (exits leave the layer walk through recursion), and straight->curve
/// edges qualify only while curve entry is permitted.
fn reconstruct_path(
    track: &Track,
    layers: &[BTreeSet<NodeId>],
    layer: usize,
    node: NodeId,
    allow_curve_entry: bool,
) -> EngineResult<Vec<NodeId>> {
    let mut reversed = vec![node];
    let mut current = node;
    for k in (0..layer).rev() {
        let current_curve = kind_of(track, current)?.is_curve();
        let mut predecessor = None;
        for &candidate in &layers[k] {
            if !track.children(candidate).contains(&current) {
                continue;
            }
            let candidate_curve = kind_of(track, candidate)?.is_curve();
            let traversable = match (candidate_curve, current_curve) {
                (true, false) => false,
                (false, true) => allow_curve_entry,
                _ => true,
            };
            if traversable {
                predecessor = Some(candidate);
                break;
            }
        }
        let Some(previous) = predecessor else {
            return Err(EngineError::MissingPredecessor { node: current, layer: k });
        };
        reversed.push(previous);
        current = previous;
    }
    reversed.reverse();
    Ok(reversed)
}

fn kind_of(track: &Track, node: NodeId) -> EngineResult<NodeKind> {
    track.kind(node).ok_or(EngineError::UnknownNode(node))
}
