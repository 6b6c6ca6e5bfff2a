//! Move-selection heuristics.

use rand::Rng;

use crate::game::{NodeKind, PlayerState, TargetOption, Track};

/// Full heuristic target choice: a strict priority pipeline over the
/// enumerated options, with remaining ties broken uniformly at random.
pub(crate) fn heuristic_move<R: Rng>(
    track: &Track,
    you: &PlayerState,
    targets: &[TargetOption],
    rng: &mut R,
) -> usize {
    if targets.is_empty() {
        return 0;
    }
    let mut candidates: Vec<usize> = (0..targets.len()).collect();

    // 1. Least total damage.
    if let Some(best) = candidates.iter().map(|&i| targets[i].total_damage()).min() {
        candidates.retain(|&i| targets[i].total_damage() == best);
    }

    // 2. A heavy curve ahead: enter it as shallowly as the roll allows
    //    rather than racing deep past the entry.
    if let Some((distance_curve, entry)) = track.next_curve_entry(you.node) {
        if track.kind(entry).map_or(0, NodeKind::stop_count) > 1 {
            let curve_targets: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| ends_in_curve(track, &targets[i]))
                .collect();
            if let Some(nearest) = curve_targets.iter().map(|&i| targets[i].traveled()).min() {
                let bound = distance_curve.max(nearest);
                candidates = curve_targets
                    .into_iter()
                    .filter(|&i| targets[i].traveled() <= bound)
                    .collect();
            }
        }
    }

    // 3. Farthest traveled.
    if let Some(farthest) = candidates.iter().map(|&i| targets[i].traveled()).max() {
        candidates.retain(|&i| targets[i].traveled() == farthest);
    }

    // 4. Prefer ending in a curve; failing that, close on the next one.
    let curve_targets: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| ends_in_curve(track, &targets[i]))
        .collect();
    if curve_targets.is_empty() {
        if let Some(closest) = candidates
            .iter()
            .map(|&i| curve_distance(track, targets[i].node))
            .min()
        {
            candidates.retain(|&i| curve_distance(track, targets[i].node) == closest);
        }
    } else {
        candidates = curve_targets;
    }

    match candidates.as_slice() {
        [] => 0,
        [only] => *only,
        several => several[rng.gen_range(0..several.len())],
    }
}

/// Baseline target choice: least damage, then farthest, then first.
pub(crate) fn steady_move(targets: &[TargetOption]) -> usize {
    let mut best = 0;
    for index in 1..targets.len() {
        let candidate = &targets[index];
        let held = &targets[best];
        let candidate_key = (candidate.total_damage(), std::cmp::Reverse(candidate.traveled()));
        let held_key = (held.total_damage(), std::cmp::Reverse(held.traveled()));
        if candidate_key < held_key {
            best = index;
        }
    }
    best
}

fn ends_in_curve(track: &Track, target: &TargetOption) -> bool {
    track.kind(target.node).is_some_and(NodeKind::is_curve)
}

fn curve_distance(track: &Track, node: crate::game::NodeId) -> u32 {
    track.next_curve_entry(node).map_or(u32::MAX, |(distance, _)| distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{NodeId, enumerate_targets};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

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

    fn player_at(node: NodeId) -> PlayerState {
        PlayerState {
            id: 1,
            node,
            hitpoints: 18,
            gear: 3,
            curve_stops: 0,
            laps_left: 1,
        }
    }

    #[test]
    fn test_damage_dominates() {
        let track = chain(&[
            NodeKind::Straight,
            NodeKind::Curve1,
            NodeKind::Straight,
            NodeKind::Straight,
        ]);
        let you = player_at(0);
        let targets =
            enumerate_targets(&track, 0, 3, 18, 0, false, &BTreeSet::new()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let choice = heuristic_move(&track, &you, &targets, &mut rng);
        // Blowing through the curve costs damage; braking into it is free.
        assert_eq!(targets[choice].total_damage(), 0);
    }

    #[test]
    fn test_farthest_among_damage_free() {
        let track = chain(&[NodeKind::Straight; 6]);
        let you = player_at(0);
        let targets =
            enumerate_targets(&track, 0, 4, 18, 0, false, &BTreeSet::new()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let choice = heuristic_move(&track, &you, &targets, &mut rng);
        assert_eq!(targets[choice].node, 4);
        assert_eq!(targets[choice].braking, 0);
    }

    #[test]
    fn test_shallow_entry_into_heavy_curve() {
        // Roll reaches nodes 3 (curve) and 4 (deeper in the curve) only by
        // braking; the pipeline keeps the shallow entry.
        let track = chain(&[
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Straight,
            NodeKind::Curve2,
            NodeKind::Curve2,
            NodeKind::Straight,
        ]);
        let you = player_at(0);
        let targets =
            enumerate_targets(&track, 0, 4, 18, 0, false, &BTreeSet::new()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let choice = heuristic_move(&track, &you, &targets, &mut rng);
        assert_eq!(targets[choice].node, 3);
    }

    #[test]
    fn test_fallback_on_empty() {
        let track = chain(&[NodeKind::Straight]);
        let you = player_at(0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(heuristic_move(&track, &you, &[], &mut rng), 0);
    }

    #[test]
    fn test_steady_move_least_damage_then_farthest() {
        let track = chain(&[NodeKind::Straight; 5]);
        let targets =
            enumerate_targets(&track, 0, 3, 18, 0, false, &BTreeSet::new()).unwrap();
        let choice = steady_move(&targets);
        assert_eq!(targets[choice].node, 3);
    }
}
