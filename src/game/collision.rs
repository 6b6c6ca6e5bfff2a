//! Collision proximity rules and damage rolls.
//!
//! Cars brushing wheels is a matter of track geometry: two occupied nodes
//! are "close" when the graph puts them beside each other without the
//! track's own ordering guaranteeing a safe following distance. Each close
//! pair risks bodywork damage once per turn.

use rand::Rng;

use crate::game::track::{NodeId, ParentMap, Track};

/// Chance in 20 that a close car takes a point of collision damage.
pub const COLLISION_CHANCE_IN_20: u32 = 4;

/// Decide whether two occupied nodes are close enough to risk collision.
///
/// Close means directly adjacent in either direction without one car being
/// safely "in front of" the other, or sharing a parent or child node -
/// unless a shared parent has a direct edge to a shared child, in which
/// case the graph's own ordering already separates the two lanes.
#[must_use]
pub fn is_close_to(track: &Track, parents: &ParentMap, a: NodeId, b: NodeId) -> bool {
    if a == b {
        return true;
    }
    let adjacent = track.children(a).contains(&b) || track.children(b).contains(&a);
    if adjacent && !in_front_of(track, a, b) && !in_front_of(track, b, a) {
        return true;
    }
    shares_unchorded_structure(track, parents, a, b)
}

/// Roll one collision check: true when the car takes a point of damage.
pub fn collision_roll<R: Rng>(rng: &mut R) -> bool {
    rng.gen_range(0..20) < COLLISION_CHANCE_IN_20
}

/// "In front of" holds when a forward path from `x` to `y` exists and the
/// geometry confirms it: either one hop into a node with at most one exit,
/// or a confirmed two-hop path.
fn in_front_of(track: &Track, x: NodeId, y: NodeId) -> bool {
    if track.children(x).contains(&y) && track.children(y).len() <= 1 {
        return true;
    }
    track
        .children(x)
        .iter()
        .any(|&mid| track.children(mid).contains(&y))
}

/// Shared parent or child without a separating chord.
fn shares_unchorded_structure(
    track: &Track,
    parents: &ParentMap,
    a: NodeId,
    b: NodeId,
) -> bool {
    let parents_of = |node: NodeId| {
        parents
            .get(node as usize)
            .map_or(&[] as &[NodeId], Vec::as_slice)
    };
    let common_parents: Vec<NodeId> = parents_of(a)
        .iter()
        .filter(|parent| parents_of(b).contains(parent))
        .copied()
        .collect();
    let common_children: Vec<NodeId> = track
        .children(a)
        .iter()
        .filter(|child| track.children(b).contains(child))
        .copied()
        .collect();
    if common_parents.is_empty() && common_children.is_empty() {
        return false;
    }
    // A chord from a shared parent straight to a shared child means the two
    // cars sit on parallel lanes the track already keeps apart.
    for &parent in &common_parents {
        for &child in &common_children {
            if track.children(parent).contains(&child) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::track::NodeKind;

    fn straight_chain(len: u32) -> Track {
        let mut track = Track::new();
        for id in 0..len {
            track.add_node(id, NodeKind::Straight).unwrap();
        }
        for id in 1..len {
            track.add_edge(id - 1, id).unwrap();
        }
        track
    }

    #[test]
    fn test_safe_following_on_a_chain() {
        // Trailing car at 0, leading car at 1 with a single exit: the
        // leader is confirmed in front, so the pair is not close.
        let track = straight_chain(3);
        let parents = track.parent_map();
        assert!(!is_close_to(&track, &parents, 0, 1));
        assert!(!is_close_to(&track, &parents, 1, 0));
    }

    #[test]
    fn test_adjacent_at_a_junction_is_close() {
        // Node 1 fans out to two exits, so the one-hop check fails and no
        // two-hop path confirms the gap.
        let mut track = straight_chain(3);
        track.add_node(3, NodeKind::Straight).unwrap();
        track.add_edge(1, 3).unwrap();
        let parents = track.parent_map();
        assert!(is_close_to(&track, &parents, 0, 1));
    }

    #[test]
    fn test_two_hop_gap_is_not_close() {
        let track = straight_chain(4);
        let parents = track.parent_map();
        // Two hops apart and confirmed: not adjacent, no shared structure.
        assert!(!is_close_to(&track, &parents, 0, 2));
    }

    #[test]
    fn test_shared_parent_means_side_by_side() {
        // Fork: 0 -> 1 and 0 -> 2. Cars on 1 and 2 run side by side.
        let mut track = Track::new();
        for id in 0..3 {
            track.add_node(id, NodeKind::Straight).unwrap();
        }
        track.add_edge(0, 1).unwrap();
        track.add_edge(0, 2).unwrap();
        let parents = track.parent_map();
        assert!(is_close_to(&track, &parents, 1, 2));
    }

    #[test]
    fn test_chord_separates_parallel_lanes() {
        // Diamond with a chord: 0 -> {1, 2}, {1, 2} -> 3, and 0 -> 3
        // directly. The chord marks the lanes as safely separated.
        let mut track = Track::new();
        for id in 0..4 {
            track.add_node(id, NodeKind::Straight).unwrap();
        }
        track.add_edge(0, 1).unwrap();
        track.add_edge(0, 2).unwrap();
        track.add_edge(1, 3).unwrap();
        track.add_edge(2, 3).unwrap();
        track.add_edge(0, 3).unwrap();
        let parents = track.parent_map();
        assert!(!is_close_to(&track, &parents, 1, 2));
    }

    #[test]
    fn test_co_located_is_always_close() {
        let track = straight_chain(2);
        let parents = track.parent_map();
        assert!(is_close_to(&track, &parents, 0, 0));
    }

    #[test]
    fn test_collision_roll_rate() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(99);
        let hits = (0..20_000).filter(|_| collision_roll(&mut rng)).count();
        // 4-in-20 chance: expect about 4000 hits.
        assert!((3500..4500).contains(&hits), "hit count {hits} off nominal");
    }
}
