//! Deterministic track generation.
//!
//! Builds closed circuits from segment plans: straight runs, curves with
//! mandatory stops, and forked dual-lane stretches that re-merge. The same
//! plan always produces the same track, node for node.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::game::{NodeId, NodeKind, Track};

/// Error type for track generation.
#[derive(Debug, Clone)]
pub struct TrackGenError {
    /// Description of the error.
    pub reason: String,
}

impl std::fmt::Display for TrackGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Track generation error: {}", self.reason)
    }
}

impl std::error::Error for TrackGenError {}

impl From<TrackError> for TrackGenError {
    fn from(err: TrackError) -> Self {
        Self { reason: err.to_string() }
    }
}

/// Plan for one stretch of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentPlan {
    /// A straight run of `len` nodes.
    Straight {
        /// Node count.
        len: u32,
    },
    /// A curve of `len` nodes demanding `stops` mandatory stops.
    Curve {
        /// Mandatory stops, 1-3.
        stops: u8,
        /// Node count.
        len: u32,
    },
    /// A straight stretch split into two parallel lanes that re-merge.
    ///
    /// Both lanes are `len` nodes long and share the entry and the merge
    /// node, which is the geometry the collision model's shared-parent and
    /// shared-child rules care about.
    Fork {
        /// Node count per lane.
        len: u32,
    },
}

/// Build a closed circuit: `grid` start boxes, the planned segments, a
/// finish line, and a closing edge back to the first start box.
///
/// # Errors
///
/// Returns a [`TrackGenError`] for degenerate plans: no start boxes, no
/// segments, no curve anywhere, a zero-length segment, or a curve with a
/// stop count outside 1..=3.
pub fn generate_track(grid: u32, plan: &[SegmentPlan]) -> Result<Track, TrackGenError> {
    if grid == 0 {
        return Err(TrackGenError { reason: "need at least one start box".to_string() });
    }
    if plan.is_empty() {
        return Err(TrackGenError { reason: "segment plan is empty".to_string() });
    }
    if !plan.iter().any(|segment| matches!(segment, SegmentPlan::Curve { .. })) {
        return Err(TrackGenError { reason: "plan has no curve".to_string() });
    }
    for segment in plan {
        let len = match *segment {
            SegmentPlan::Straight { len }
            | SegmentPlan::Curve { len, .. }
            | SegmentPlan::Fork { len } => len,
        };
        if len == 0 {
            return Err(TrackGenError { reason: "zero-length segment".to_string() });
        }
        if let SegmentPlan::Curve { stops, .. } = *segment {
            if !(1..=3).contains(&stops) {
                return Err(TrackGenError {
                    reason: format!("curve stop count {stops} outside 1..=3"),
                });
            }
        }
    }

    let mut track = Track::new();
    let mut next_id: NodeId = 0;
    let mut tails: Vec<NodeId> = Vec::new();

    for _ in 0..grid {
        let id = push_node(&mut track, &mut next_id, NodeKind::Start)?;
        connect(&mut track, &tails, id)?;
        tails = vec![id];
    }

    for segment in plan {
        match *segment {
            SegmentPlan::Straight { len } => {
                for _ in 0..len {
                    let id = push_node(&mut track, &mut next_id, NodeKind::Straight)?;
                    connect(&mut track, &tails, id)?;
                    tails = vec![id];
                }
            }
            SegmentPlan::Curve { stops, len } => {
                let kind = match stops {
                    1 => NodeKind::Curve1,
                    2 => NodeKind::Curve2,
                    _ => NodeKind::Curve3,
                };
                for _ in 0..len {
                    let id = push_node(&mut track, &mut next_id, kind)?;
                    connect(&mut track, &tails, id)?;
                    tails = vec![id];
                }
            }
            SegmentPlan::Fork { len } => {
                let entry = tails.clone();
                let mut lane_tails = Vec::with_capacity(2);
                for _ in 0..2 {
                    let mut lane = entry.clone();
                    for _ in 0..len {
                        let id = push_node(&mut track, &mut next_id, NodeKind::Straight)?;
                        connect(&mut track, &lane, id)?;
                        lane = vec![id];
                    }
                    lane_tails.extend(lane);
                }
                tails = lane_tails;
            }
        }
    }

    let finish = push_node(&mut track, &mut next_id, NodeKind::Finish)?;
    connect(&mut track, &tails, finish)?;
    // Close the lap back to the first start box.
    track.add_edge(finish, 0)?;
    track.validate()?;
    Ok(track)
}

/// The default circuit used when no track file is given.
#[must_use]
pub fn standard_plan() -> Vec<SegmentPlan> {
    vec![
        SegmentPlan::Straight { len: 5 },
        SegmentPlan::Curve { stops: 1, len: 2 },
        SegmentPlan::Straight { len: 4 },
        SegmentPlan::Fork { len: 3 },
        SegmentPlan::Straight { len: 2 },
        SegmentPlan::Curve { stops: 2, len: 3 },
        SegmentPlan::Straight { len: 6 },
        SegmentPlan::Curve { stops: 1, len: 2 },
        SegmentPlan::Fork { len: 2 },
        SegmentPlan::Curve { stops: 3, len: 4 },
        SegmentPlan::Straight { len: 4 },
    ]
}

/// Draw a random but always-valid segment plan.
///
/// Alternates straight-ish and curve segments so every plan has at least
/// one curve; roughly one stretch in four forks into two lanes.
pub fn random_plan<R: Rng>(rng: &mut R, segments: usize) -> Vec<SegmentPlan> {
    let segments = segments.max(2);
    let mut plan = Vec::with_capacity(segments);
    for index in 0..segments {
        if index % 2 == 0 {
            if rng.gen_range(0..4) == 0 {
                plan.push(SegmentPlan::Fork { len: rng.gen_range(2..=4) });
            } else {
                plan.push(SegmentPlan::Straight { len: rng.gen_range(2..=7) });
            }
        } else {
            plan.push(SegmentPlan::Curve {
                stops: rng.gen_range(1..=3),
                len: rng.gen_range(1..=4),
            });
        }
    }
    plan
}

fn push_node(
    track: &mut Track,
    next_id: &mut NodeId,
    kind: NodeKind,
) -> Result<NodeId, TrackGenError> {
    let id = *next_id;
    track.add_node(id, kind)?;
    *next_id += 1;
    Ok(id)
}

fn connect(track: &mut Track, tails: &[NodeId], to: NodeId) -> Result<(), TrackGenError> {
    for &tail in tails {
        track.add_edge(tail, to)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_standard_plan_builds_a_closed_circuit() {
        let track = generate_track(4, &standard_plan()).unwrap();
        track.validate().unwrap();
        assert_eq!(track.start_nodes().len(), 4);
        // Every node can get back to itself: the track is a closed loop.
        let start = track.start_nodes()[0];
        let distances = track.distances_from(start);
        for id in track.node_ids() {
            assert!(distances[id as usize].is_some(), "node {id} unreachable");
        }
    }

    #[test]
    fn test_fork_creates_shared_parent_lanes() {
        let plan = [
            SegmentPlan::Fork { len: 2 },
            SegmentPlan::Curve { stops: 1, len: 1 },
        ];
        let track = generate_track(1, &plan).unwrap();
        // The fork entry (the start box) has two children - the lane heads.
        assert_eq!(track.children(0).len(), 2);
    }

    #[test]
    fn test_degenerate_plans_are_rejected() {
        assert!(generate_track(0, &standard_plan()).is_err());
        assert!(generate_track(2, &[]).is_err());
        assert!(generate_track(2, &[SegmentPlan::Straight { len: 3 }]).is_err());
        assert!(
            generate_track(2, &[SegmentPlan::Curve { stops: 0, len: 2 }]).is_err()
        );
        assert!(
            generate_track(2, &[SegmentPlan::Curve { stops: 2, len: 0 }]).is_err()
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = generate_track(3, &standard_plan()).unwrap();
        let second = generate_track(3, &standard_plan()).unwrap();
        assert_eq!(first.id_bound(), second.id_bound());
        for id in first.node_ids() {
            assert_eq!(first.kind(id), second.kind(id));
            assert_eq!(first.children(id), second.children(id));
        }
    }

    #[test]
    fn test_random_plans_always_generate() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let segments = rng.gen_range(2..8);
            let plan = random_plan(&mut rng, segments);
            let track = generate_track(2, &plan).unwrap();
            track.validate().unwrap();
        }
    }
}
