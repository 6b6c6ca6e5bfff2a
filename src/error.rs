//! Error types for the racing engine core.

use std::fmt;

use crate::game::NodeId;

/// Errors raised while constructing or validating a track graph.
///
/// These are configuration errors: the track data itself is bad, and the
/// engine refuses to build a graph from it rather than silently dropping
/// nodes or edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// The same node id was added twice.
    DuplicateNode(NodeId),
    /// An edge or query referenced a node id that does not exist.
    UnknownNode(NodeId),
    /// A node kind code in a track file was not recognized.
    UnknownKind(String),
    /// The track contains no start node.
    MissingStart,
    /// The track contains no finish node.
    MissingFinish,
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::DuplicateNode(id) => write!(f, "duplicate node id {id}"),
            TrackError::UnknownNode(id) => write!(f, "unknown node id {id}"),
            TrackError::UnknownKind(code) => write!(f, "unknown node kind code {code:?}"),
            TrackError::MissingStart => write!(f, "track has no start node"),
            TrackError::MissingFinish => write!(f, "track has no finish node"),
        }
    }
}

impl std::error::Error for TrackError {}

/// Fatal internal errors from the movement engine.
///
/// These indicate corrupt traversal state or a query against a node that is
/// not part of the graph. They are programmer or data-integrity bugs, not
/// recoverable conditions; drivers should abort the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A movement query referenced a node outside the track.
    UnknownNode(NodeId),
    /// Path reconstruction produced a path of the wrong length.
    PathLength {
        /// Number of nodes the path should have contained.
        expected: usize,
        /// Number of nodes actually reconstructed.
        found: usize,
    },
    /// Path reconstruction found no traversable predecessor in a layer.
    MissingPredecessor {
        /// Node whose predecessor could not be found.
        node: NodeId,
        /// Distance layer searched.
        layer: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownNode(id) => {
                write!(f, "movement query for node {id} not in track")
            }
            EngineError::PathLength { expected, found } => {
                write!(f, "reconstructed path has {found} nodes, expected {expected}")
            }
            EngineError::MissingPredecessor { node, layer } => {
                write!(f, "no traversable predecessor for node {node} in layer {layer}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for movement engine queries.
pub type EngineResult<T> = Result<T, EngineError>;

/// Rejected gear change requests.
///
/// Illegal requests are rejected outright, never clamped; the one-step
/// demotion fallback belongs to the AI heuristics, not to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GearError {
    /// Requested gear is outside 1..=6.
    OutOfRange(u8),
    /// Upshifting by more than one step is never legal.
    UpshiftTooFar {
        /// Gear before the shift.
        from: u8,
        /// Requested gear.
        to: u8,
    },
    /// Downshift damage is outside the allowed window or unsurvivable.
    DownshiftTooFar {
        /// Gear before the shift.
        from: u8,
        /// Requested gear.
        to: u8,
    },
    /// Gears above 4 are not selectable in the pit lane.
    PitLimit(u8),
}

impl fmt::Display for GearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GearError::OutOfRange(gear) => write!(f, "gear {gear} is out of range"),
            GearError::UpshiftTooFar { from, to } => {
                write!(f, "cannot upshift from gear {from} to {to}")
            }
            GearError::DownshiftTooFar { from, to } => {
                write!(f, "cannot downshift from gear {from} to {to}")
            }
            GearError::PitLimit(gear) => {
                write!(f, "gear {gear} is not allowed in the pit lane")
            }
        }
    }
}

impl std::error::Error for GearError {}
