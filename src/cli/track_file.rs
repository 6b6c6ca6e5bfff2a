//! Track file loading (driver-side collaborator; the core never does I/O).
//!
//! Format, one JSON object:
//!
//! ```json
//! {
//!   "nodes": [{"id": 0, "kind": "start"}, {"id": 1, "kind": "curve2"}],
//!   "edges": [[0, 1]]
//! }
//! ```
//!
//! Kind codes are `straight`, `curve1`, `curve2`, `curve3`, `start`,
//! `finish`. Unknown codes, duplicate ids, and edges naming unknown nodes
//! are configuration errors and fail the load outright.

use super::CliError;
use chicane::game::{NodeKind, Track};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk track representation.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TrackFile {
    /// Node list.
    pub(crate) nodes: Vec<NodeSpec>,
    /// Directed edges as (from, to) id pairs.
    pub(crate) edges: Vec<(u32, u32)>,
}

/// One node in a track file.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct NodeSpec {
    /// Stable node id.
    pub(crate) id: u32,
    /// Kind code.
    pub(crate) kind: String,
}

/// Load and build a track from a JSON file.
pub(crate) fn load_track(path: &Path) -> Result<Track, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    let file: TrackFile = serde_json::from_str(&text)
        .map_err(|e| CliError::new(format!("Failed to parse {}: {e}", path.display())))?;
    build(&file).map_err(|e| CliError::new(format!("Invalid track {}: {e}", path.display())))
}

/// Build a track from its file representation.
pub(crate) fn build(file: &TrackFile) -> Result<Track, chicane::TrackError> {
    let mut track = Track::new();
    for node in &file.nodes {
        track.add_node(node.id, NodeKind::from_code(&node.kind)?)?;
    }
    for &(from, to) in &file.edges {
        track.add_edge(from, to)?;
    }
    Ok(track)
}
