//! Track validation command implementation.

use super::{CliError, track_file};
use chicane::game::NodeKind;
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the track file cannot be read, parsed, or built.
pub(crate) fn execute(track: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", track.display());
    println!();

    let built = track_file::load_track(&track)?;
    print_check("nodes and edges build", true);

    let has_start = built.start_nodes().first().copied();
    print_check("start boxes present", has_start.is_some());
    let has_finish = built
        .node_ids()
        .any(|id| built.kind(id) == Some(NodeKind::Finish));
    print_check("finish line present", has_finish);
    if let Err(e) = built.validate() {
        return Err(CliError::new(format!("Validation failed: {e}")));
    }

    // A race track must be a closed loop: every node reachable from the
    // grid, and the grid reachable again from every node.
    let mut closed = true;
    if let Some(start) = has_start {
        let distances = built.distances_from(start);
        closed = built
            .node_ids()
            .all(|id| distances[id as usize].is_some());
    }
    print_check("circuit is closed", closed);
    if !closed {
        return Err(CliError::new("Track is not a closed circuit"));
    }

    let starts = built.start_nodes().len();
    let curves = built
        .node_ids()
        .filter(|&id| built.kind(id).is_some_and(NodeKind::is_curve))
        .count();
    let edges: usize = built.node_ids().map(|id| built.children(id).len()).sum();

    println!();
    println!("Summary:");
    println!("  Nodes:       {}", built.len());
    println!("  Edges:       {edges}");
    println!("  Start boxes: {starts}");
    println!("  Curve nodes: {curves}");
    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
