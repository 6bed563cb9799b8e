//! Human-readable solution trace.
//!
//! One line per route node, from the target back to the start, with the
//! cumulative cost from the start:
//!
//! ```text
//! Node id:  771979683 | Distance:     412.37 | Name: Carrer Gran
//! Node id:  240949617 | Distance:     120.05 | Name:
//! Node id:  240949599 | Distance:       0.00 | Name: Plaça Catalunya
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ra_graph::RoadGraph;

use crate::engine::SearchRun;
use crate::SearchResult;

/// Write the trace of a reached search to `out`.
///
/// # Errors
///
/// The path errors of [`SearchRun::path`], or an I/O error from `out`.
pub fn write_trace<W: Write>(mut out: W, graph: &RoadGraph, run: &SearchRun) -> SearchResult<()> {
    let path = run.path()?;
    for &node in path.iter().rev() {
        writeln!(
            out,
            "Node id: {:>10} | Distance: {:>10.2} | Name: {}",
            graph.id(node).0,
            run.status[node].g,
            graph.name(node).unwrap_or(""),
        )?;
    }
    Ok(())
}

/// [`write_trace`] into a new file at `path`.
pub fn save_trace(path: &Path, graph: &RoadGraph, run: &SearchRun) -> SearchResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_trace(&mut out, graph, run)?;
    out.flush()?;
    Ok(())
}
