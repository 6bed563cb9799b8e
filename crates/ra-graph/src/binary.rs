//! Binary graph file codec.
//!
//! # File layout
//!
//! All integers and floats are little-endian.
//!
//! ```text
//! header   u32 N          node count
//!          u32 S          total successor slots
//!          u32 L          total name bytes, terminators included
//! nodes    N × 32 bytes   u64 id | f64 lat | f64 lon | u32 nsucc | u32 first_succ
//! succ     S × u32        successor indices, contiguous per node in node order
//! names    L bytes        N NUL-terminated UTF-8 names in node order
//! ```
//!
//! `first_succ` is the offset of the node's first successor in the `succ`
//! block; it is redundant with the running sum of `nsucc` and is checked
//! against it on load.
//!
//! The loader rejects anything that does not describe a valid
//! [`RoadGraph`]: size mismatches, unsorted or repeated ids, successor
//! indices out of range, a successor listed twice by one node, a wrong
//! number of names.  A graph that loads is
//! safe to search without further checks.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use ra_core::{GeoPoint, NodeId, NodeIdx};

use crate::graph::RoadGraph;
use crate::{GraphError, GraphResult};

const HEADER_BYTES: u64 = 12;
const RECORD_BYTES: u64 = 32;
const SUCC_BYTES:   u64 = 4;

// ── Writing ───────────────────────────────────────────────────────────────────

/// Serialize `graph` to `path`, replacing any existing file.
pub fn save(graph: &RoadGraph, path: &Path) -> GraphResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_graph(graph, &mut out)?;
    out.flush()?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        successors = graph.successor_count(),
        "graph written"
    );
    Ok(())
}

/// Serialize `graph` into any `Write` sink.
pub fn write_graph<W: Write>(graph: &RoadGraph, mut out: W) -> GraphResult<()> {
    let n = header_u32(graph.node_count(), "node count")?;
    let s = header_u32(graph.successor_count(), "successor count")?;
    let l = header_u32(graph.names.len() + graph.node_count(), "name bytes")?;

    out.write_all(&n.to_le_bytes())?;
    out.write_all(&s.to_le_bytes())?;
    out.write_all(&l.to_le_bytes())?;

    for node in graph.node_indices() {
        let i = node.index();
        let pos = graph.node_pos[i];
        out.write_all(&graph.node_id[i].0.to_le_bytes())?;
        out.write_all(&pos.lat.to_le_bytes())?;
        out.write_all(&pos.lon.to_le_bytes())?;
        out.write_all(&(graph.out_degree(node) as u32).to_le_bytes())?;
        out.write_all(&graph.succ_start[i].to_le_bytes())?;
    }

    for s in &graph.succ {
        out.write_all(&s.0.to_le_bytes())?;
    }

    for node in graph.node_indices() {
        out.write_all(graph.name(node).unwrap_or("").as_bytes())?;
        out.write_all(&[0])?;
    }
    Ok(())
}

fn header_u32(value: usize, what: &str) -> GraphResult<u32> {
    u32::try_from(value)
        .map_err(|_| GraphError::Malformed(format!("{what} {value} does not fit the u32 header")))
}

// ── Reading ───────────────────────────────────────────────────────────────────

/// Load a graph previously written by [`save`].
pub fn load(path: &Path) -> GraphResult<RoadGraph> {
    let graph = read_graph(BufReader::new(File::open(path)?))?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        successors = graph.successor_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Deserialize and validate a graph from any `Read` source.
pub fn read_graph<R: Read>(mut input: R) -> GraphResult<RoadGraph> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    decode(&bytes)
}

/// Forward-only reader over the file bytes.
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos:   usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const K: usize>(&mut self) -> GraphResult<[u8; K]> {
        let end = self.pos + K;
        let chunk = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| malformed(format!("unexpected end of file at byte {}", self.pos)))?;
        self.pos = end;
        let mut out = [0u8; K];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    fn u32(&mut self) -> GraphResult<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn u64(&mut self) -> GraphResult<u64> {
        self.take::<8>().map(u64::from_le_bytes)
    }

    fn f64(&mut self) -> GraphResult<f64> {
        self.take::<8>().map(f64::from_le_bytes)
    }

    fn rest(&self) -> &'a [u8] {
        let bytes: &'a [u8] = self.bytes;
        &bytes[self.pos..]
    }
}

fn malformed(msg: impl Into<String>) -> GraphError {
    GraphError::Malformed(msg.into())
}

fn decode(bytes: &[u8]) -> GraphResult<RoadGraph> {
    let mut cur = ByteCursor::new(bytes);
    if (bytes.len() as u64) < HEADER_BYTES {
        return Err(malformed(format!("file is {} bytes, shorter than the header", bytes.len())));
    }
    let n = cur.u32()?;
    let s = cur.u32()?;
    let l = cur.u32()?;

    let expected = HEADER_BYTES
        + n as u64 * RECORD_BYTES
        + s as u64 * SUCC_BYTES
        + l as u64;
    if expected != bytes.len() as u64 {
        return Err(malformed(format!(
            "header declares {n} nodes, {s} successors, {l} name bytes \
             ({expected} bytes total) but file has {} bytes",
            bytes.len()
        )));
    }
    if n == u32::MAX {
        return Err(GraphError::TooLarge(n as usize));
    }

    // ── Node records ──────────────────────────────────────────────────────
    let node_count = n as usize;
    let mut node_id    = Vec::with_capacity(node_count);
    let mut node_pos   = Vec::with_capacity(node_count);
    let mut succ_start = Vec::with_capacity(node_count + 1);
    succ_start.push(0u32);

    let mut running: u64 = 0;
    for i in 0..node_count {
        let id  = NodeId(cur.u64()?);
        let pos = GeoPoint::new(cur.f64()?, cur.f64()?);
        let nsucc = cur.u32()?;
        let first = cur.u32()?;

        if let Some(&prev) = node_id.last() {
            if id <= prev {
                return Err(malformed(format!(
                    "node {i}: id {} not greater than previous id {}",
                    id.0, prev.0
                )));
            }
        }
        if !pos.lat.is_finite() || !pos.lon.is_finite() {
            return Err(malformed(format!("node {i}: non-finite coordinates {pos}")));
        }
        if first as u64 != running {
            return Err(malformed(format!(
                "node {i}: successor offset {first}, expected {running}"
            )));
        }
        running += nsucc as u64;
        if running > s as u64 {
            return Err(malformed(format!(
                "node {i}: successor counts exceed the {s} declared slots"
            )));
        }

        node_id.push(id);
        node_pos.push(pos);
        succ_start.push(running as u32);
    }
    if running != s as u64 {
        return Err(malformed(format!(
            "successor counts sum to {running}, header declares {s}"
        )));
    }

    // ── Successors ────────────────────────────────────────────────────────
    let mut succ = Vec::with_capacity(s as usize);
    // `listed[t] == i + 1` means node i already has successor t.
    let mut listed = vec![0u32; node_count];
    for i in 0..node_count {
        let stamp = i as u32 + 1;
        for k in succ_start[i]..succ_start[i + 1] {
            let target = cur.u32()?;
            if target >= n {
                return Err(malformed(format!(
                    "successor slot {k}: index {target} out of range for {n} nodes"
                )));
            }
            let seen = &mut listed[target as usize];
            if *seen == stamp {
                return Err(malformed(format!(
                    "node {i}: successor {target} listed twice (slot {k})"
                )));
            }
            *seen = stamp;
            succ.push(NodeIdx(target));
        }
    }

    // ── Names ─────────────────────────────────────────────────────────────
    let blob = cur.rest();
    let mut name_start = Vec::with_capacity(node_count + 1);
    let mut names = String::with_capacity(blob.len().saturating_sub(node_count));
    name_start.push(0u32);

    let mut remaining = blob;
    for i in 0..node_count {
        let nul = remaining
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| malformed(format!("name block ends before name of node {i}")))?;
        let name = std::str::from_utf8(&remaining[..nul])
            .map_err(|e| malformed(format!("node {i}: name is not UTF-8: {e}")))?;
        names.push_str(name);
        name_start.push(names.len() as u32);
        remaining = &remaining[nul + 1..];
    }
    if !remaining.is_empty() {
        return Err(malformed(format!(
            "{} trailing bytes after the last name",
            remaining.len()
        )));
    }

    Ok(RoadGraph {
        node_id,
        node_pos,
        succ_start,
        succ,
        name_start,
        names,
    })
}
