//! Delimited text loader (node/way exports).
//!
//! # Format
//!
//! One record per line, fields separated by a single delimiter byte (`|` by
//! default).  The first field tags the record kind:
//!
//! ```text
//! node|240949599|Plaça Catalunya|||||||41.3870|2.1700
//! node|240949617||||||||41.3874|2.1686
//! way|4262219|Carrer de Pelai||residential|||oneway||240949599|240949617
//! relation|...                       (ignored)
//! ```
//!
//! Column positions are not hard-coded: they come from a [`TextSchema`], whose
//! `Default` matches the layout above.  Empty fields are significant (`||`
//! is an empty column, not a skipped one).
//!
//! # Ways
//!
//! Each way contributes an edge between every pair of consecutive members,
//! in both directions unless its oneway column holds
//! [`TextSchema::oneway_value`].  A member that is not a known node breaks the
//! chain: no edge is drawn across the gap.  Ways are buffered and resolved
//! after the whole file is read, so nodes may appear after the ways that use
//! them.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use ra_core::{GeoPoint, NodeId};

use crate::builder::RoadGraphBuilder;
use crate::graph::RoadGraph;
use crate::{GraphError, GraphResult};

// ── Schema ────────────────────────────────────────────────────────────────────

/// Column layout of a delimited node/way export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSchema {
    /// Field separator.
    pub delimiter: u8,
    /// Number of leading lines to skip unconditionally.
    pub comment_lines: usize,
    /// Lines starting with this byte are skipped anywhere in the file.
    pub comment_prefix: Option<u8>,

    /// Value of field 0 for node records.
    pub node_tag: String,
    pub id_column: usize,
    pub name_column: usize,
    pub lat_column: usize,
    pub lon_column: usize,

    /// Value of field 0 for way records.
    pub way_tag: String,
    pub oneway_column: usize,
    /// Oneway column content that marks a one-way road.
    pub oneway_value: String,
    /// First member-node column; members run to the end of the record.
    pub first_member_column: usize,
}

impl Default for TextSchema {
    fn default() -> Self {
        Self {
            delimiter:           b'|',
            comment_lines:       0,
            comment_prefix:      Some(b'#'),
            node_tag:            "node".to_owned(),
            id_column:           1,
            name_column:         2,
            lat_column:          9,
            lon_column:          10,
            way_tag:             "way".to_owned(),
            oneway_column:       7,
            oneway_value:        "oneway".to_owned(),
            first_member_column: 9,
        }
    }
}

impl TextSchema {
    /// Minimum field count of a node record.
    fn node_columns(&self) -> usize {
        1 + self.id_column.max(self.lat_column).max(self.lon_column)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Load a graph from a delimited text file.
pub fn load_text(path: &Path, schema: &TextSchema) -> GraphResult<RoadGraph> {
    let file = File::open(path)?;
    parse_text(file, schema)
}

/// Like [`load_text`] but accepts any `Read` source.
///
/// # Errors
///
/// [`GraphError::Parse`] for a node record with missing or unparsable
/// id/lat/lon fields or a non-numeric way member;
/// [`GraphError::DuplicateNode`] if a node id repeats.
pub fn parse_text<R: Read>(reader: R, schema: &TextSchema) -> GraphResult<RoadGraph> {
    let mut input = BufReader::new(reader);
    let mut skipped = String::new();
    for _ in 0..schema.comment_lines {
        skipped.clear();
        if input.read_line(&mut skipped)? == 0 {
            break;
        }
    }

    let mut records = csv::ReaderBuilder::new()
        .delimiter(schema.delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(schema.comment_prefix)
        .from_reader(input);

    let mut builder = RoadGraphBuilder::new();
    let mut ways: Vec<PendingWay> = Vec::new();
    let mut ignored = 0usize;

    // One reusable record: the reader is the cursor over the token stream.
    let mut record = csv::StringRecord::new();
    loop {
        let more = records.read_record(&mut record).map_err(|e| csv_error(e, schema))?;
        if !more {
            break;
        }
        let line = record
            .position()
            .map_or(0, |p| p.line())
            + schema.comment_lines as u64;

        match record.get(0) {
            Some(tag) if tag == schema.node_tag => {
                let (id, name, pos) = parse_node(&record, schema, line)?;
                builder.add_node(id, name, pos)?;
            }
            Some(tag) if tag == schema.way_tag => {
                ways.push(parse_way(&record, schema, line)?);
            }
            _ => ignored += 1,
        }
    }

    // ── Resolve ways against the full node set ────────────────────────────
    let mut broken_links = 0usize;
    let way_count = ways.len();
    for way in ways {
        let mut run: Vec<NodeId> = Vec::with_capacity(way.members.len());
        for member in way.members {
            if builder.contains(member) {
                run.push(member);
            } else {
                if !run.is_empty() {
                    broken_links += 1;
                    debug!(line = way.line, %member, "way member is not a known node");
                }
                builder.add_way(&run, way.oneway);
                run.clear();
            }
        }
        builder.add_way(&run, way.oneway);
    }
    if broken_links > 0 {
        warn!(broken_links, "way chains split at unknown member nodes");
    }

    info!(
        nodes = builder.node_count(),
        ways = way_count,
        directed_edges = builder.edge_count(),
        ignored_records = ignored,
        "text graph parsed"
    );
    builder.build()
}

// ── Record parsing ────────────────────────────────────────────────────────────

struct PendingWay {
    line:    u64,
    oneway:  bool,
    members: Vec<NodeId>,
}

fn parse_node<'r>(
    record: &'r csv::StringRecord,
    schema: &TextSchema,
    line: u64,
) -> GraphResult<(NodeId, Option<&'r str>, GeoPoint)> {
    if record.len() < schema.node_columns() {
        return Err(parse_error(
            line,
            format!(
                "node record has {} fields, expected at least {}",
                record.len(),
                schema.node_columns()
            ),
        ));
    }
    let id  = parse_field::<u64>(record, schema.id_column, "id", line)?;
    let lat = parse_field::<f64>(record, schema.lat_column, "latitude", line)?;
    let lon = parse_field::<f64>(record, schema.lon_column, "longitude", line)?;
    let pos = GeoPoint::new(lat, lon);
    if !pos.is_valid() {
        return Err(parse_error(line, format!("coordinate {pos} out of range")));
    }
    let name = record
        .get(schema.name_column)
        .map(str::trim)
        .filter(|n| !n.is_empty());
    Ok((NodeId(id), name, pos))
}

fn parse_way(record: &csv::StringRecord, schema: &TextSchema, line: u64) -> GraphResult<PendingWay> {
    let oneway = record
        .get(schema.oneway_column)
        .is_some_and(|v| v.trim() == schema.oneway_value);

    let mut members = Vec::new();
    for field in record.iter().skip(schema.first_member_column) {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        let id = field
            .parse::<u64>()
            .map_err(|e| parse_error(line, format!("way member {field:?}: {e}")))?;
        members.push(NodeId(id));
    }
    Ok(PendingWay { line, oneway, members })
}

fn parse_field<T>(record: &csv::StringRecord, column: usize, what: &str, line: u64) -> GraphResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(column).unwrap_or("").trim();
    raw.parse::<T>()
        .map_err(|e| parse_error(line, format!("{what} {raw:?} (column {column}): {e}")))
}

fn parse_error(line: u64, message: String) -> GraphError {
    GraphError::Parse { line, message }
}

fn csv_error(e: csv::Error, schema: &TextSchema) -> GraphError {
    let line = e.position().map_or(0, |p| p.line()) + schema.comment_lines as u64;
    match e.into_kind() {
        csv::ErrorKind::Io(io) => GraphError::Io(io),
        other => parse_error(line, format!("{other:?}")),
    }
}
