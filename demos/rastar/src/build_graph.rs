use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use ra_graph::{TextSchema, binary, text};

#[derive(Args)]
pub struct BuildArgs {
    /// Delimited node/way export.
    input: PathBuf,

    /// Binary graph file to write.
    output: PathBuf,

    /// Field separator (single ASCII character).
    #[arg(long, default_value_t = '|')]
    delimiter: char,

    /// Leading lines to skip unconditionally.
    #[arg(long, default_value_t = 0)]
    comment_lines: usize,

    /// Skip lines starting with this character anywhere in the file
    /// (default `#`).
    #[arg(long, value_name = "C", conflicts_with = "no_comment_prefix")]
    comment_prefix: Option<char>,

    /// Treat no line as a comment.
    #[arg(long)]
    no_comment_prefix: bool,

    #[arg(long, value_name = "COL")]
    id_column: Option<usize>,

    #[arg(long, value_name = "COL")]
    name_column: Option<usize>,

    #[arg(long, value_name = "COL")]
    lat_column: Option<usize>,

    #[arg(long, value_name = "COL")]
    lon_column: Option<usize>,

    #[arg(long, value_name = "COL")]
    oneway_column: Option<usize>,

    /// Oneway column content marking a one-way road.
    #[arg(long)]
    oneway_value: Option<String>,

    /// Column of the first way member; members run to the end of the row.
    #[arg(long, value_name = "COL")]
    first_member_column: Option<usize>,
}

impl BuildArgs {
    fn schema(&self) -> Result<TextSchema> {
        let Ok(delimiter) = u8::try_from(self.delimiter) else {
            bail!("delimiter {:?} is not a single-byte character", self.delimiter);
        };
        let mut schema = TextSchema { delimiter, comment_lines: self.comment_lines, ..TextSchema::default() };
        if self.no_comment_prefix {
            schema.comment_prefix = None;
        } else if let Some(c) = self.comment_prefix {
            let Ok(prefix) = u8::try_from(c) else {
                bail!("comment prefix {c:?} is not a single-byte character");
            };
            schema.comment_prefix = Some(prefix);
        }

        let overrides = [
            (self.id_column, &mut schema.id_column),
            (self.name_column, &mut schema.name_column),
            (self.lat_column, &mut schema.lat_column),
            (self.lon_column, &mut schema.lon_column),
            (self.oneway_column, &mut schema.oneway_column),
            (self.first_member_column, &mut schema.first_member_column),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(v) = &self.oneway_value {
            schema.oneway_value = v.clone();
        }
        Ok(schema)
    }
}

pub fn run(args: BuildArgs) -> Result<()> {
    let schema = args.schema()?;

    let t = Instant::now();
    let graph = text::load_text(&args.input, &schema)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!(elapsed_ms = t.elapsed().as_millis() as u64, "parsed text graph");

    let t = Instant::now();
    binary::save(&graph, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(elapsed_ms = t.elapsed().as_millis() as u64, "wrote binary graph");

    println!(
        "{}: {} nodes, {} successors",
        args.output.display(),
        graph.node_count(),
        graph.successor_count(),
    );
    Ok(())
}
