use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{info, warn};

use ra_core::{NodeId, NodeIdx};
use ra_graph::binary;
use ra_search::batch::route_many;
use ra_search::{AStar, CostModelKind, Endpoint, SearchConfig, SearchError};

#[derive(Args)]
pub struct BatchArgs {
    /// Binary graph file.
    graph: PathBuf,

    /// Whitespace-separated `start target` id pairs, one per line.
    pairs: PathBuf,

    #[arg(short, long, default_value_t = CostModelKind::GreatCircle)]
    metric: CostModelKind,

    #[arg(long)]
    max_expansions: Option<usize>,
}

pub fn run(args: BatchArgs) -> Result<()> {
    let graph = binary::load(&args.graph)
        .with_context(|| format!("loading {}", args.graph.display()))?;
    let text = fs::read_to_string(&args.pairs)
        .with_context(|| format!("reading {}", args.pairs.display()))?;

    let mut pairs: Vec<(NodeIdx, NodeIdx)> = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace().map(str::parse::<u64>);
        let (Some(Ok(start)), Some(Ok(target)), None) = (fields.next(), fields.next(), fields.next()) else {
            bail!("{}:{}: expected two node ids", args.pairs.display(), i + 1);
        };
        let lookup = |id, endpoint| {
            let id = NodeId(id);
            graph.lookup(id).ok_or(SearchError::NodeNotFound { id, endpoint })
        };
        pairs.push((lookup(start, Endpoint::Start)?, lookup(target, Endpoint::Target)?));
    }

    let engine = AStar::new(&graph, args.metric)
        .with_config(SearchConfig { max_expansions: args.max_expansions });

    let t = Instant::now();
    let results = route_many(&engine, &pairs);
    info!(
        queries = pairs.len(),
        elapsed_ms = t.elapsed().as_millis() as u64,
        "batch finished"
    );

    let mut failed = 0usize;
    for (&(start, target), result) in pairs.iter().zip(&results) {
        let (s, t) = (graph.id(start).0, graph.id(target).0);
        match result {
            Ok(route) => println!("{s}\t{t}\t{:.2}\t{}", route.total_cost, route.hops()),
            Err(err) => {
                failed += 1;
                println!("{s}\t{t}\t-\t-");
                warn!(start = s, target = t, "{err}");
            }
        }
    }
    if failed > 0 {
        warn!(failed, "some queries found no route");
    }
    Ok(())
}
