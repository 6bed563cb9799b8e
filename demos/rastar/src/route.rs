use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{debug, info};

use ra_core::{GeoPoint, NodeId, NodeIdx};
use ra_graph::{RoadGraph, SpatialIndex, binary};
use ra_search::trace::save_trace;
use ra_search::{AStar, CostModel, CostModelKind, Dijkstra, Endpoint, SearchConfig, SearchError};

#[derive(Args)]
pub struct RouteArgs {
    /// Binary graph file.
    graph: PathBuf,

    /// External id of the start node.
    #[arg(required_unless_present = "from_coord")]
    start: Option<u64>,

    /// External id of the target node.
    #[arg(required_unless_present = "to_coord")]
    target: Option<u64>,

    /// Start from the node nearest to this position instead of an id.
    /// Requires `--to-coord`; the positional ids are then omitted.
    #[arg(long, value_name = "LAT,LON", requires = "to_coord", conflicts_with_all = ["start", "target"])]
    from_coord: Option<GeoPoint>,

    /// End at the node nearest to this position instead of an id.
    #[arg(long, value_name = "LAT,LON", requires = "from_coord")]
    to_coord: Option<GeoPoint>,

    /// Edge metric: great-circle or planar.
    #[arg(short, long, default_value_t = CostModelKind::GreatCircle)]
    metric: CostModelKind,

    /// Drop the heuristic (plain Dijkstra), for comparison.
    #[arg(long)]
    dijkstra: bool,

    /// Give up after expanding this many nodes.
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Where to write the solution trace.
    #[arg(short, long, default_value = "solution.dat")]
    solution: PathBuf,
}

pub fn run(args: RouteArgs) -> Result<()> {
    let t = Instant::now();
    let graph = binary::load(&args.graph)
        .with_context(|| format!("loading {}", args.graph.display()))?;
    info!(elapsed_ms = t.elapsed().as_millis() as u64, "graph loaded");

    let mut index = None;
    let start = resolve(&graph, &mut index, args.start, args.from_coord, Endpoint::Start)?;
    let target = resolve(&graph, &mut index, args.target, args.to_coord, Endpoint::Target)?;

    let config = SearchConfig { max_expansions: args.max_expansions };
    if args.dijkstra {
        search(&graph, Dijkstra(args.metric), config, start, target, &args.solution)
    } else {
        search(&graph, args.metric, config, start, target, &args.solution)
    }
}

/// Turn an id or a position into a node index.  The spatial index is built
/// on first use and shared by both endpoints.
fn resolve(
    graph:    &RoadGraph,
    index:    &mut Option<SpatialIndex>,
    id:       Option<u64>,
    coord:    Option<GeoPoint>,
    endpoint: Endpoint,
) -> Result<NodeIdx> {
    if let Some(id) = id {
        let id = NodeId(id);
        return Ok(graph.lookup(id).ok_or(SearchError::NodeNotFound { id, endpoint })?);
    }
    let Some(pos) = coord else {
        bail!("no {endpoint} given");
    };
    let index = index.get_or_insert_with(|| SpatialIndex::new(graph));
    let Some(node) = index.nearest(pos) else {
        bail!("cannot snap {endpoint} {pos}: the graph is empty");
    };
    info!(
        %endpoint,
        %pos,
        node = graph.id(node).0,
        offset_m = graph.coordinates(node).haversine_m(pos),
        "snapped to nearest node"
    );
    Ok(node)
}

fn search<M: CostModel>(
    graph:    &RoadGraph,
    model:    M,
    config:   SearchConfig,
    start:    NodeIdx,
    target:   NodeIdx,
    solution: &Path,
) -> Result<()> {
    let engine = AStar::new(graph, model).with_config(config);

    let t = Instant::now();
    let run = engine.run(start, target);
    info!(
        elapsed_ms = t.elapsed().as_millis() as u64,
        expanded = run.stats.expanded,
        reopened = run.stats.reopened,
        max_open = run.stats.max_open,
        "search finished"
    );

    let route = run.route().with_context(|| {
        format!("routing {} → {}", graph.id(start).0, graph.id(target).0)
    })?;
    debug!(hops = route.hops(), "route reconstructed");

    save_trace(solution, graph, &run)
        .with_context(|| format!("writing {}", solution.display()))?;
    info!(path = %solution.display(), "solution written");

    println!(
        "{} → {}: {:.2} m over {} edges",
        graph.id(start).0,
        graph.id(target).0,
        route.total_cost,
        route.hops(),
    );
    Ok(())
}
