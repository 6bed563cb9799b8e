use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ra_graph::binary;

#[derive(Args)]
pub struct InfoArgs {
    /// Binary graph file.
    graph: PathBuf,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let graph = binary::load(&args.graph)
        .with_context(|| format!("loading {}", args.graph.display()))?;

    let degrees: Vec<usize> = graph.node_indices().map(|n| graph.out_degree(n)).collect();
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let sinks = degrees.iter().filter(|&&d| d == 0).count();
    let named = graph.node_indices().filter(|&n| graph.name(n).is_some()).count();
    let mean = if degrees.is_empty() {
        0.0
    } else {
        graph.successor_count() as f64 / degrees.len() as f64
    };

    println!("file:        {}", args.graph.display());
    println!("nodes:       {}", graph.node_count());
    println!("named:       {named}");
    println!("successors:  {}", graph.successor_count());
    println!("out-degree:  max {max_degree}, mean {mean:.2}");
    println!("dead ends:   {sinks}");
    if let (Some(first), Some(last)) = (graph.ids().first(), graph.ids().last()) {
        println!("id range:    {} ..= {}", first.0, last.0);
    }
    Ok(())
}
