//! Many independent queries over one shared graph (Cargo feature
//! `parallel`).
//!
//! Every query is an ordinary single-threaded search with its own status
//! table and open list; Rayon only spreads the queries over worker threads.
//! The graph and cost model are borrowed read-only by all of them.

use rayon::prelude::*;

use ra_core::NodeIdx;

use crate::cost::CostModel;
use crate::engine::AStar;
use crate::path::Route;
use crate::SearchResult;

/// Run one search per `(start, target)` pair in parallel.
///
/// Results come back in the order of `pairs`.
pub fn route_many<M: CostModel>(
    engine: &AStar<'_, M>,
    pairs: &[(NodeIdx, NodeIdx)],
) -> Vec<SearchResult<Route>> {
    pairs
        .par_iter()
        .map(|&(start, target)| engine.run(start, target).route())
        .collect()
}
