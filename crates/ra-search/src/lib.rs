//! `ra-search` — A* shortest paths over a [`RoadGraph`](ra_graph::RoadGraph).
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`cost`]       | `CostModel` trait, `GreatCircle`, `Planar`, `Dijkstra`    |
//! | [`open_list`]  | `OpenList` (indexed binary min-heap)                      |
//! | [`status`]     | `StatusTable`, `NodeStatus`, `Membership`                 |
//! | [`engine`]     | `AStar`, `Search`, `SearchRun`, `SearchConfig`            |
//! | [`path`]       | `Route`, path reconstruction                              |
//! | [`trace`]      | `write_trace` / `save_trace`                              |
//! | [`batch`]      | `route_many` (feature = `"parallel"` only)                |
//! | [`error`]      | `SearchError`, `OpenListError`, `SearchResult<T>`         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Enables `batch::route_many` on the Rayon pool.            |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod cost;
pub mod engine;
pub mod error;
pub mod open_list;
pub mod path;
pub mod status;
pub mod trace;

#[cfg(feature = "parallel")]
pub mod batch;

#[cfg(test)]
mod tests;

pub use cost::{CostModel, CostModelKind, Dijkstra, GreatCircle, Planar};
pub use engine::{AStar, Search, SearchConfig, SearchRun, SearchStats, Termination};
pub use error::{Endpoint, OpenListError, SearchError, SearchResult};
pub use open_list::OpenList;
pub use path::Route;
pub use status::{Membership, NodeStatus, StatusTable};

use ra_core::NodeId;
use ra_graph::RoadGraph;

/// Shortest route between two external identifiers with default settings.
///
/// Shorthand for `AStar::new(graph, model).find_route(start, target)`.
pub fn find_route<M: CostModel>(
    graph: &RoadGraph,
    model: M,
    start: NodeId,
    target: NodeId,
) -> SearchResult<Route> {
    AStar::new(graph, model).find_route(start, target)
}
