//! Route reconstruction from a finished search.

use ra_core::NodeIdx;
use ra_graph::RoadGraph;

use crate::engine::SearchRun;
use crate::{SearchError, SearchResult};

/// The result of a successful search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Nodes to visit in order, start and target included.
    pub path: Vec<NodeIdx>,
    /// Sum of edge costs along `path`, in the cost model's unit (metres for
    /// the built-in models).
    pub total_cost: f64,
}

impl Route {
    /// `true` if start and target are the same node.
    pub fn is_trivial(&self) -> bool {
        self.path.len() <= 1
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<NodeIdx> {
        self.path.first().copied()
    }

    pub fn target(&self) -> Option<NodeIdx> {
        self.path.last().copied()
    }

    /// External identifiers along the route.
    pub fn ids(&self, graph: &RoadGraph) -> Vec<ra_core::NodeId> {
        self.path.iter().map(|&n| graph.id(n)).collect()
    }
}

impl SearchRun {
    /// Node sequence from start to target, following parent links back from
    /// the target and reversing.
    ///
    /// # Errors
    ///
    /// [`SearchError::NoPathFound`] unless the search reached its target
    /// ([`SearchError::BudgetExhausted`] if it was cut short).
    pub fn path(&self) -> SearchResult<Vec<NodeIdx>> {
        self.ensure_reached()?;

        let mut path = vec![self.target];
        let mut cur = self.target;
        while cur != self.start {
            cur = self.status[cur].parent;
            // A reached target always has an unbroken parent chain; a loop
            // or gap here means the status table was tampered with.
            if !cur.is_valid() || path.len() > self.status.len() {
                return Err(SearchError::NoPathFound { from: self.start, to: self.target });
            }
            path.push(cur);
        }
        path.reverse();
        Ok(path)
    }

    /// The reconstructed path together with its cost.
    pub fn route(&self) -> SearchResult<Route> {
        let path = self.path()?;
        Ok(Route { path, total_cost: self.status[self.target].g })
    }
}
