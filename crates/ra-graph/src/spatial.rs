//! Nearest-node lookup by coordinate.
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest [`NodeIdx`].
//! Built on demand rather than with every graph: routing by identifier, the
//! common case, never pays for it.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ra_core::{GeoPoint, NodeIdx};

use crate::graph::RoadGraph;

/// Entry stored in the R-tree: a `[lat, lon]` point and its node.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    idx: NodeIdx,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to pick the
    /// nearest node within a region; not a metric in metres.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Spatial index over the nodes of one [`RoadGraph`].
pub struct SpatialIndex {
    tree: RTree<NodeEntry>,
}

impl SpatialIndex {
    /// Bulk-load an index over every node of `graph`.  O(N log N).
    pub fn new(graph: &RoadGraph) -> Self {
        let entries: Vec<NodeEntry> = graph
            .node_indices()
            .map(|idx| {
                let pos = graph.coordinates(idx);
                NodeEntry { point: [pos.lat, pos.lon], idx }
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// The node nearest to `pos`; `None` only for an empty graph.
    pub fn nearest(&self, pos: GeoPoint) -> Option<NodeIdx> {
        self.tree
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.idx)
    }

    /// Up to `k` nodes nearest to `pos`, closest first.
    pub fn k_nearest(&self, pos: GeoPoint, k: usize) -> Vec<NodeIdx> {
        self.tree
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.idx)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
