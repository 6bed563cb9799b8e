//! Incremental construction of a [`RoadGraph`].

use rustc_hash::FxHashMap;
use tracing::debug;

use ra_core::{GeoPoint, NodeId, NodeIdx};

use crate::graph::RoadGraph;
use crate::{GraphError, GraphResult};

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes and directed edges may be added in any order; edges refer to nodes
/// by external [`NodeId`].  `build()` sorts nodes by identifier, resolves
/// edges to indices, removes parallel edges, and lays out the CSR arrays.
///
/// # Example
///
/// ```
/// use ra_core::{GeoPoint, NodeId};
/// use ra_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// b.add_node(NodeId(20), Some("Plaça"), GeoPoint::new(41.38, 2.17)).unwrap();
/// b.add_node(NodeId(10), None, GeoPoint::new(41.39, 2.16)).unwrap();
/// b.add_way(&[NodeId(10), NodeId(20)], false);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.successor_count(), 2); // two-way
/// assert_eq!(graph.lookup(NodeId(10)).map(|i| i.0), Some(0));
/// ```
pub struct RoadGraphBuilder {
    nodes:     Vec<RawNode>,
    /// External id → position in `nodes` (insertion order).
    by_id:     FxHashMap<NodeId, u32>,
    raw_edges: Vec<(NodeId, NodeId)>,
}

struct RawNode {
    id:   NodeId,
    name: String,
    pos:  GeoPoint,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            by_id:     FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and directed edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut by_id = FxHashMap::default();
        by_id.reserve(nodes);
        Self {
            nodes: Vec::with_capacity(nodes),
            by_id,
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node.  NUL characters in `name` are dropped (the binary format
    /// uses NUL as the name terminator).
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateNode`] if `id` was already added;
    /// [`GraphError::InvalidCoordinate`] for a non-finite or out-of-range
    /// position (it would turn every edge cost through the node into NaN).
    pub fn add_node(&mut self, id: NodeId, name: Option<&str>, pos: GeoPoint) -> GraphResult<()> {
        if !pos.is_valid() {
            return Err(GraphError::InvalidCoordinate { id, pos });
        }
        if self.by_id.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.by_id.insert(id, self.nodes.len() as u32);
        let name = name.map(|n| n.replace('\0', "")).unwrap_or_default();
        self.nodes.push(RawNode { id, name, pos });
        Ok(())
    }

    /// `true` if a node with this identifier has been added.
    pub fn contains(&self, id: NodeId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.by_id.get(&id).map(|&slot| self.nodes[slot as usize].pos)
    }

    /// Add a **directed** edge.  Endpoints are resolved at `build()` time.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.raw_edges.push((from, to));
    }

    /// Add edges between each consecutive pair of `members`; in both
    /// directions unless `oneway`.
    pub fn add_way(&mut self, members: &[NodeId], oneway: bool) {
        for pair in members.windows(2) {
            self.add_edge(pair[0], pair[1]);
            if !oneway {
                self.add_edge(pair[1], pair[0]);
            }
        }
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Successor lists keep the order edges were added in, minus repeats.
    /// Self-loops are kept.
    ///
    /// Time complexity: O(N log N + E).
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] if an edge names an identifier that was
    /// never added; [`GraphError::TooLarge`] past `u32::MAX - 1` nodes.
    pub fn build(self) -> GraphResult<RoadGraph> {
        let node_count = self.nodes.len();
        if node_count >= u32::MAX as usize {
            return Err(GraphError::TooLarge(node_count));
        }

        // Sort: order[i] = insertion slot of the node that ends up at index i.
        let mut order: Vec<u32> = (0..node_count as u32).collect();
        order.sort_unstable_by_key(|&slot| self.nodes[slot as usize].id);

        // rank[slot] = final NodeIdx of the node inserted at `slot`.
        let mut rank = vec![0u32; node_count];
        for (i, &slot) in order.iter().enumerate() {
            rank[slot as usize] = i as u32;
        }

        // Resolve edges to final indices.
        let resolve = |id: NodeId| -> GraphResult<u32> {
            self.by_id
                .get(&id)
                .map(|&slot| rank[slot as usize])
                .ok_or(GraphError::UnknownNode(id))
        };
        let mut edges: Vec<(u32, u32)> = Vec::with_capacity(self.raw_edges.len());
        for &(from, to) in &self.raw_edges {
            edges.push((resolve(from)?, resolve(to)?));
        }

        // Counting sort by source; iterating edges in order keeps each
        // node's successors in insertion order.
        let mut bucket_start = vec![0u32; node_count + 1];
        for &(from, _) in &edges {
            bucket_start[from as usize + 1] += 1;
        }
        for i in 1..=node_count {
            bucket_start[i] += bucket_start[i - 1];
        }
        let mut cursor = bucket_start.clone();
        let mut bucketed = vec![NodeIdx::INVALID; edges.len()];
        for &(from, to) in &edges {
            let c = &mut cursor[from as usize];
            bucketed[*c as usize] = NodeIdx(to);
            *c += 1;
        }
        drop(edges);

        // Drop parallel edges.  `stamp[t] == n + 1` means n already lists t.
        let mut stamp = vec![0u32; node_count];
        let mut succ_start = Vec::with_capacity(node_count + 1);
        let mut succ = Vec::with_capacity(bucketed.len());
        succ_start.push(0u32);
        for n in 0..node_count {
            let (lo, hi) = (bucket_start[n] as usize, bucket_start[n + 1] as usize);
            for &to in &bucketed[lo..hi] {
                if stamp[to.index()] != n as u32 + 1 {
                    stamp[to.index()] = n as u32 + 1;
                    succ.push(to);
                }
            }
            succ_start.push(succ.len() as u32);
        }

        let duplicates = bucketed.len() - succ.len();
        if duplicates > 0 {
            debug!(duplicates, "dropped parallel edges");
        }

        // Lay out node arrays and the name blob in sorted order.
        let mut nodes: Vec<Option<RawNode>> = self.nodes.into_iter().map(Some).collect();
        let mut node_id    = Vec::with_capacity(node_count);
        let mut node_pos   = Vec::with_capacity(node_count);
        let mut name_start = Vec::with_capacity(node_count + 1);
        let mut names      = String::new();
        name_start.push(0u32);
        for &slot in &order {
            if let Some(raw) = nodes[slot as usize].take() {
                node_id.push(raw.id);
                node_pos.push(raw.pos);
                names.push_str(&raw.name);
                name_start.push(names.len() as u32);
            }
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
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
