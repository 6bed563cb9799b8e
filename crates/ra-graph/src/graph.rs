//! Immutable road graph store.
//!
//! # Data layout
//!
//! Nodes live in parallel arrays sorted by external [`NodeId`], so a node's
//! position in the arrays *is* its [`NodeIdx`].  Successors use **Compressed
//! Sparse Row (CSR)** format:
//!
//! ```text
//! succ[ succ_start[n] .. succ_start[n+1] ]
//! ```
//!
//! Names are concatenated into one `String` and sliced the same way through
//! `name_start`.  There is no per-node allocation and no pointer between
//! nodes; everything is an index into a flat array owned by the store.
//!
//! # Lookup
//!
//! [`RoadGraph::lookup`] binary-searches `node_id`.  Sort order is a build
//! invariant established by [`RoadGraphBuilder`](crate::RoadGraphBuilder)
//! and verified by the binary loader, never re-checked per query.

use ra_core::{GeoPoint, NodeId, NodeIdx};

use crate::{GraphError, GraphResult};

/// Directed road graph in CSR format, sorted by external identifier.
///
/// Read-only after construction and `Sync`, so any number of concurrent
/// searches may borrow the same store.  Build one with
/// [`RoadGraphBuilder`](crate::RoadGraphBuilder) or load one with
/// [`read_graph`](crate::binary::read_graph).
#[derive(Debug, Clone)]
pub struct RoadGraph {
    // ── Node data (indexed by NodeIdx) ───────────────────────────────────
    /// External identifier of each node.  Strictly increasing.
    pub(crate) node_id: Vec<NodeId>,

    /// Geographic position of each node.
    pub(crate) node_pos: Vec<GeoPoint>,

    // ── CSR successor adjacency ──────────────────────────────────────────
    /// Row pointer.  Successors of node `n` are `succ[succ_start[n]..succ_start[n+1]]`.
    /// Length = `node_count + 1`.
    pub(crate) succ_start: Vec<u32>,

    /// Flattened successor indices, contiguous per node in node order.
    pub(crate) succ: Vec<NodeIdx>,

    // ── Names ────────────────────────────────────────────────────────────
    /// Row pointer into `names`.  Length = `node_count + 1`.
    pub(crate) name_start: Vec<u32>,

    /// All node names concatenated, without separators.
    pub(crate) names: String,
}

impl RoadGraph {
    /// Construct an empty graph with no nodes.
    pub fn empty() -> Self {
        Self {
            node_id:    Vec::new(),
            node_pos:   Vec::new(),
            succ_start: vec![0],
            succ:       Vec::new(),
            name_start: vec![0],
            names:      String::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_id.len()
    }

    /// Total number of successor slots (directed edges).
    pub fn successor_count(&self) -> usize {
        self.succ.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_id.is_empty()
    }

    /// Iterator over every valid `NodeIdx`, in identifier order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.node_id.len() as u32).map(NodeIdx)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Position of the node with external identifier `id`, or `None` if the
    /// graph has no such node.
    ///
    /// O(log n).  Succeeds for every present node, connected or not.
    #[inline]
    pub fn lookup(&self, id: NodeId) -> Option<NodeIdx> {
        self.node_id
            .binary_search(&id)
            .ok()
            .map(|i| NodeIdx(i as u32))
    }

    /// Like [`lookup`](Self::lookup) but reports a missing node as
    /// [`GraphError::NodeNotFound`].
    pub fn try_lookup(&self, id: NodeId) -> GraphResult<NodeIdx> {
        self.lookup(id).ok_or(GraphError::NodeNotFound(id))
    }

    // ── Per-node accessors ────────────────────────────────────────────────

    /// Ordered, duplicate-free successors of `node`.
    ///
    /// A contiguous slice of the CSR array; no allocation.
    #[inline]
    pub fn successors(&self, node: NodeIdx) -> &[NodeIdx] {
        let start = self.succ_start[node.index()] as usize;
        let end   = self.succ_start[node.index() + 1] as usize;
        &self.succ[start..end]
    }

    /// Number of successors of `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeIdx) -> usize {
        (self.succ_start[node.index() + 1] - self.succ_start[node.index()]) as usize
    }

    #[inline]
    pub fn coordinates(&self, node: NodeIdx) -> GeoPoint {
        self.node_pos[node.index()]
    }

    #[inline]
    pub fn id(&self, node: NodeIdx) -> NodeId {
        self.node_id[node.index()]
    }

    /// Display name of `node`; `None` when the source had none.
    pub fn name(&self, node: NodeIdx) -> Option<&str> {
        let start = self.name_start[node.index()] as usize;
        let end   = self.name_start[node.index() + 1] as usize;
        let name = &self.names[start..end];
        (!name.is_empty()).then_some(name)
    }

    // ── Raw views ─────────────────────────────────────────────────────────

    /// All node positions, indexed by `NodeIdx`.
    pub fn positions(&self) -> &[GeoPoint] {
        &self.node_pos
    }

    /// All external identifiers, indexed by `NodeIdx` (sorted ascending).
    pub fn ids(&self) -> &[NodeId] {
        &self.node_id
    }
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::empty()
    }
}
