//! The A* search loop.
//!
//! # Usage
//!
//! ```
//! use ra_core::{GeoPoint, NodeId};
//! use ra_graph::RoadGraphBuilder;
//! use ra_search::{AStar, GreatCircle};
//!
//! let mut b = RoadGraphBuilder::new();
//! b.add_node(NodeId(1), None, GeoPoint::new(41.000, 2.000)).unwrap();
//! b.add_node(NodeId(2), None, GeoPoint::new(41.001, 2.000)).unwrap();
//! b.add_way(&[NodeId(1), NodeId(2)], false);
//! let graph = b.build().unwrap();
//!
//! let route = AStar::new(&graph, GreatCircle)
//!     .find_route(NodeId(1), NodeId(2))
//!     .unwrap();
//! assert_eq!(route.path.len(), 2);
//! assert!((route.total_cost - 111.2).abs() < 0.1);
//! ```
//!
//! [`AStar::run`] drives a search to completion; [`AStar::begin`] returns a
//! [`Search`] that advances one expansion per [`Search::step`], exposing the
//! open list and status table in between.
//!
//! # Concurrency
//!
//! Each search allocates and owns its [`StatusTable`] and [`OpenList`]; the
//! graph and cost model are only borrowed.  Run as many searches over one
//! graph in parallel as you like, but never share a `Search` between them.

use tracing::debug;

use ra_core::{NodeId, NodeIdx};
use ra_graph::RoadGraph;

use crate::cost::CostModel;
use crate::open_list::OpenList;
use crate::path::Route;
use crate::status::{Membership, StatusTable};
use crate::{Endpoint, SearchError, SearchResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Per-search limits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Give up after expanding this many nodes.  `None` = run until the
    /// target is reached or the frontier is exhausted.
    pub max_expansions: Option<usize>,
}

// ── Outcome types ─────────────────────────────────────────────────────────────

/// Why a search stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The target was extracted from the open list; its `g` is optimal
    /// (given an admissible heuristic).
    Reached,
    /// The open list emptied first: the target is unreachable.
    Exhausted,
    /// `max_expansions` was hit.
    BudgetExhausted,
}

/// Counters collected while searching.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes extracted from the open list and expanded.
    pub expanded: usize,
    /// Successful relaxations (a `g` value improved).
    pub relaxed:  usize,
    /// Closed nodes reopened by a cheaper path.
    pub reopened: usize,
    /// Largest open-list size observed.
    pub max_open: usize,
}

/// A finished search: the termination reason plus the full status table.
#[derive(Debug, Clone)]
pub struct SearchRun {
    pub start:       NodeIdx,
    pub target:      NodeIdx,
    pub termination: Termination,
    pub status:      StatusTable,
    pub stats:       SearchStats,
    pub(crate) limit: Option<usize>,
}

impl SearchRun {
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.termination == Termination::Reached
    }

    /// Best known cost from the start to `node`, if it was discovered.
    pub fn cost_to(&self, node: NodeIdx) -> Option<f64> {
        let s = &self.status[node];
        s.is_discovered().then_some(s.g)
    }

    /// Turn a non-`Reached` termination into the matching error.
    pub(crate) fn ensure_reached(&self) -> SearchResult<()> {
        match self.termination {
            Termination::Reached => Ok(()),
            Termination::Exhausted => Err(SearchError::NoPathFound {
                from: self.start,
                to:   self.target,
            }),
            Termination::BudgetExhausted => Err(SearchError::BudgetExhausted {
                limit: self.limit.unwrap_or(self.stats.expanded),
            }),
        }
    }
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// A* search over a borrowed [`RoadGraph`] with cost model `M`.
///
/// Cheap to construct; holds no per-search state.
pub struct AStar<'g, M> {
    graph:  &'g RoadGraph,
    model:  M,
    config: SearchConfig,
}

impl<'g, M: CostModel> AStar<'g, M> {
    pub fn new(graph: &'g RoadGraph, model: M) -> Self {
        Self { graph, model, config: SearchConfig::default() }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &'g RoadGraph {
        self.graph
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Resolve both external ids, search, and reconstruct the route.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NodeNotFound`] naming the missing endpoint;
    /// - [`SearchError::NoPathFound`] if the target is unreachable;
    /// - [`SearchError::BudgetExhausted`] if `max_expansions` ran out.
    pub fn find_route(&self, start: NodeId, target: NodeId) -> SearchResult<Route> {
        let start = self
            .graph
            .lookup(start)
            .ok_or(SearchError::NodeNotFound { id: start, endpoint: Endpoint::Start })?;
        let target = self
            .graph
            .lookup(target)
            .ok_or(SearchError::NodeNotFound { id: target, endpoint: Endpoint::Target })?;
        self.run(start, target).route()
    }

    /// Search from `start` to `target` and return the finished run.
    ///
    /// Both indices must belong to the graph.
    pub fn run(&self, start: NodeIdx, target: NodeIdx) -> SearchRun {
        let mut search = self.begin(start, target);
        while search.step().is_none() {}
        search.finish()
    }

    /// Start a search without running it; drive it with [`Search::step`].
    pub fn begin(&self, start: NodeIdx, target: NodeIdx) -> Search<'_, 'g, M> {
        let n = self.graph.node_count();
        let mut status = StatusTable::new(n);
        let mut open = OpenList::new(n);

        let h = self.model.heuristic(self.graph, start, target);
        let s = &mut status[start];
        s.g = 0.0;
        s.h = h;
        s.f = h;
        s.membership = Membership::Open;
        open.insert(start, h);

        Search {
            engine: self,
            start,
            target,
            status,
            open,
            stats: SearchStats { max_open: 1, ..SearchStats::default() },
            termination: None,
        }
    }
}

// ── Search (in-flight) ────────────────────────────────────────────────────────

/// An in-progress search.  Owns its status table and open list.
pub struct Search<'a, 'g, M> {
    engine:      &'a AStar<'g, M>,
    start:       NodeIdx,
    target:      NodeIdx,
    status:      StatusTable,
    open:        OpenList,
    stats:       SearchStats,
    termination: Option<Termination>,
}

impl<'a, 'g, M: CostModel> Search<'a, 'g, M> {
    pub fn open_list(&self) -> &OpenList {
        &self.open
    }

    pub fn status(&self) -> &StatusTable {
        &self.status
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Perform one iteration of the main loop: extract the cheapest open
    /// node and relax its successors.
    ///
    /// Returns `Some` once the search has terminated; further calls are
    /// no-ops returning the same value.
    pub fn step(&mut self) -> Option<Termination> {
        if self.termination.is_some() {
            return self.termination;
        }
        let Some((current, _)) = self.open.peek_min() else {
            return self.terminate(Termination::Exhausted);
        };
        // Popping the target costs no expansion, so it is accepted even
        // with the budget spent.
        if current != self.target && self.budget_spent() {
            return self.terminate(Termination::BudgetExhausted);
        }
        self.open.remove(current);
        // Out of the open list from here on; never expanded twice at the same g.
        self.status[current].membership = Membership::Closed;

        if current == self.target {
            return self.terminate(Termination::Reached);
        }
        self.stats.expanded += 1;
        self.expand(current);
        self.stats.max_open = self.stats.max_open.max(self.open.len());
        None
    }

    #[inline]
    fn budget_spent(&self) -> bool {
        self.engine.config.max_expansions.is_some_and(|limit| self.stats.expanded >= limit)
    }

    fn expand(&mut self, current: NodeIdx) {
        let engine = self.engine;
        let (graph, model) = (engine.graph, &engine.model);
        let g_current = self.status[current].g;

        for &succ in graph.successors(current) {
            let cost = model.edge_cost(graph, current, succ);
            debug_assert!(cost >= 0.0, "negative edge cost {cost} on {current} → {succ}");
            let tentative = g_current + cost;

            let s = &mut self.status[succ];
            // Unvisited nodes have g = ∞, so this only skips OPEN/CLOSED
            // nodes without an improvement.  Also rejects self-loops.
            if tentative >= s.g {
                continue;
            }

            let previous = s.membership;
            if previous == Membership::Unvisited {
                s.h = model.heuristic(graph, succ, self.target);
            }
            s.g = tentative;
            s.f = tentative + s.h;
            s.parent = current;
            s.membership = Membership::Open;
            let f = s.f;
            self.stats.relaxed += 1;

            match previous {
                Membership::Unvisited => self.open.insert(succ, f),
                Membership::Open      => self.open.update(succ, f),
                Membership::Closed    => {
                    self.stats.reopened += 1;
                    self.open.insert(succ, f);
                }
            }
        }
    }

    fn terminate(&mut self, why: Termination) -> Option<Termination> {
        self.termination = Some(why);
        debug!(
            start = %self.start,
            target = %self.target,
            termination = ?why,
            expanded = self.stats.expanded,
            relaxed = self.stats.relaxed,
            reopened = self.stats.reopened,
            max_open = self.stats.max_open,
            "search finished"
        );
        self.termination
    }

    /// Consume the search and package its state.  A search that has not
    /// terminated yet is run to completion first.
    pub fn finish(mut self) -> SearchRun {
        let termination = loop {
            if let Some(t) = self.step() {
                break t;
            }
        };
        SearchRun {
            start:  self.start,
            target: self.target,
            termination,
            status: self.status,
            stats:  self.stats,
            limit:  self.engine.config.max_expansions,
        }
    }
}
