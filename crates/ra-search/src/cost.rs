//! Edge-cost and heuristic functions.
//!
//! # Pluggability
//!
//! The engine is generic over [`CostModel`], so tests and applications can
//! plug in their own metric (unit weights, lookup tables) without touching
//! the search loop.
//!
//! # Admissibility
//!
//! A* returns an optimal path only if `heuristic(n, t)` never exceeds the
//! cheapest remaining cost from `n` to `t`.  For the models here:
//!
//! | Model          | Edge cost  | Heuristic | Admissible | Consistent        |
//! |----------------|------------|-----------|------------|-------------------|
//! | [`GreatCircle`]| haversine  | haversine | yes        | yes               |
//! | [`Planar`]     | planar     | haversine | within ~0.1 % | approximately  |
//! | [`Dijkstra`]   | inner      | zero      | yes        | yes               |
//!
//! Haversine is a true metric on the sphere, so with haversine edges the
//! heuristic obeys the triangle inequality edge by edge.  Planar edges can
//! come out marginally shorter than the great-circle chord; the engine's
//! closed-node reopening keeps results correct in that case.

use std::fmt;
use std::str::FromStr;

use ra_core::NodeIdx;
use ra_graph::RoadGraph;

/// Cost metric for one search: what an edge costs and how far the target
/// still looks.
///
/// Implementations must be `Send + Sync` so a model can be shared by
/// concurrent searches over one graph.  Both functions must return finite,
/// non-negative values.
pub trait CostModel: Send + Sync {
    /// Cost of traversing the edge `from → to`.
    fn edge_cost(&self, graph: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64;

    /// Estimated remaining cost from `node` to `target`.
    fn heuristic(&self, graph: &RoadGraph, node: NodeIdx, target: NodeIdx) -> f64;
}

impl<M: CostModel + ?Sized> CostModel for &M {
    #[inline]
    fn edge_cost(&self, graph: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64 {
        (**self).edge_cost(graph, from, to)
    }

    #[inline]
    fn heuristic(&self, graph: &RoadGraph, node: NodeIdx, target: NodeIdx) -> f64 {
        (**self).heuristic(graph, node, target)
    }
}

/// Great-circle metres for both edges and heuristic.  The default.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreatCircle;

impl CostModel for GreatCircle {
    #[inline]
    fn edge_cost(&self, graph: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64 {
        graph.coordinates(from).haversine_m(graph.coordinates(to))
    }

    #[inline]
    fn heuristic(&self, graph: &RoadGraph, node: NodeIdx, target: NodeIdx) -> f64 {
        graph.coordinates(node).haversine_m(graph.coordinates(target))
    }
}

/// Planar-approximation edges with the great-circle heuristic.
///
/// Cheaper per edge than [`GreatCircle`]; only meaningful when edges are
/// short, which holds for road segments.
#[derive(Copy, Clone, Debug, Default)]
pub struct Planar;

impl CostModel for Planar {
    #[inline]
    fn edge_cost(&self, graph: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64 {
        graph.coordinates(from).planar_m(graph.coordinates(to))
    }

    #[inline]
    fn heuristic(&self, graph: &RoadGraph, node: NodeIdx, target: NodeIdx) -> f64 {
        graph.coordinates(node).haversine_m(graph.coordinates(target))
    }
}

/// Wraps a model with a zero heuristic, turning A* into Dijkstra.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra<M>(pub M);

impl<M: CostModel> CostModel for Dijkstra<M> {
    #[inline]
    fn edge_cost(&self, graph: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64 {
        self.0.edge_cost(graph, from, to)
    }

    #[inline]
    fn heuristic(&self, _graph: &RoadGraph, _node: NodeIdx, _target: NodeIdx) -> f64 {
        0.0
    }
}

// ── Runtime selection ─────────────────────────────────────────────────────────

/// Cost model chosen at runtime (CLI flag, config file).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CostModelKind {
    #[default]
    GreatCircle,
    Planar,
}

impl CostModel for CostModelKind {
    #[inline]
    fn edge_cost(&self, graph: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64 {
        match self {
            CostModelKind::GreatCircle => GreatCircle.edge_cost(graph, from, to),
            CostModelKind::Planar      => Planar.edge_cost(graph, from, to),
        }
    }

    #[inline]
    fn heuristic(&self, graph: &RoadGraph, node: NodeIdx, target: NodeIdx) -> f64 {
        // Both kinds estimate with the great circle.
        GreatCircle.heuristic(graph, node, target)
    }
}

impl fmt::Display for CostModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CostModelKind::GreatCircle => "great-circle",
            CostModelKind::Planar      => "planar",
        })
    }
}

impl FromStr for CostModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "great-circle" | "haversine" => Ok(CostModelKind::GreatCircle),
            "planar"                     => Ok(CostModelKind::Planar),
            other => Err(format!(
                "unknown cost model {other:?}: expected \"great-circle\" or \"planar\""
            )),
        }
    }
}
