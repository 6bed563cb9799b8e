//! Unit tests for ra-search.
//!
//! Graphs are built in memory; random graphs use a seeded `SmallRng` so
//! every run sees the same cases.

#[cfg(test)]
mod helpers {
    use std::collections::HashMap;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use ra_core::{GeoPoint, NodeId, NodeIdx};
    use ra_graph::{RoadGraph, RoadGraphBuilder};

    use crate::CostModel;

    /// Every edge costs 1; no heuristic.
    pub struct UnitCost;

    impl CostModel for UnitCost {
        fn edge_cost(&self, _: &RoadGraph, _: NodeIdx, _: NodeIdx) -> f64 {
            1.0
        }
        fn heuristic(&self, _: &RoadGraph, _: NodeIdx, _: NodeIdx) -> f64 {
            0.0
        }
    }

    /// Edge costs and heuristic values from lookup tables keyed by external id.
    #[derive(Default)]
    pub struct TableCost {
        pub edges: HashMap<(u64, u64), f64>,
        pub h:     HashMap<u64, f64>,
    }

    impl CostModel for TableCost {
        fn edge_cost(&self, g: &RoadGraph, from: NodeIdx, to: NodeIdx) -> f64 {
            self.edges[&(g.id(from).0, g.id(to).0)]
        }
        fn heuristic(&self, g: &RoadGraph, node: NodeIdx, _: NodeIdx) -> f64 {
            self.h.get(&g.id(node).0).copied().unwrap_or(0.0)
        }
    }

    /// Directed graph over ids `1..=n` from `(from, to)` id pairs.
    /// Coordinates are irrelevant for table/unit models.
    pub fn graph_from_edges(n: u64, edges: &[(u64, u64)]) -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        for id in 1..=n {
            b.add_node(NodeId(id), None, GeoPoint::new(0.0, id as f64 * 0.001)).unwrap();
        }
        for &(from, to) in edges {
            b.add_edge(NodeId(from), NodeId(to));
        }
        b.build().unwrap()
    }

    /// `side × side` two-way grid, 0.001° spacing, ids `r * side + c + 1`.
    pub fn grid(side: u64) -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        for r in 0..side {
            for c in 0..side {
                let pos = GeoPoint::new(41.0 + r as f64 * 0.001, 2.0 + c as f64 * 0.001);
                b.add_node(NodeId(r * side + c + 1), None, pos).unwrap();
            }
        }
        for r in 0..side {
            let row: Vec<NodeId> = (0..side).map(|c| NodeId(r * side + c + 1)).collect();
            b.add_way(&row, false);
        }
        for c in 0..side {
            let col: Vec<NodeId> = (0..side).map(|r| NodeId(r * side + c + 1)).collect();
            b.add_way(&col, false);
        }
        b.build().unwrap()
    }

    /// Random directed graph: `n` nodes scattered over a ~5 km box, `m`
    /// random edges (self-loops and repeats included; the builder dedups).
    pub fn random_graph(seed: u64, n: u64, m: usize) -> RoadGraph {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut b = RoadGraphBuilder::new();
        for id in 1..=n {
            let pos = GeoPoint::new(41.0 + rng.r#gen::<f64>() * 0.05, 2.0 + rng.r#gen::<f64>() * 0.05);
            b.add_node(NodeId(id), None, pos).unwrap();
        }
        for _ in 0..m {
            let from = rng.gen_range(1..=n);
            let to = rng.gen_range(1..=n);
            b.add_edge(NodeId(from), NodeId(to));
        }
        b.build().unwrap()
    }

    /// Bellman–Ford single-source costs: the brute-force reference.
    pub fn brute_force_costs<M: CostModel>(g: &RoadGraph, model: &M, start: NodeIdx) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; g.node_count()];
        dist[start.index()] = 0.0;
        for _ in 0..g.node_count() {
            let mut changed = false;
            for u in g.node_indices() {
                if dist[u.index()].is_infinite() {
                    continue;
                }
                for &v in g.successors(u) {
                    let d = dist[u.index()] + model.edge_cost(g, u, v);
                    if d < dist[v.index()] {
                        dist[v.index()] = d;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist
    }

    pub fn idx(g: &RoadGraph, id: u64) -> NodeIdx {
        g.lookup(NodeId(id)).unwrap()
    }

    pub fn ids(g: &RoadGraph, path: &[NodeIdx]) -> Vec<u64> {
        path.iter().map(|&n| g.id(n).0).collect()
    }
}

// ── Open list ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod open_list {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use ra_core::NodeIdx;

    use crate::{OpenList, OpenListError};

    #[test]
    fn extract_in_priority_order() {
        let mut open = OpenList::new(5);
        open.insert(NodeIdx(0), 3.0);
        open.insert(NodeIdx(1), 1.0);
        open.insert(NodeIdx(2), 2.0);
        open.insert(NodeIdx(3), 0.5);
        assert_eq!(open.len(), 4);
        assert_eq!(open.peek_min(), Some((NodeIdx(3), 0.5)));

        let order: Vec<u32> = std::iter::from_fn(|| open.extract_min().ok())
            .map(|(n, _)| n.0)
            .collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
        assert!(open.is_empty());
    }

    #[test]
    fn ties_leave_in_insertion_order() {
        let mut open = OpenList::new(6);
        for n in [4, 1, 5, 0] {
            open.insert(NodeIdx(n), 7.0);
        }
        let order: Vec<u32> = std::iter::from_fn(|| open.extract_min().ok())
            .map(|(n, _)| n.0)
            .collect();
        assert_eq!(order, vec![4, 1, 5, 0]);
    }

    #[test]
    fn empty_extract_fails() {
        let mut open = OpenList::new(1);
        assert_eq!(open.extract_min(), Err(OpenListError::Empty));
    }

    #[test]
    fn remove_by_key() {
        let mut open = OpenList::new(4);
        open.insert(NodeIdx(0), 1.0);
        open.insert(NodeIdx(1), 2.0);
        open.insert(NodeIdx(2), 3.0);

        assert_eq!(open.remove(NodeIdx(1)), Some(2.0));
        assert!(!open.contains(NodeIdx(1)));
        assert_eq!(open.remove(NodeIdx(1)), None);
        assert_eq!(open.remove(NodeIdx(3)), None);
        open.assert_consistent();

        assert_eq!(open.extract_min(), Ok((NodeIdx(0), 1.0)));
        assert_eq!(open.extract_min(), Ok((NodeIdx(2), 3.0)));
    }

    #[test]
    fn update_moves_entry() {
        let mut open = OpenList::new(3);
        open.insert(NodeIdx(0), 5.0);
        open.insert(NodeIdx(1), 6.0);
        open.update(NodeIdx(1), 1.0);
        assert_eq!(open.len(), 2);
        assert_eq!(open.priority(NodeIdx(1)), Some(1.0));
        assert_eq!(open.extract_min(), Ok((NodeIdx(1), 1.0)));
    }

    #[test]
    fn clear_resets_positions() {
        let mut open = OpenList::new(3);
        open.insert(NodeIdx(0), 1.0);
        open.insert(NodeIdx(2), 2.0);
        open.clear();
        assert!(open.is_empty());
        assert!(!open.contains(NodeIdx(2)));
        open.insert(NodeIdx(2), 4.0);
        open.assert_consistent();
    }

    /// Random insert/remove/update/extract sequences against a brute-force
    /// model: the heap must always agree on membership and the minimum.
    #[test]
    fn random_operations_match_reference() {
        const N: usize = 64;
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let mut open = OpenList::new(N);
        // reference[n] = Some((f, seq)) while queued.
        let mut reference: Vec<Option<(f64, u64)>> = vec![None; N];
        let mut seq = 0u64;

        for _ in 0..5_000 {
            let node = NodeIdx(rng.gen_range(0..N as u32));
            match rng.gen_range(0..4) {
                0 | 1 => {
                    // Coarse priorities so ties are common.
                    let f = rng.gen_range(0..20) as f64;
                    if reference[node.index()].is_some() {
                        open.update(node, f);
                    } else {
                        open.insert(node, f);
                    }
                    reference[node.index()] = Some((f, seq));
                    seq += 1;
                }
                2 => {
                    let expected = reference[node.index()].take().map(|(f, _)| f);
                    assert_eq!(open.remove(node), expected);
                }
                _ => {
                    let expected = reference
                        .iter()
                        .enumerate()
                        .filter_map(|(i, e)| e.map(|(f, s)| (f, s, i)))
                        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                    match expected {
                        None => assert_eq!(open.extract_min(), Err(OpenListError::Empty)),
                        Some((f, _, i)) => {
                            assert_eq!(open.extract_min(), Ok((NodeIdx(i as u32), f)));
                            reference[i] = None;
                        }
                    }
                }
            }
            open.assert_consistent();
            assert_eq!(open.len(), reference.iter().filter(|e| e.is_some()).count());
        }
    }
}

// ── Engine scenarios ──────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use ra_core::NodeId;

    use crate::{AStar, Endpoint, Membership, SearchConfig, SearchError, Termination};
    use super::helpers::{graph_from_edges, ids, idx, TableCost, UnitCost};

    #[test]
    fn line_graph_unit_costs() {
        // A–B–C–D as ids 1–2–3–4, both directions.
        let g = graph_from_edges(4, &[(1, 2), (2, 1), (2, 3), (3, 2), (3, 4), (4, 3)]);
        let route = AStar::new(&g, UnitCost).find_route(NodeId(1), NodeId(4)).unwrap();
        assert_eq!(ids(&g, &route.path), vec![1, 2, 3, 4]);
        assert_eq!(route.total_cost, 3.0);
        assert_eq!(route.hops(), 3);
    }

    #[test]
    fn cheap_detour_beats_direct_edge() {
        let g = graph_from_edges(4, &[(1, 4), (1, 2), (2, 3), (3, 4)]);
        let mut model = TableCost::default();
        model.edges.insert((1, 4), 10.0);
        model.edges.insert((1, 2), 1.0);
        model.edges.insert((2, 3), 1.0);
        model.edges.insert((3, 4), 1.0);

        let route = AStar::new(&g, model).find_route(NodeId(1), NodeId(4)).unwrap();
        assert_eq!(ids(&g, &route.path), vec![1, 2, 3, 4]);
        assert_eq!(route.total_cost, 3.0);
    }

    #[test]
    fn start_equals_target() {
        let g = graph_from_edges(3, &[(1, 2), (2, 3)]);
        let engine = AStar::new(&g, UnitCost);
        let run = engine.run(idx(&g, 2), idx(&g, 2));
        assert_eq!(run.termination, Termination::Reached);
        assert_eq!(run.stats.expanded, 0);

        let route = run.route().unwrap();
        assert_eq!(route.path, vec![idx(&g, 2)]);
        assert_eq!(route.total_cost, 0.0);
        assert!(route.is_trivial());
    }

    #[test]
    fn disconnected_target() {
        // 1 → 2 → 3, and an island 4 ⇄ 5.
        let g = graph_from_edges(5, &[(1, 2), (2, 3), (4, 5), (5, 4)]);
        let run = AStar::new(&g, UnitCost).run(idx(&g, 1), idx(&g, 5));
        assert_eq!(run.termination, Termination::Exhausted);
        assert_eq!(run.stats.expanded, 3);
        assert!(matches!(run.path(), Err(SearchError::NoPathFound { .. })));
        assert!(matches!(run.route(), Err(SearchError::NoPathFound { .. })));
        // The island was never touched.
        assert_eq!(run.status[idx(&g, 4)].membership, Membership::Unvisited);
    }

    #[test]
    fn one_way_blocks_return() {
        let g = graph_from_edges(2, &[(1, 2)]);
        let engine = AStar::new(&g, UnitCost);
        assert!(engine.find_route(NodeId(1), NodeId(2)).is_ok());
        assert!(matches!(
            engine.find_route(NodeId(2), NodeId(1)),
            Err(SearchError::NoPathFound { .. })
        ));
    }

    #[test]
    fn missing_endpoints_reported() {
        let g = graph_from_edges(2, &[(1, 2)]);
        let engine = AStar::new(&g, UnitCost);
        assert!(matches!(
            engine.find_route(NodeId(9), NodeId(2)),
            Err(SearchError::NodeNotFound { id: NodeId(9), endpoint: Endpoint::Start })
        ));
        assert!(matches!(
            engine.find_route(NodeId(1), NodeId(9)),
            Err(SearchError::NodeNotFound { id: NodeId(9), endpoint: Endpoint::Target })
        ));
    }

    #[test]
    fn self_loops_and_zero_cost_cycles_terminate() {
        // 1 ⟲, 1 → 2 ⇄ 3 (zero cost), 3 → 4.
        let g = graph_from_edges(4, &[(1, 1), (1, 2), (2, 3), (3, 2), (3, 4)]);
        let mut model = TableCost::default();
        model.edges.insert((1, 1), 0.0);
        model.edges.insert((1, 2), 1.0);
        model.edges.insert((2, 3), 0.0);
        model.edges.insert((3, 2), 0.0);
        model.edges.insert((3, 4), 2.0);

        let run = AStar::new(&g, model).run(idx(&g, 1), idx(&g, 4));
        assert_eq!(run.termination, Termination::Reached);
        assert_eq!(run.route().unwrap().total_cost, 3.0);
        assert_eq!(run.stats.reopened, 0);
        // 2, 3 and 4 each improve once; the loop and the 3 → 2 edge never do.
        assert_eq!(run.stats.relaxed, 3);
    }

    #[test]
    fn closed_node_reopened_by_inconsistent_heuristic() {
        // S=1, A=2, B=3, T=4.  h(B) is admissible but inconsistent, so A is
        // closed via the expensive edge before B offers the cheap one.
        let g = graph_from_edges(4, &[(1, 2), (1, 3), (3, 2), (2, 4)]);
        let mut model = TableCost::default();
        model.edges.insert((1, 2), 4.0);
        model.edges.insert((1, 3), 1.0);
        model.edges.insert((3, 2), 1.0);
        model.edges.insert((2, 4), 10.0);
        model.h.insert(3, 10.0);

        let run = AStar::new(&g, model).run(idx(&g, 1), idx(&g, 4));
        assert_eq!(run.stats.reopened, 1);
        let route = run.route().unwrap();
        assert_eq!(ids(&g, &route.path), vec![1, 3, 2, 4]);
        assert_eq!(route.total_cost, 12.0);
    }

    #[test]
    fn budget_stops_search() {
        let g = graph_from_edges(4, &[(1, 2), (2, 3), (3, 4)]);
        let engine = AStar::new(&g, UnitCost)
            .with_config(SearchConfig { max_expansions: Some(2) });
        let run = engine.run(idx(&g, 1), idx(&g, 4));
        assert_eq!(run.termination, Termination::BudgetExhausted);
        assert_eq!(run.stats.expanded, 2);
        assert!(matches!(run.route(), Err(SearchError::BudgetExhausted { limit: 2 })));

        // Three expansions leave the target at the head of the open list.
        let engine = AStar::new(&g, UnitCost)
            .with_config(SearchConfig { max_expansions: Some(3) });
        assert!(engine.run(idx(&g, 1), idx(&g, 4)).is_reached());
    }

    #[test]
    fn parents_and_costs_exposed() {
        let g = graph_from_edges(3, &[(1, 2), (2, 3)]);
        let run = AStar::new(&g, UnitCost).run(idx(&g, 1), idx(&g, 3));
        assert_eq!(run.status[idx(&g, 3)].parent, idx(&g, 2));
        assert_eq!(run.status[idx(&g, 2)].parent, idx(&g, 1));
        assert!(!run.status[idx(&g, 1)].parent.is_valid());
        assert_eq!(run.cost_to(idx(&g, 2)), Some(1.0));
    }

    #[test]
    fn step_is_idempotent_after_termination() {
        let g = graph_from_edges(2, &[(1, 2)]);
        let engine = AStar::new(&g, UnitCost);
        let mut search = engine.begin(idx(&g, 1), idx(&g, 2));
        assert_eq!(search.step(), None);
        assert_eq!(search.step(), Some(Termination::Reached));
        assert_eq!(search.step(), Some(Termination::Reached));
        assert_eq!(search.termination(), Some(Termination::Reached));
        assert!(search.finish().is_reached());
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use ra_core::NodeIdx;
    use ra_graph::RoadGraph;

    use crate::{AStar, CostModel, Dijkstra, GreatCircle, Membership, Planar, Termination};
    use super::helpers::{brute_force_costs, grid, idx, random_graph};

    #[test]
    fn haversine_heuristic_is_admissible_on_grid() {
        let g = grid(6);
        let target = idx(&g, 36);
        let dijkstra = AStar::new(&g, Dijkstra(GreatCircle));
        for n in g.node_indices() {
            let true_cost = dijkstra.run(n, target).route().unwrap().total_cost;
            let h = GreatCircle.heuristic(&g, n, target);
            assert!(h <= true_cost + 1e-6, "{n}: h={h} > true cost {true_cost}");
        }
    }

    #[test]
    fn haversine_heuristic_is_consistent_on_grid() {
        let g = grid(5);
        let target = idx(&g, 1);
        for u in g.node_indices() {
            for &v in g.successors(u) {
                let lhs = GreatCircle.heuristic(&g, u, target);
                let rhs = GreatCircle.edge_cost(&g, u, v) + GreatCircle.heuristic(&g, v, target);
                assert!(lhs <= rhs + 1e-6, "{u}→{v}: {lhs} > {rhs}");
            }
        }
    }

    #[test]
    fn grid_corner_to_corner() {
        let g = grid(8);
        let route = AStar::new(&g, GreatCircle)
            .run(idx(&g, 1), idx(&g, 64))
            .route()
            .unwrap();
        // No diagonals, so a shortest route is monotone: 14 hops.
        assert_eq!(route.hops(), 14);
        let along: f64 = route
            .path
            .windows(2)
            .map(|w| GreatCircle.edge_cost(&g, w[0], w[1]))
            .sum();
        assert!((along - route.total_cost).abs() < 1e-6);
    }

    fn check_optimal<M: CostModel>(g: &RoadGraph, model: &M, tolerance: f64) {
        let engine = AStar::new(g, model);
        let n = g.node_count() as u32;
        for s in (0..n).step_by(7) {
            let start = NodeIdx(s);
            let reference = brute_force_costs(g, model, start);
            for t in (0..n).step_by(5) {
                let target = NodeIdx(t);
                let run = engine.run(start, target);
                let expected = reference[target.index()];
                if expected.is_infinite() {
                    assert_eq!(run.termination, Termination::Exhausted, "{start}→{target}");
                    continue;
                }
                let route = run.route().unwrap();
                assert!(
                    (route.total_cost - expected).abs() <= tolerance * expected.max(1.0),
                    "{start}→{target}: A* {} vs reference {expected}",
                    route.total_cost
                );
                assert_eq!(route.start(), Some(start));
                assert_eq!(route.target(), Some(target));
                for w in route.path.windows(2) {
                    assert!(g.successors(w[0]).contains(&w[1]), "path uses a non-edge");
                }
            }
        }
    }

    #[test]
    fn great_circle_matches_brute_force_on_random_graphs() {
        for seed in 0..8 {
            let g = random_graph(seed, 60, 240);
            check_optimal(&g, &GreatCircle, 1e-9);
        }
    }

    #[test]
    fn planar_matches_brute_force_on_random_graphs() {
        for seed in 100..104 {
            let g = random_graph(seed, 60, 240);
            check_optimal(&g, &Planar, 1e-4);
        }
    }

    #[test]
    fn astar_and_dijkstra_agree() {
        let g = random_graph(42, 120, 600);
        let astar = AStar::new(&g, GreatCircle);
        let dijkstra = AStar::new(&g, Dijkstra(GreatCircle));
        for (s, t) in [(0u32, 119u32), (5, 60), (33, 7), (90, 91)] {
            let a = astar.run(NodeIdx(s), NodeIdx(t));
            let d = dijkstra.run(NodeIdx(s), NodeIdx(t));
            assert_eq!(a.termination, d.termination);
            if let (Ok(ra), Ok(rd)) = (a.route(), d.route()) {
                assert!((ra.total_cost - rd.total_cost).abs() < 1e-6);
                // The heuristic should never make the search do more work.
                assert!(a.stats.expanded <= d.stats.expanded);
            }
        }
    }

    /// Step a search by hand and check, between every step, that the open
    /// list holds exactly the OPEN nodes, once each, and that its minimum is
    /// the lowest `f` among them.
    #[test]
    fn open_list_invariant_holds_during_search() {
        let g = random_graph(7, 80, 400);
        let engine = AStar::new(&g, GreatCircle);
        let mut search = engine.begin(NodeIdx(0), NodeIdx(79));
        loop {
            let open = search.open_list();
            open.assert_consistent();

            let mut min_f = f64::INFINITY;
            for (n, s) in search.status().iter() {
                let is_open = s.membership == Membership::Open;
                assert_eq!(open.contains(n), is_open, "{n}: status/open-list mismatch");
                if is_open {
                    assert_eq!(open.priority(n), Some(s.f));
                    min_f = min_f.min(s.f);
                }
            }
            if let Some((_, f)) = open.peek_min() {
                assert_eq!(f, min_f);
            }

            if search.step().is_some() {
                break;
            }
        }
    }

    #[test]
    fn g_values_only_decrease() {
        let g = random_graph(11, 50, 250);
        let engine = AStar::new(&g, Planar);
        let mut search = engine.begin(NodeIdx(3), NodeIdx(40));
        let mut last: Vec<f64> = vec![f64::INFINITY; g.node_count()];
        loop {
            for (n, s) in search.status().iter() {
                assert!(s.g <= last[n.index()], "{n}: g increased");
                last[n.index()] = s.g;
            }
            if search.step().is_some() {
                break;
            }
        }
    }
}

// ── Trace & routes ────────────────────────────────────────────────────────────

#[cfg(test)]
mod trace {
    use ra_core::{GeoPoint, NodeId};
    use ra_graph::RoadGraphBuilder;

    use crate::trace::write_trace;
    use crate::{AStar, GreatCircle, SearchError};

    #[test]
    fn trace_lists_target_to_start() {
        let mut b = RoadGraphBuilder::new();
        b.add_node(NodeId(11), Some("Origin"), GeoPoint::new(41.000, 2.0)).unwrap();
        b.add_node(NodeId(22), None, GeoPoint::new(41.001, 2.0)).unwrap();
        b.add_node(NodeId(33), Some("Goal"), GeoPoint::new(41.002, 2.0)).unwrap();
        b.add_way(&[NodeId(11), NodeId(22), NodeId(33)], false);
        let g = b.build().unwrap();

        let run = AStar::new(&g, GreatCircle).run(g.lookup(NodeId(11)).unwrap(), g.lookup(NodeId(33)).unwrap());
        let mut out = Vec::new();
        write_trace(&mut out, &g, &run).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Node id:         33 | Distance:     222."), "{}", lines[0]);
        assert!(lines[0].ends_with("| Name: Goal"));
        assert!(lines[1].ends_with("| Name: "));
        assert_eq!(lines[2], "Node id:         11 | Distance:       0.00 | Name: Origin");
    }

    #[test]
    fn trace_of_failed_search_is_an_error() {
        let mut b = RoadGraphBuilder::new();
        b.add_node(NodeId(1), None, GeoPoint::new(0.0, 0.0)).unwrap();
        b.add_node(NodeId(2), None, GeoPoint::new(0.0, 1.0)).unwrap();
        let g = b.build().unwrap();
        let run = AStar::new(&g, GreatCircle).run(g.lookup(NodeId(1)).unwrap(), g.lookup(NodeId(2)).unwrap());
        let mut out = Vec::new();
        assert!(matches!(write_trace(&mut out, &g, &run), Err(SearchError::NoPathFound { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn route_ids() {
        let g = super::helpers::grid(3);
        let route = crate::find_route(&g, GreatCircle, NodeId(1), NodeId(3)).unwrap();
        assert_eq!(route.ids(&g), vec![NodeId(1), NodeId(2), NodeId(3)]);
    }
}

// ── Cost models ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use crate::{CostModel, CostModelKind, Dijkstra, GreatCircle, Planar};

    #[test]
    fn kind_parses_and_displays() {
        assert_eq!("great-circle".parse::<CostModelKind>(), Ok(CostModelKind::GreatCircle));
        assert_eq!("Haversine".parse::<CostModelKind>(), Ok(CostModelKind::GreatCircle));
        assert_eq!("planar".parse::<CostModelKind>(), Ok(CostModelKind::Planar));
        assert!("manhattan".parse::<CostModelKind>().is_err());
        assert_eq!(CostModelKind::Planar.to_string(), "planar");
        assert_eq!(CostModelKind::default(), CostModelKind::GreatCircle);
    }

    #[test]
    fn kind_delegates_to_models() {
        let g = super::helpers::grid(2);
        let (a, b) = (super::helpers::idx(&g, 1), super::helpers::idx(&g, 4));
        assert_eq!(CostModelKind::GreatCircle.edge_cost(&g, a, b), GreatCircle.edge_cost(&g, a, b));
        assert_eq!(CostModelKind::Planar.edge_cost(&g, a, b), Planar.edge_cost(&g, a, b));
        assert_eq!(CostModelKind::Planar.heuristic(&g, a, b), GreatCircle.heuristic(&g, a, b));
    }

    #[test]
    fn dijkstra_has_zero_heuristic() {
        let g = super::helpers::grid(2);
        let (a, b) = (super::helpers::idx(&g, 1), super::helpers::idx(&g, 4));
        assert_eq!(Dijkstra(GreatCircle).heuristic(&g, a, b), 0.0);
        assert_eq!(Dijkstra(GreatCircle).edge_cost(&g, a, b), GreatCircle.edge_cost(&g, a, b));
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod batch {
    use ra_core::NodeIdx;

    use crate::batch::route_many;
    use crate::{AStar, GreatCircle};

    #[test]
    fn parallel_results_match_sequential() {
        let g = super::helpers::random_graph(3, 100, 500);
        let engine = AStar::new(&g, GreatCircle);
        let pairs: Vec<(NodeIdx, NodeIdx)> =
            (0..40u32).map(|i| (NodeIdx(i), NodeIdx(99 - i))).collect();

        let parallel = route_many(&engine, &pairs);
        assert_eq!(parallel.len(), pairs.len());
        for (&(s, t), result) in pairs.iter().zip(&parallel) {
            let sequential = engine.run(s, t).route();
            match (result, sequential) {
                (Ok(a), Ok(b)) => assert_eq!(a, &b),
                (Err(_), Err(_)) => {}
                (a, b) => panic!("{s}→{t}: parallel {a:?} vs sequential {b:?}"),
            }
        }
    }
}
