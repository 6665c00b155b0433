use std::collections::VecDeque;

use common::types::Distance;
use proptest::prelude::*;
use route_core::{
    CycleDetector, DfsCycleDetector, GraphBuilder, GraphCSR, LinearScanDijkstra,
    ShortestPathSolver,
};

fn small_graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (1usize..7).prop_flat_map(|num_nodes| {
        let edge_generator = (0usize..num_nodes, 0usize..num_nodes, 0u32..20);
        (Just(num_nodes), prop::collection::vec(edge_generator, 0..14))
    })
}

fn build(num_nodes: usize, edges: &[(usize, usize, u32)]) -> GraphCSR {
    let mut builder = GraphBuilder::new();
    for i in 0..num_nodes {
        builder.add_vertex(&format!("V{i}")).unwrap();
    }
    for &(u, v, w) in edges {
        builder.add_edge(&format!("V{u}"), &format!("V{v}"), w).unwrap();
    }
    builder.build()
}

/// Minimum path sum to every vertex by enumerating all simple paths from `start`.
fn brute_force_distances(graph: &GraphCSR, start: usize) -> Vec<Option<Distance>> {
    fn walk(
        graph: &GraphCSR,
        vertex: usize,
        sum: Distance,
        on_path: &mut Vec<bool>,
        best: &mut Vec<Option<Distance>>,
    ) {
        if best[vertex].is_none_or(|b| sum < b) {
            best[vertex] = Some(sum);
        }
        on_path[vertex] = true;
        for adjacent in graph.adjacent_vertices(vertex).unwrap() {
            if !on_path[adjacent.vertex] {
                let next = sum + Distance::from(adjacent.weight);
                walk(graph, adjacent.vertex, next, on_path, best);
            }
        }
        on_path[vertex] = false;
    }

    let n = graph.vertex_count();
    let mut best = vec![None; n];
    walk(graph, start, 0, &mut vec![false; n], &mut best);
    best
}

/// Kahn's algorithm: the graph is acyclic iff every vertex can be removed.
fn has_cycle_reference(graph: &GraphCSR) -> bool {
    let n = graph.vertex_count();
    let mut in_degree = vec![0usize; n];
    for (_, v, _) in graph.edges() {
        in_degree[v] += 1;
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut removed = 0;
    while let Some(u) = queue.pop_front() {
        removed += 1;
        for v in graph.adjacent_vertices(u).unwrap().vertices() {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    removed < n
}

proptest! {
    /// Property: settled distances equal the true minimum path sums
    #[test]
    fn distances_match_brute_force((num_nodes, edges) in small_graph_strategy(), start_seed in 0usize..7) {
        let graph = build(num_nodes, &edges);
        let start = start_seed % num_nodes;

        let tree = LinearScanDijkstra.solve(&graph, start).unwrap();
        let expected = brute_force_distances(&graph, start);

        for v in 0..num_nodes {
            prop_assert_eq!(tree.distance(v), expected[v]);
        }
    }

    /// Property: settlement order is non-decreasing in distance and each vertex settles once
    #[test]
    fn settlement_order_is_monotonic((num_nodes, edges) in small_graph_strategy(), start_seed in 0usize..7) {
        let graph = build(num_nodes, &edges);
        let start = start_seed % num_nodes;

        let settlements: Vec<_> = LinearScanDijkstra.settlements(&graph, start).unwrap().collect();
        prop_assert_eq!(settlements[0].vertex, start);
        prop_assert_eq!(settlements[0].distance, 0);
        prop_assert!(settlements.windows(2).all(|w| w[0].distance <= w[1].distance));

        let mut seen = vec![false; num_nodes];
        for s in &settlements {
            prop_assert!(!seen[s.vertex]);
            seen[s.vertex] = true;
        }
    }

    /// Property: each predecessor edge is tight and was settled earlier
    #[test]
    fn predecessors_are_tight((num_nodes, edges) in small_graph_strategy(), start_seed in 0usize..7) {
        let graph = build(num_nodes, &edges);
        let start = start_seed % num_nodes;
        let tree = LinearScanDijkstra.solve(&graph, start).unwrap();

        for &v in tree.settled_order() {
            match tree.predecessor(v) {
                None => prop_assert_eq!(v, start),
                Some(p) => {
                    let w = Distance::from(graph.weight(p, v).unwrap());
                    prop_assert_eq!(tree.distance(p).unwrap() + w, tree.distance(v).unwrap());
                }
            }
            let path = tree.path_to(v).unwrap();
            prop_assert_eq!(path.first().copied(), Some(start));
            prop_assert_eq!(path.last().copied(), Some(v));
        }
    }

    /// Property: re-running on the same graph yields the same settlements
    #[test]
    fn rerun_is_idempotent((num_nodes, edges) in small_graph_strategy(), start_seed in 0usize..7) {
        let graph = build(num_nodes, &edges);
        let start = start_seed % num_nodes;

        let first: Vec<_> = LinearScanDijkstra.settlements(&graph, start).unwrap().collect();
        let second: Vec<_> = LinearScanDijkstra.settlements(&graph, start).unwrap().collect();
        prop_assert_eq!(first, second);
    }

    /// Property: the DFS verdict agrees with a topological-sort reference
    #[test]
    fn cycle_verdict_matches_reference((num_nodes, edges) in small_graph_strategy()) {
        let graph = build(num_nodes, &edges);

        prop_assert_eq!(DfsCycleDetector.has_cycle(&graph), has_cycle_reference(&graph));
    }

    /// Property: a reported cycle is made of real edges, including the closing one
    #[test]
    fn reported_cycle_is_closed((num_nodes, edges) in small_graph_strategy()) {
        let graph = build(num_nodes, &edges);

        if let Some(cycle) = DfsCycleDetector.find_cycle(&graph) {
            for pair in cycle.vertices.windows(2) {
                prop_assert!(graph.weight(pair[0], pair[1]).is_ok());
            }
            let (from, to) = cycle.closing_edge().unwrap();
            prop_assert!(graph.weight(from, to).is_ok());
        }
    }
}
