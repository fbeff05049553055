use std::{cmp::Ordering, collections::BinaryHeap};

use crate::graph::{DirectedWeightedGraph, EdgeId, VertexId, Weight};

#[derive(Clone, Debug, PartialEq)]
pub struct RouteInfo<W> {
    pub weight: W,
    /// Edges in traversal order.
    pub edges: Vec<EdgeId>,
}

#[derive(Clone, Copy, Debug)]
struct State<W> {
    cost: W,
    vertex: VertexId,
}

// Flipped on cost so that `BinaryHeap` pops the cheapest state first. Equal
// costs pop the lower vertex id first.
impl<W: Weight> Ord for State<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<W: Weight> PartialOrd for State<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> PartialEq for State<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for State<W> {}

/// Point-to-point shortest paths with Dijkstra's algorithm.
///
/// The router owns its graph and never mutates it; every query allocates its
/// own distance and predecessor tables, so one router can serve concurrent
/// queries.
#[derive(Clone, Debug)]
pub struct Router<W> {
    graph: DirectedWeightedGraph<W>,
}

impl<W: Weight> Router<W> {
    pub fn new(graph: DirectedWeightedGraph<W>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<W> {
        &self.graph
    }

    /// Cheapest path from `from` to `to`, or `None` if `to` is unreachable or
    /// either vertex is out of range.
    ///
    /// Among equally cheap paths the one discovered first wins: a vertex only
    /// changes predecessor on a strictly cheaper arrival.
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Option<RouteInfo<W>> {
        let vertex_count = self.graph.vertex_count();
        if from >= vertex_count || to >= vertex_count {
            return None;
        }

        let mut best: Vec<Option<W>> = vec![None; vertex_count];
        let mut prev_edge: Vec<Option<EdgeId>> = vec![None; vertex_count];
        let mut heap = BinaryHeap::new();

        best[from] = Some(W::default());
        heap.push(State {
            cost: W::default(),
            vertex: from,
        });

        while let Some(State { cost, vertex }) = heap.pop() {
            if vertex == to {
                break;
            }

            // stale entry, a cheaper one was already expanded
            if best[vertex].is_some_and(|b| cost.total_cmp(&b) == Ordering::Greater) {
                continue;
            }

            for edge_id in self.graph.incident_edges(vertex) {
                let edge = self.graph.edge(edge_id);
                let next = cost + edge.weight;

                let improves = match best[edge.to] {
                    Some(current) => next.total_cmp(&current) == Ordering::Less,
                    None => true,
                };
                if improves {
                    best[edge.to] = Some(next);
                    prev_edge[edge.to] = Some(edge_id);
                    heap.push(State {
                        cost: next,
                        vertex: edge.to,
                    });
                }
            }
        }

        let weight = best[to]?;

        let mut edges = Vec::new();
        let mut vertex = to;
        while let Some(edge_id) = prev_edge[vertex] {
            edges.push(edge_id);
            vertex = self.graph.edge(edge_id).from;
        }
        edges.reverse();

        Some(RouteInfo { weight, edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn graph(vertex_count: usize, edges: &[(VertexId, VertexId, u32)]) -> DirectedWeightedGraph<u32> {
        let mut graph = DirectedWeightedGraph::new(vertex_count);
        for &(from, to, weight) in edges {
            graph.add_edge(Edge { from, to, weight });
        }
        graph
    }

    #[test]
    fn same_vertex_is_free() {
        let router = Router::new(graph(2, &[(0, 1, 5)]));
        assert_eq!(
            router.build_route(0, 0),
            Some(RouteInfo {
                weight: 0,
                edges: vec![]
            })
        );
    }

    #[test]
    fn picks_cheaper_of_two_paths() {
        // 0 -> 1 -> 3 costs 2, 0 -> 2 -> 3 costs 7, 0 -> 3 costs 10
        let router = Router::new(graph(
            4,
            &[(0, 3, 10), (0, 2, 3), (2, 3, 4), (0, 1, 1), (1, 3, 1)],
        ));

        let route = router.build_route(0, 3).unwrap();
        assert_eq!(route.weight, 2);
        assert_eq!(route.edges, [3, 4]);
    }

    #[test]
    fn unreachable_vertex() {
        let router = Router::new(graph(3, &[(0, 1, 1), (2, 1, 1)]));
        assert_eq!(router.build_route(0, 2), None);
        assert_eq!(router.build_route(1, 0), None);
    }

    #[test]
    fn out_of_range_vertex() {
        let router = Router::new(graph(2, &[(0, 1, 1)]));
        assert_eq!(router.build_route(0, 7), None);
        assert_eq!(router.build_route(7, 0), None);
    }

    #[test]
    fn ties_keep_first_discovered_path() {
        // Both 0 -> 1 -> 3 and 0 -> 2 -> 3 cost 2; edge 0 -> 1 is listed first.
        let router = Router::new(graph(4, &[(0, 1, 1), (0, 2, 1), (2, 3, 1), (1, 3, 1)]));

        for _ in 0..10 {
            let route = router.build_route(0, 3).unwrap();
            assert_eq!(route.weight, 2);
            assert_eq!(route.edges, [0, 3]);
        }
    }

    #[test]
    fn parallel_edges_use_cheapest() {
        let router = Router::new(graph(2, &[(0, 1, 9), (0, 1, 4), (0, 1, 6)]));
        let route = router.build_route(0, 1).unwrap();
        assert_eq!(route.weight, 4);
        assert_eq!(route.edges, [1]);
    }

    #[test]
    fn zero_weight_cycles_terminate() {
        let router = Router::new(graph(3, &[(0, 1, 0), (1, 0, 0), (1, 2, 3)]));
        let route = router.build_route(0, 2).unwrap();
        assert_eq!(route.weight, 3);
        assert_eq!(route.edges, [0, 2]);
    }

    #[test]
    fn float_weights() {
        let mut g = DirectedWeightedGraph::new(3);
        g.add_edge(Edge { from: 0, to: 1, weight: 0.5 });
        g.add_edge(Edge { from: 1, to: 2, weight: 0.25 });
        g.add_edge(Edge { from: 0, to: 2, weight: 1.0 });

        let route = Router::new(g).build_route(0, 2).unwrap();
        assert_eq!(route.weight, 0.75);
        assert_eq!(route.edges, [0, 1]);
    }

    #[test]
    fn router_is_shareable_across_threads() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<Router<f64>>();

        let router = Router::new(graph(3, &[(0, 1, 2), (1, 2, 2)]));
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| router.build_route(0, 2).map(|r| r.weight)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), Some(4));
            }
        });
    }
}
