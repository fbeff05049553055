//! Directed weighted graph and shortest-path search over it.

use std::{cmp::Ordering, fmt::Debug, ops::Add};

mod router;

pub use router::{RouteInfo, Router};

pub type VertexId = usize;
pub type EdgeId = usize;

/// Edge weights: non-negative, summable and totally ordered.
///
/// `Default` must be the additive zero.
pub trait Weight: Copy + Add<Output = Self> + Default + Debug {
    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl Weight for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_integer_weight!(u32, u64, usize, i32, i64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

#[derive(Clone, Debug)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence_lists: Vec<Vec<EdgeId>>,
}

impl<W: Weight> DirectedWeightedGraph<W> {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence_lists: vec![Vec::new(); vertex_count],
        }
    }

    /// Adds an edge and returns its id. Ids are assigned sequentially from 0.
    ///
    /// Panics if either endpoint is not a vertex of this graph.
    pub fn add_edge(&mut self, edge: Edge<W>) -> EdgeId {
        assert!(
            edge.from < self.vertex_count() && edge.to < self.vertex_count(),
            "edge {edge:?} leaves a graph of {} vertices",
            self.vertex_count()
        );
        debug_assert!(
            edge.weight.total_cmp(&W::default()) != Ordering::Less,
            "negative weight on {edge:?}"
        );

        let id = self.edges.len();
        self.edges.push(edge);
        self.incidence_lists[edge.from].push(id);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence_lists.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<W> {
        &self.edges[id]
    }

    /// Outgoing edges of `vertex`, in insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incidence_lists[vertex].iter().copied()
    }
}
