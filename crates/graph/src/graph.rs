use error_stack::{Report, ResultExt};

use crate::error::GraphError;

/// The 1-skeleton Γ of a polyhedron: an ordered, undirected multigraph.
///
/// Edge order is input-defined and fixed for the lifetime of the graph — it
/// *is* the ZDD variable order (edge `k` sits at ZDD level `E - k`, root at
/// level `E`, terminals at level `0`). Parallel edges are permitted; they
/// are distinguished purely by index, never collapsed.
#[derive(Debug, Clone)]
pub struct Graph {
    /// `edges[k] == (u, v)`, the endpoints of edge `k`.
    edges: Vec<(u32, u32)>,
    /// `1 + max` vertex identifier appearing in `edges`.
    vertex_count: usize,
}

impl Graph {
    /// Build a graph from an ordered edge list.
    ///
    /// `V` is derived as `1 + max(endpoint)`; every vertex below that bound
    /// is part of the graph even if some never appear in an edge pair count
    /// (an isolated vertex would simply make every spanning-tree count
    /// zero, which is a correct, if uninteresting, answer).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyEdgeList`] when `edges` is empty.
    pub fn from_edges(edges: Vec<(u32, u32)>) -> Result<Self, Report<GraphError>> {
        if edges.is_empty() {
            return Err(Report::new(GraphError::EmptyEdgeList))
                .attach_printable("a graph file must list at least one edge");
        }

        let vertex_count = edges
            .iter()
            .flat_map(|&(u, v)| [u, v])
            .max()
            .map_or(0, |max_id| max_id as usize + 1);

        Ok(Self {
            edges,
            vertex_count,
        })
    }

    /// The number of edges `E`.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The number of vertices `V`.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The endpoints `(u, v)` of edge `index`, in input order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.edge_count()`.
    #[must_use]
    pub fn endpoints(&self, index: usize) -> (u32, u32) {
        self.edges[index]
    }
}
