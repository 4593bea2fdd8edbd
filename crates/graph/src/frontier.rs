use crate::graph::Graph;

/// Precomputed frontier bookkeeping for one [`Graph`]'s fixed edge order.
///
/// A vertex "enters" the frontier at its minimum-indexed incident edge and
/// "leaves" just after its maximum-indexed incident edge. `frontier(step)`
/// is every vertex whose incidence range straddles `step`. Because each
/// vertex enters exactly once and leaves exactly once, it occupies exactly
/// one `FrontierData` slot for its whole time on the frontier; slots are
/// handed out and freed through a simple free-list so that concurrently
/// live vertices never collide, and the peak number of slots in flight is
/// `max_frontier_size`.
#[derive(Debug, Clone)]
pub struct FrontierManager {
    /// `enter[step]`: vertices entering the frontier at edge `step`, sorted.
    enter: Vec<Vec<u32>>,
    /// `leave[step]`: vertices leaving the frontier after edge `step`,
    /// sorted ascending by vertex id (the input format carries no other
    /// order for retirement; see DESIGN.md).
    leave: Vec<Vec<u32>>,
    /// `frontier[step]`: every vertex on the frontier while edge `step` is
    /// being processed (`first_edge(v) <= step <= last_edge(v)`), sorted.
    frontier: Vec<Vec<u32>>,
    /// The frontier slot assigned to each vertex for its whole time on the
    /// frontier.
    slot_of: Vec<usize>,
    /// The high-water mark of concurrently occupied slots.
    max_frontier_size: usize,
}

impl FrontierManager {
    /// Precompute the frontier for `graph`'s fixed edge order.
    #[must_use]
    pub fn build(graph: &Graph) -> Self {
        let edge_count = graph.edge_count();
        let vertex_count = graph.vertex_count();

        let mut first_edge = vec![usize::MAX; vertex_count];
        let mut last_edge = vec![0usize; vertex_count];
        for i in 0..edge_count {
            let (u, v) = graph.endpoints(i);
            for v in [u as usize, v as usize] {
                first_edge[v] = first_edge[v].min(i);
                last_edge[v] = last_edge[v].max(i);
            }
        }

        let mut enter = vec![Vec::new(); edge_count];
        let mut leave = vec![Vec::new(); edge_count];
        for v in 0..vertex_count {
            if first_edge[v] != usize::MAX {
                enter[first_edge[v]].push(v as u32);
                leave[last_edge[v]].push(v as u32);
            }
        }
        for step in 0..edge_count {
            enter[step].sort_unstable();
            leave[step].sort_unstable();
        }

        let mut slot_of = vec![0usize; vertex_count];
        let mut free_slots: Vec<usize> = Vec::new();
        let mut next_slot = 0usize;
        let mut frontier = vec![Vec::new(); edge_count];
        let mut active: Vec<u32> = Vec::new();
        let mut max_frontier_size = 0usize;

        for step in 0..edge_count {
            for &v in &enter[step] {
                let slot = free_slots.pop().unwrap_or_else(|| {
                    let slot = next_slot;
                    next_slot += 1;
                    slot
                });
                slot_of[v as usize] = slot;
                active.push(v);
            }
            active.sort_unstable();
            max_frontier_size = max_frontier_size.max(next_slot - free_slots.len());
            frontier[step] = active.clone();

            for &v in &leave[step] {
                free_slots.push(slot_of[v as usize]);
                active.retain(|&w| w != v);
            }
        }

        Self {
            enter,
            leave,
            frontier,
            slot_of,
            max_frontier_size,
        }
    }

    /// Vertices entering the frontier at edge `step`, ascending.
    #[must_use]
    pub fn enter(&self, step: usize) -> &[u32] {
        &self.enter[step]
    }

    /// Vertices leaving the frontier after edge `step`, ascending.
    #[must_use]
    pub fn leave(&self, step: usize) -> &[u32] {
        &self.leave[step]
    }

    /// Every vertex on the frontier while edge `step` is processed,
    /// ascending by vertex id.
    #[must_use]
    pub fn frontier(&self, step: usize) -> &[u32] {
        &self.frontier[step]
    }

    /// The slot assigned to `vertex` for its whole time on the frontier.
    #[must_use]
    pub fn slot(&self, vertex: u32) -> usize {
        self.slot_of[vertex as usize]
    }

    /// The peak number of vertices simultaneously on the frontier; this is
    /// the size of the `FrontierData` array the `SpanningTree` specification
    /// carries as its ZDD state.
    #[must_use]
    pub fn max_frontier_size(&self) -> usize {
        self.max_frontier_size
    }

    /// The number of edge steps, `E`.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.enter.len()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_graph_frontier_never_exceeds_two() {
        // 0 -- 1 -- 2 -- 3, edges (0,1) (1,2) (2,3)
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let fm = FrontierManager::build(&g);
        assert_eq!(fm.max_frontier_size(), 2);
        assert_eq!(fm.enter(0), &[0, 1]);
        assert_eq!(fm.leave(0), &[0]);
        assert_eq!(fm.frontier(0), &[0, 1]);
        assert_eq!(fm.enter(1), &[2]);
        assert_eq!(fm.leave(1), &[1]);
        assert_eq!(fm.frontier(1), &[1, 2]);
        assert_eq!(fm.enter(2), &[3]);
        assert_eq!(fm.leave(2), &[2, 3]);
    }

    #[test]
    fn triangle_frontier_holds_all_three_vertices_at_peak() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        // edge 0: (0,1) both enter -> frontier {0,1}
        // edge 1: (1,2) 2 enters -> frontier {0,1,2}, nothing has left yet
        // edge 2: (0,2) both retire after
        assert_eq!(fm.frontier(1), &[0, 1, 2]);
        assert_eq!(fm.max_frontier_size(), 3);
    }

    #[test]
    fn slots_are_reused_after_retirement() {
        // Two disjoint edges sharing no vertices: (0,1), (2,3).
        // Vertex 0 and 1 both retire at step 0, so step 1's entrants can
        // reuse their slots: max frontier size stays at 2.
        let g = Graph::from_edges(vec![(0, 1), (2, 3)]).unwrap();
        let fm = FrontierManager::build(&g);
        assert_eq!(fm.max_frontier_size(), 2);
        // Only two slots ever get handed out across the whole graph.
        assert!(fm.slot(2) < 2 && fm.slot(3) < 2);
    }
}
