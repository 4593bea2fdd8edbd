use unfold_zdd_graph::{FrontierManager, Graph};

use crate::spec::{Transition, ZddSpec};

const UNINITIALIZED: i64 = -2;
const RETIRED: i64 = -1;

/// The recursive ZDD specification of Γ's spanning trees.
///
/// State is a `FrontierData` array: one slot per currently
/// on-frontier vertex, holding that vertex's component representative
/// under a Borůvka-style union-find pass over the selected edges seen so
/// far. A vertex's slot is reused by whichever vertex next enters the
/// frontier after it, which is exactly what [`FrontierManager`] already
/// tracks.
pub struct SpanningTree<'a> {
    graph: &'a Graph,
    frontier: &'a FrontierManager,
}

impl<'a> SpanningTree<'a> {
    /// Build the specification over `graph`, using `frontier` (which must
    /// have been derived from the same `graph`) for slot bookkeeping.
    #[must_use]
    pub fn new(graph: &'a Graph, frontier: &'a FrontierManager) -> Self {
        Self { graph, frontier }
    }

    fn edge_index(&self, level: usize) -> usize {
        self.frontier.edge_count() - level
    }
}

impl ZddSpec for SpanningTree<'_> {
    type State = Vec<i64>;

    fn edge_count(&self) -> usize {
        self.frontier.edge_count()
    }

    fn root(&self) -> (Vec<i64>, usize) {
        (
            vec![UNINITIALIZED; self.frontier.max_frontier_size()],
            self.edge_count(),
        )
    }

    fn child(&self, state: &Vec<i64>, level: usize, value: bool) -> Transition<Vec<i64>> {
        let i = self.edge_index(level);
        let (a, b) = self.graph.endpoints(i);
        let mut comp = state.clone();

        for &x in self.frontier.enter(i) {
            comp[self.frontier.slot(x)] = i64::from(x);
        }

        if value {
            let slot_a = self.frontier.slot(a);
            let slot_b = self.frontier.slot(b);
            let ca = comp[slot_a];
            let cb = comp[slot_b];
            if ca == cb {
                return Transition::Prune;
            }
            let (c_min, c_max) = (ca.min(cb), ca.max(cb));
            for &w in self.frontier.frontier(i) {
                let slot_w = self.frontier.slot(w);
                if comp[slot_w] == c_min {
                    comp[slot_w] = c_max;
                }
            }
        }

        if level == 1 {
            let connected = comp[self.frontier.slot(a)] == comp[self.frontier.slot(b)];
            return if connected {
                Transition::Accept
            } else {
                Transition::Prune
            };
        }

        let on_frontier = self.frontier.frontier(i);
        for &x in self.frontier.leave(i) {
            let slot_x = self.frontier.slot(x);
            let cx = comp[slot_x];
            let has_witness = on_frontier.iter().any(|&w| {
                w != x && comp[self.frontier.slot(w)] == cx && comp[self.frontier.slot(w)] != RETIRED
            });
            if !has_witness {
                return Transition::Prune;
            }
            comp[slot_x] = RETIRED;
        }

        Transition::Continue(comp, level - 1)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;

    #[test]
    fn triangle_has_three_spanning_trees() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let z = build(&spec);
        assert_eq!(z.cardinality().as_str(), "3");
    }

    #[test]
    fn path_has_exactly_one_spanning_tree() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (2, 3)]).unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let z = build(&spec);
        assert_eq!(z.cardinality().as_str(), "1");
    }

    #[test]
    fn complete_graph_k4_has_sixteen_spanning_trees() {
        // Cayley's formula: n^(n-2) = 4^2 = 16.
        let g = Graph::from_edges(vec![
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 2),
            (1, 3),
            (2, 3),
        ])
        .unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let z = build(&spec);
        assert_eq!(z.cardinality().as_str(), "16");
    }

    #[test]
    fn disconnected_graph_has_no_spanning_trees() {
        // Two disjoint edges: (0,1) and (2,3) never connect all four
        // vertices with a single tree.
        let g = Graph::from_edges(vec![(0, 1), (2, 3)]).unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let z = build(&spec);
        assert_eq!(z.cardinality().as_str(), "0");
    }
}
