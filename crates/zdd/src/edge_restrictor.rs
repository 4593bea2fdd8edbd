use crate::spec::{Transition, ZddSpec};

/// A trivial specification accepting only paths whose first `k` edges
/// match the bit pattern `p`, used by the memory-partitioned driver to
/// split a build into `2^k` disjoint sub-problems.
///
/// Combined with `SpanningTree` through [`crate::spec::ProductSpec`] and
/// `build`, each of the `2^k` partitions carries roughly `1/2^k` of the
/// full diagram's peak memory.
pub struct EdgeRestrictor {
    edge_count: usize,
    split_depth: usize,
    pattern: u64,
}

impl EdgeRestrictor {
    /// Restrict to paths whose edges `0..split_depth` equal `pattern`'s
    /// low `split_depth` bits (edge `i`'s required value is bit `i` of
    /// `pattern`).
    #[must_use]
    pub fn new(edge_count: usize, split_depth: usize, pattern: u64) -> Self {
        debug_assert!(split_depth <= edge_count);
        debug_assert!(split_depth <= 64);
        Self {
            edge_count,
            split_depth,
            pattern,
        }
    }
}

impl ZddSpec for EdgeRestrictor {
    type State = ();

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn root(&self) -> ((), usize) {
        ((), self.edge_count)
    }

    fn child(&self, _state: &(), level: usize, value: bool) -> Transition<()> {
        let i = self.edge_count - level;
        if i < self.split_depth {
            let required = (self.pattern >> i) & 1 == 1;
            if value != required {
                return Transition::Prune;
            }
        }
        if level == 1 {
            Transition::Accept
        } else {
            Transition::Continue((), level - 1)
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use crate::spanning_tree::SpanningTree;
    use crate::spec::ProductSpec;
    use unfold_zdd_graph::{FrontierManager, Graph};

    #[test]
    fn partitions_sum_to_the_unpartitioned_count() {
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
        let e = fm.edge_count();

        let mut total = 0u64;
        for p in 0..4u64 {
            let combined = ProductSpec::new(
                SpanningTree::new(&g, &fm),
                EdgeRestrictor::new(e, 2, p),
            );
            let z = build(&combined);
            total += z.cardinality().as_str().parse::<u64>().unwrap();
        }
        assert_eq!(total, 16); // Cayley's formula for K4: 4^2.
    }
}
