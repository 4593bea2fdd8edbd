use unfold_zdd_core::BitMask;

use crate::spec::{Transition, ZddSpec};

/// The ZDD specification keeping only spanning trees overlapping a
/// single MOPE: at least one of the MOPE's edges must be selected.
/// Chaining this per MOPE with repeated `subset` + `reduce` computes
/// "some MOPE's edges are a subset of the tree" across the whole list.
///
/// The state tracks "the MOPE edges whose fate has not yet been fixed to
/// being selected": a bit is cleared the moment its edge is refused, and
/// the whole mask is cleared the moment any MOPE edge is taken (after
/// which the filter can never prune again on this path).
pub struct UnfoldingFilter<B> {
    edge_count: usize,
    mope: B,
}

impl<B: BitMask> UnfoldingFilter<B> {
    /// Build the filter for MOPE edge set `mope_edges` over `edge_count`
    /// total edges.
    #[must_use]
    pub fn new(edge_count: usize, mope_edges: &[usize]) -> Self {
        let mut mope = B::zero();
        for &i in mope_edges {
            mope.or_assign(&B::bit(i));
        }
        Self { edge_count, mope }
    }
}

impl<B: BitMask> ZddSpec for UnfoldingFilter<B> {
    type State = B;

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn root(&self) -> (B, usize) {
        (self.mope, self.edge_count)
    }

    fn child(&self, state: &B, level: usize, value: bool) -> Transition<B> {
        let i = self.edge_count - level;
        let mut state = *state;

        if value {
            let bit_i = B::bit(i);
            if !state.and(&bit_i).is_zero() {
                state = B::zero();
            }
        } else if !state.is_zero() {
            state.and_assign(&B::bit(i).not());
            if state.is_zero() {
                return Transition::Prune;
            }
        }

        if level == 1 {
            Transition::Accept
        } else {
            Transition::Continue(state, level - 1)
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use crate::spanning_tree::SpanningTree;
    use crate::subset::subset;
    use unfold_zdd_core::Mask64;
    use unfold_zdd_graph::{FrontierManager, Graph};

    #[test]
    fn keeps_only_spanning_trees_overlapping_the_mope() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let t = build(&spec);
        assert_eq!(t.cardinality().as_str(), "3");

        // MOPE = {edge 0}. Of the triangle's 3 spanning trees ({0,1},
        // {0,2}, {1,2}), exactly the 2 that select edge 0 overlap the
        // MOPE; {1,2} omits it and is pruned.
        let filter = UnfoldingFilter::<Mask64>::new(3, &[0]);
        let filtered = subset(&t, &filter).reduce();
        assert_eq!(filtered.cardinality().as_str(), "2");
    }
}
