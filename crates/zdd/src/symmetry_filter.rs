use unfold_zdd_core::BitMask;

use crate::spec::{Transition, ZddSpec};

/// The per-edge orbit bookkeeping a [`SymmetryFilter`] is built from: one
/// entry per edge, `None` for a fixed point of the permutation and
/// `Some(orbit_index)` otherwise, plus whether that edge is its orbit's
/// representative (the minimum-indexed member).
#[derive(Debug, Clone)]
struct OrbitInfo {
    orbit_index: Option<usize>,
    is_representative: bool,
}

fn compute_orbits(sigma: &[usize]) -> Vec<OrbitInfo> {
    let e = sigma.len();
    let mut info = vec![
        OrbitInfo {
            orbit_index: None,
            is_representative: false,
        };
        e
    ];
    let mut visited = vec![false; e];
    let mut next_orbit = 0usize;

    for start in 0..e {
        if visited[start] {
            continue;
        }
        let mut members = Vec::new();
        let mut cur = start;
        loop {
            if visited[cur] {
                break;
            }
            visited[cur] = true;
            members.push(cur);
            cur = sigma[cur];
        }
        if members.len() > 1 {
            let representative = *members.iter().min().expect("non-empty cycle");
            for &m in &members {
                info[m].orbit_index = Some(next_orbit);
                info[m].is_representative = m == representative;
            }
            next_orbit += 1;
        }
    }
    info
}

/// The ZDD specification restricting a tree to the fixed points of an
/// automorphism σ: a path survives iff every non-trivial orbit of σ is
/// either taken wholly or refused wholly.
///
/// Each non-trivial orbit gets one state bit, set the moment its
/// representative edge (the orbit's minimum index, always visited first
/// since edges are processed in increasing order) is selected. Every
/// subsequent orbit member must then agree with that commitment or the
/// path is pruned.
pub struct SymmetryFilter<B> {
    edge_count: usize,
    orbits: Vec<OrbitInfo>,
    _marker: core::marker::PhantomData<B>,
}

impl<B: BitMask> SymmetryFilter<B> {
    /// Build the filter for automorphism `sigma` (an edge permutation of
    /// length `edge_count`).
    #[must_use]
    pub fn new(edge_count: usize, sigma: &[usize]) -> Self {
        debug_assert_eq!(sigma.len(), edge_count);
        Self {
            edge_count,
            orbits: compute_orbits(sigma),
            _marker: core::marker::PhantomData,
        }
    }
}

impl<B: BitMask> ZddSpec for SymmetryFilter<B> {
    type State = B;

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn root(&self) -> (B, usize) {
        (B::zero(), self.edge_count)
    }

    fn child(&self, state: &B, level: usize, value: bool) -> Transition<B> {
        let i = self.edge_count - level;
        let mut state = *state;

        if let Some(o) = self.orbits[i].orbit_index {
            let bit_o = B::bit(o);
            if self.orbits[i].is_representative {
                if value {
                    state.or_assign(&bit_o);
                }
            } else {
                let included = !state.and(&bit_o).is_zero();
                if included && !value {
                    return Transition::Prune;
                }
                if !included && value {
                    return Transition::Prune;
                }
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
    fn orbits_group_a_three_cycle_and_leave_fixed_points_alone() {
        // sigma: 0->1->2->0, edge 3 fixed.
        let orbits = compute_orbits(&[1, 2, 0, 3]);
        assert_eq!(orbits[0].orbit_index, Some(0));
        assert_eq!(orbits[1].orbit_index, Some(0));
        assert_eq!(orbits[2].orbit_index, Some(0));
        assert!(orbits[0].is_representative);
        assert!(!orbits[1].is_representative);
        assert!(!orbits[2].is_representative);
        assert_eq!(orbits[3].orbit_index, None);
    }

    #[test]
    fn identity_permutation_fixes_every_edge() {
        let orbits = compute_orbits(&[0, 1, 2]);
        assert!(orbits.iter().all(|o| o.orbit_index.is_none()));
    }

    #[test]
    fn identity_symmetry_filter_changes_nothing() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let t = build(&spec);
        let filter = SymmetryFilter::<Mask64>::new(3, &[0, 1, 2]);
        let filtered = subset(&t, &filter).reduce();
        assert_eq!(filtered.cardinality().as_str(), "3");
    }

    #[test]
    fn rotating_the_triangle_edges_keeps_only_symmetric_trees() {
        // The rotation (0 1 2) fixes a spanning tree only if selecting
        // edge 0 implies selecting edges 1 and 2 too, and vice versa,
        // but a 2-edge spanning tree can never select all three, nor
        // none, so every triangle spanning tree is broken by this
        // non-trivial rotation.
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let spec = SpanningTree::new(&g, &fm);
        let t = build(&spec);
        let filter = SymmetryFilter::<Mask64>::new(3, &[1, 2, 0]);
        let filtered = subset(&t, &filter).reduce();
        assert_eq!(filtered.cardinality().as_str(), "0");
    }
}
