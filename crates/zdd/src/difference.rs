use hashbrown::HashMap;

use crate::node::{Edge, Node, Zdd};

/// The zero-suppressed decision diagram of paths accepted by `a` but not
/// by `b`, both built over the same variable order.
///
/// A direct recursive combine over both diagrams' arenas, structurally
/// analogous to [`crate::subset`] but against a second already-built
/// diagram instead of a [`crate::ZddSpec`]. This is how the overlap
/// filter's literal "at least one MOPE edge survives" diagram (§4.5) is
/// turned into its true complement, the genuinely non-overlapping
/// spanning-tree set the Result JSON's `non_overlapping_count` names and
/// the Burnside aggregator's "with filter" pass counts over.
#[must_use]
pub fn difference(a: &Zdd, b: &Zdd) -> Zdd {
    debug_assert_eq!(a.edge_count(), b.edge_count());

    let mut arena = Vec::new();
    let mut memo: HashMap<(Edge, Edge), Edge> = HashMap::new();
    let mut unique: HashMap<(usize, Edge, Edge), Edge> = HashMap::new();

    let level = a.level_of(a.root).max(b.level_of(b.root));
    let root = combine(a, a.root, b, b.root, level, &mut arena, &mut memo, &mut unique);
    Zdd::new(arena, root, a.edge_count())
}

fn combine(
    a: &Zdd,
    a_edge: Edge,
    b: &Zdd,
    b_edge: Edge,
    level: usize,
    arena: &mut Vec<Node>,
    memo: &mut HashMap<(Edge, Edge), Edge>,
    unique: &mut HashMap<(usize, Edge, Edge), Edge>,
) -> Edge {
    if level == 0 {
        return match (a_edge, b_edge) {
            (Edge::Terminal(false), _) => Edge::Terminal(false),
            (Edge::Terminal(true), Edge::Terminal(true)) => Edge::Terminal(false),
            (Edge::Terminal(true), Edge::Terminal(false)) => Edge::Terminal(true),
            (Edge::Node(_), _) | (_, Edge::Node(_)) => {
                unreachable!("both diagrams must reach a terminal once every level is exhausted")
            }
        };
    }

    let key = (a_edge, b_edge);
    if let Some(&edge) = memo.get(&key) {
        return edge;
    }

    let (a_lo, a_hi) = children_at(a, a_edge, level);
    let (b_lo, b_hi) = children_at(b, b_edge, level);

    let lo = combine(a, a_lo, b, b_lo, level - 1, arena, memo, unique);
    let hi = combine(a, a_hi, b, b_hi, level - 1, arena, memo, unique);

    let edge = if hi == Edge::Terminal(false) {
        lo
    } else if let Some(&existing) = unique.get(&(level, lo, hi)) {
        existing
    } else {
        let id = u32::try_from(arena.len()).expect("ZDD arena index overflowed u32");
        arena.push(Node { level, lo, hi });
        let new_edge = Edge::Node(id);
        unique.insert((level, lo, hi), new_edge);
        new_edge
    };

    memo.insert(key, edge);
    edge
}

/// The `(lo, hi)` children of `edge` as of `level`: if `edge` is an
/// interior node exactly at `level`, its real children; otherwise `edge`
/// was zero-suppressed past `level`, so the 0-branch stays on `edge` and
/// the 1-branch is unreachable (the 0-terminal).
fn children_at(t: &Zdd, edge: Edge, level: usize) -> (Edge, Edge) {
    match edge {
        Edge::Terminal(false) => (Edge::Terminal(false), Edge::Terminal(false)),
        Edge::Terminal(true) => (Edge::Terminal(true), Edge::Terminal(false)),
        Edge::Node(id) => {
            let node = t.arena[id as usize];
            if node.level == level {
                (node.lo, node.hi)
            } else {
                (edge, Edge::Terminal(false))
            }
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
    use crate::unfolding_filter::UnfoldingFilter;
    use unfold_zdd_core::Mask64;
    use unfold_zdd_graph::{FrontierManager, Graph};

    #[test]
    fn difference_with_itself_is_empty() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let t = build(&SpanningTree::new(&g, &fm));
        let d = difference(&t, &t.copy());
        assert_eq!(d.cardinality().as_str(), "0");
    }

    #[test]
    fn difference_with_empty_is_identity() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let t = build(&SpanningTree::new(&g, &fm));
        let empty = Zdd::new(Vec::new(), Edge::Terminal(false), t.edge_count());
        let d = difference(&t, &empty);
        assert_eq!(d.cardinality().as_str(), "3");
    }

    #[test]
    fn full_edge_mope_leaves_no_genuinely_non_overlapping_trees() {
        // Triangle, MOPE = {0, 1, 2}: the literal overlap filter accepts
        // every one of the 3 spanning trees (matching the reference
        // algorithm's deliberately inverted polarity, §9), so the true
        // complement (the trees that do NOT have the MOPE's edges
        // "surviving") is empty.
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let t = build(&SpanningTree::new(&g, &fm));
        let filter = UnfoldingFilter::<Mask64>::new(3, &[0, 1, 2]);
        let filtered = subset(&t, &filter).reduce();
        assert_eq!(filtered.cardinality().as_str(), "3");
        let non_overlapping = difference(&t, &filtered);
        assert_eq!(non_overlapping.cardinality().as_str(), "0");
    }

    #[test]
    fn singleton_mope_complement_matches_direct_subtraction() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        let t = build(&SpanningTree::new(&g, &fm));
        let filter = UnfoldingFilter::<Mask64>::new(3, &[0]);
        let filtered = subset(&t, &filter).reduce();
        assert_eq!(filtered.cardinality().as_str(), "2");
        let non_overlapping = difference(&t, &filtered);
        assert_eq!(non_overlapping.cardinality().as_str(), "1");
    }
}
