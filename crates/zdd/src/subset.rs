use hashbrown::HashMap;

use crate::node::{Edge, Node, Zdd};
use crate::spec::{Transition, ZddSpec};

/// Intersect `t`'s language with `spec`'s: a path is accepted by the
/// result iff it is accepted by both.
///
/// `t` may already be zero-suppressed, so an edge out of one of its nodes
/// can point several levels below the node's own level, meaning the
/// skipped levels were all implicitly decided as 0. `spec`, however, only
/// knows how to decide one level at a time. [`advance_zero`] reconciles
/// the two by driving `spec` through each skipped level with value 0
/// before the two structures are walked in lockstep again.
pub fn subset<S: ZddSpec>(t: &Zdd, spec: &S) -> Zdd {
    debug_assert_eq!(t.edge_count(), spec.edge_count());

    let mut arena = Vec::new();
    let mut memo: HashMap<(Edge, usize, S::State), Edge> = HashMap::new();
    let mut unique: HashMap<(usize, Edge, Edge), Edge> = HashMap::new();

    let (spec_state, spec_level) = spec.root();
    let root_level = t.level_of(t.root).max(spec_level);
    let root = combine(
        t,
        t.root,
        root_level,
        spec,
        &spec_state,
        &mut arena,
        &mut memo,
        &mut unique,
    );
    Zdd::new(arena, root, t.edge_count())
}

/// Drive `spec` through every level from `from_level` down to (but not
/// including) `to_level`, always with value 0, stopping early on
/// `Prune`/`Accept`. Returns the reconciled state once `to_level` is
/// reached, or the terminal verdict if one fired first.
fn advance_zero<S: ZddSpec>(spec: &S, mut state: S::State, mut level: usize, to_level: usize) -> Transition<S::State> {
    while level > to_level {
        match spec.child(&state, level, false) {
            Transition::Prune => return Transition::Prune,
            Transition::Accept => return Transition::Accept,
            Transition::Continue(next_state, next_level) => {
                debug_assert!(next_level < level, "spec must strictly decrease its level");
                state = next_state;
                level = next_level;
            }
        }
    }
    Transition::Continue(state, level)
}

#[allow(clippy::too_many_arguments)]
fn combine<S: ZddSpec>(
    t: &Zdd,
    t_edge: Edge,
    level: usize,
    spec: &S,
    spec_state: &S::State,
    arena: &mut Vec<Node>,
    memo: &mut HashMap<(Edge, usize, S::State), Edge>,
    unique: &mut HashMap<(usize, Edge, Edge), Edge>,
) -> Edge {
    match t_edge {
        Edge::Terminal(false) => return Edge::Terminal(false),
        Edge::Terminal(true) => {
            return match advance_zero(spec, spec_state.clone(), level, 0) {
                Transition::Prune => Edge::Terminal(false),
                Transition::Accept | Transition::Continue(_, _) => Edge::Terminal(true),
            };
        }
        Edge::Node(_) => {}
    }

    let key = (t_edge, level, spec_state.clone());
    if let Some(&edge) = memo.get(&key) {
        return edge;
    }

    let node = match t_edge {
        Edge::Node(id) => t.arena[id as usize],
        Edge::Terminal(_) => unreachable!("terminal edges are handled above"),
    };
    debug_assert_eq!(node.level, level);

    let lo = branch(t, &node, false, level, spec, spec_state, arena, memo, unique);
    let hi = branch(t, &node, true, level, spec, spec_state, arena, memo, unique);

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

#[allow(clippy::too_many_arguments)]
fn branch<S: ZddSpec>(
    t: &Zdd,
    node: &Node,
    value: bool,
    level: usize,
    spec: &S,
    spec_state: &S::State,
    arena: &mut Vec<Node>,
    memo: &mut HashMap<(Edge, usize, S::State), Edge>,
    unique: &mut HashMap<(usize, Edge, Edge), Edge>,
) -> Edge {
    let t_child = if value { node.hi } else { node.lo };

    match spec.child(spec_state, level, value) {
        Transition::Prune => Edge::Terminal(false),
        // `spec` only terminates at level 1, at which point every node's
        // child must itself be a terminal (there is no level-0 node), so
        // deferring to `t`'s own verdict is exactly the AND of the two.
        Transition::Accept => t_child,
        Transition::Continue(next_state, next_level) => {
            let t_child_level = t.level_of(t_child);
            debug_assert!(t_child_level <= next_level);
            match advance_zero(spec, next_state, next_level, t_child_level) {
                Transition::Prune => Edge::Terminal(false),
                Transition::Accept => Edge::Terminal(true),
                Transition::Continue(final_state, final_level) => combine(
                    t,
                    t_child,
                    final_level,
                    spec,
                    &final_state,
                    arena,
                    memo,
                    unique,
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;

    /// Accepts every path (the universe ZDD).
    struct Universe {
        edge_count: usize,
    }

    impl ZddSpec for Universe {
        type State = ();
        fn edge_count(&self) -> usize {
            self.edge_count
        }
        fn root(&self) -> ((), usize) {
            ((), self.edge_count)
        }
        fn child(&self, _state: &(), level: usize, _value: bool) -> Transition<()> {
            if level == 1 {
                Transition::Accept
            } else {
                Transition::Continue((), level - 1)
            }
        }
    }

    /// Accepts only paths where edge 0 (the highest level, `E`) is 1.
    struct FirstEdgeSelected {
        edge_count: usize,
    }

    impl ZddSpec for FirstEdgeSelected {
        type State = bool;
        fn edge_count(&self) -> usize {
            self.edge_count
        }
        fn root(&self) -> (bool, usize) {
            (false, self.edge_count)
        }
        fn child(&self, state: &bool, level: usize, value: bool) -> Transition<bool> {
            let satisfied = if level == self.edge_count { value } else { *state };
            if level == 1 {
                if satisfied {
                    Transition::Accept
                } else {
                    Transition::Prune
                }
            } else {
                Transition::Continue(satisfied, level - 1)
            }
        }
    }

    #[test]
    fn subsetting_universe_with_first_edge_filter_halves_cardinality() {
        let universe = build(&Universe { edge_count: 5 });
        let filtered = subset(&universe, &FirstEdgeSelected { edge_count: 5 });
        assert_eq!(filtered.reduce().cardinality().as_str(), "16");
    }

    #[test]
    fn subsetting_with_universe_spec_is_identity() {
        let universe = build(&Universe { edge_count: 5 });
        let reflected = subset(&universe, &Universe { edge_count: 5 });
        assert_eq!(reflected.reduce().cardinality().as_str(), "32");
    }
}
