use hashbrown::HashMap;

use crate::node::{Edge, Node, Zdd};
use crate::spec::{Transition, ZddSpec};

/// Expand `spec` top-down into a reduced [`Zdd`].
///
/// Recursion is memoized per `(level, state)` so that equivalent states
/// reached along different paths share one subgraph, and a second unique
/// table keyed by `(level, lo, hi)` merges structurally identical nodes
/// and zero-suppresses any node whose `hi` child is the 0-terminal. Both
/// tables together mean the result is already fully reduced; no separate
/// pass is needed (see [`Zdd::reduce`] for the standalone operation).
pub fn build<S: ZddSpec>(spec: &S) -> Zdd {
    let mut arena = Vec::new();
    let mut memo: HashMap<(usize, S::State), Edge> = HashMap::new();
    let mut unique: HashMap<(usize, Edge, Edge), Edge> = HashMap::new();

    let (root_state, root_level) = spec.root();
    let root = expand(spec, &root_state, root_level, &mut arena, &mut memo, &mut unique);
    Zdd::new(arena, root, spec.edge_count())
}

fn expand<S: ZddSpec>(
    spec: &S,
    state: &S::State,
    level: usize,
    arena: &mut Vec<Node>,
    memo: &mut HashMap<(usize, S::State), Edge>,
    unique: &mut HashMap<(usize, Edge, Edge), Edge>,
) -> Edge {
    let key = (level, state.clone());
    if let Some(&edge) = memo.get(&key) {
        return edge;
    }

    let lo = resolve(spec, state, level, false, arena, memo, unique);
    let hi = resolve(spec, state, level, true, arena, memo, unique);

    let edge = if hi == Edge::Terminal(false) {
        lo
    } else if let Some(&existing) = unique.get(&(level, lo, hi)) {
        existing
    } else {
        let id = u32::try_from(arena.len()).expect("ZDD arena index overflowed u32");
        arena.push(Node { level, lo, hi });
        let edge = Edge::Node(id);
        unique.insert((level, lo, hi), edge);
        edge
    };

    memo.insert(key, edge);
    edge
}

fn resolve<S: ZddSpec>(
    spec: &S,
    state: &S::State,
    level: usize,
    value: bool,
    arena: &mut Vec<Node>,
    memo: &mut HashMap<(usize, S::State), Edge>,
    unique: &mut HashMap<(usize, Edge, Edge), Edge>,
) -> Edge {
    match spec.child(state, level, value) {
        Transition::Prune => Edge::Terminal(false),
        Transition::Accept => Edge::Terminal(true),
        Transition::Continue(next_state, next_level) => {
            expand(spec, &next_state, next_level, arena, memo, unique)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts every path of length `edge_count` (the universe ZDD):
    /// every edge is free, so `cardinality` must be `2^edge_count`.
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

    /// Accepts only the all-ones path.
    struct Singleton {
        edge_count: usize,
    }

    impl ZddSpec for Singleton {
        type State = ();

        fn edge_count(&self) -> usize {
            self.edge_count
        }

        fn root(&self) -> ((), usize) {
            ((), self.edge_count)
        }

        fn child(&self, _state: &(), level: usize, value: bool) -> Transition<()> {
            if !value {
                return Transition::Prune;
            }
            if level == 1 {
                Transition::Accept
            } else {
                Transition::Continue((), level - 1)
            }
        }
    }

    #[test]
    fn universe_counts_two_to_the_e() {
        let z = build(&Universe { edge_count: 5 });
        assert_eq!(z.cardinality().as_str(), "32");
    }

    #[test]
    fn singleton_counts_one() {
        let z = build(&Singleton { edge_count: 6 });
        assert_eq!(z.cardinality().as_str(), "1");
    }

    #[test]
    fn universe_is_maximally_shared() {
        // Every level's lo and hi land on the same single successor node
        // (neither child is ever the 0-terminal, since every path is
        // accepted), so no node is zero-suppressed and each of the 4
        // levels contributes exactly one shared node.
        let z = build(&Universe { edge_count: 4 });
        assert_eq!(z.node_count(), 4);
    }
}
