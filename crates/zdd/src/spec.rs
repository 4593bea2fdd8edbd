use core::hash::Hash;

/// The outcome of deciding one ZDD variable from a [`ZddSpec`].
///
/// `Prune` and `Accept` are terminal: the recursion stops immediately and
/// the path is rejected or accepted regardless of any level the spec
/// skipped to get there. `Continue` carries the state and the next level
/// to recurse into, which by convention is `level - 1`.
#[derive(Debug, Clone)]
pub enum Transition<S> {
    /// Reject this path; equivalent to reaching the ZDD's 0-terminal.
    Prune,
    /// Accept this path; equivalent to reaching the ZDD's 1-terminal.
    Accept,
    /// Keep going with an updated state at `level`.
    Continue(S, usize),
}

/// A recursive, top-down specification of a ZDD's language.
///
/// Implementors describe one decision diagram variable at a time: given a
/// state and the level (edge index counted down from `edge_count()`), and
/// a candidate bit value, decide whether to prune, accept, or continue
/// with an updated state. [`crate::build`] expands a `ZddSpec` directly;
/// [`crate::subset`] intersects an already-built [`crate::Zdd`] against
/// one.
///
/// By contract, `child` only returns `Accept` or `Prune` when called at
/// `level == 1` (the last edge); at every other level it returns
/// `Continue`. The engine relies on this to reconstruct the levels a
/// zero-suppressed edge skips over.
pub trait ZddSpec {
    /// The per-path state this specification threads through the
    /// recursion (e.g. a `FrontierData` array or a `BitMask`).
    type State: Clone + Eq + Hash;

    /// The number of ZDD variables, `E`.
    fn edge_count(&self) -> usize;

    /// The initial state and level (`edge_count()`, by convention).
    fn root(&self) -> (Self::State, usize);

    /// Decide the variable at `level` taking value `value`.
    fn child(&self, state: &Self::State, level: usize, value: bool) -> Transition<Self::State>;
}

/// The pointwise AND of two specifications sharing the same edge order.
///
/// Used to express the memory-partitioned driver's
/// `build(intersection(SpanningTree, EdgeRestrictor))` without needing a
/// separate `subset` pass: both sub-specifications are asked to decide
/// every level in lockstep (no skipping can occur before a diagram is
/// ever built), so the combination is straightforward.
///
/// # Panics
///
/// Panics (via `debug_assert_eq!`) if `a` and `b` ever disagree on the
/// level to continue to; this indicates a malformed specification, not a
/// runtime condition callers need to handle.
pub struct ProductSpec<A, B> {
    a: A,
    b: B,
}

impl<A, B> ProductSpec<A, B> {
    /// Combine `a` and `b`; both must report the same `edge_count()`.
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: ZddSpec, B: ZddSpec> ZddSpec for ProductSpec<A, B> {
    type State = (A::State, B::State);

    fn edge_count(&self) -> usize {
        debug_assert_eq!(self.a.edge_count(), self.b.edge_count());
        self.a.edge_count()
    }

    fn root(&self) -> (Self::State, usize) {
        let (sa, la) = self.a.root();
        let (sb, lb) = self.b.root();
        debug_assert_eq!(la, lb);
        ((sa, sb), la)
    }

    fn child(&self, state: &Self::State, level: usize, value: bool) -> Transition<Self::State> {
        match (
            self.a.child(&state.0, level, value),
            self.b.child(&state.1, level, value),
        ) {
            (Transition::Prune, _) | (_, Transition::Prune) => Transition::Prune,
            (Transition::Accept, Transition::Accept) => Transition::Accept,
            (Transition::Accept, Transition::Continue(_, _))
            | (Transition::Continue(_, _), Transition::Accept) => {
                unreachable!("both sub-specifications share edge_count and must terminate together")
            }
            (Transition::Continue(sa, la), Transition::Continue(sb, lb)) => {
                debug_assert_eq!(la, lb);
                Transition::Continue((sa, sb), la)
            }
        }
    }
}
