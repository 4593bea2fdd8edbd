use hashbrown::HashMap;
use unfold_zdd_core::Decimal;

/// A pointer to either one of the two fixed terminals or a node in a
/// [`Zdd`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The 0-terminal (reject) when `false`, the 1-terminal (accept) when
    /// `true`.
    Terminal(bool),
    /// An index into [`Zdd::arena`].
    Node(u32),
}

/// One interior node: the variable `level` it decides, and its two
/// children for value 0 (`lo`) and value 1 (`hi`).
///
/// In a reduced ZDD, `hi` is never the 0-terminal (such a node would be
/// zero-suppressed into its `lo` child directly), and no two nodes share
/// both the same level and the same `(lo, hi)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub level: usize,
    pub lo: Edge,
    pub hi: Edge,
}

/// A zero-suppressed decision diagram: an arena of nodes reached from a
/// single `root` edge, built over `edge_count` variables.
///
/// The arena is always stored in a bottom-up topological order (a node's
/// children are pushed before the node itself), which both [`cardinality`]
/// and [`reduce`] rely on to do a single linear pass.
///
/// [`cardinality`]: Zdd::cardinality
/// [`reduce`]: Zdd::reduce
#[derive(Debug, Clone)]
pub struct Zdd {
    pub(crate) arena: Vec<Node>,
    pub(crate) root: Edge,
    pub(crate) edge_count: usize,
}

impl Zdd {
    pub(crate) fn new(arena: Vec<Node>, root: Edge, edge_count: usize) -> Self {
        Self {
            arena,
            root,
            edge_count,
        }
    }

    /// The number of ZDD variables this diagram was built over.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The number of interior nodes in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn level_of(&self, edge: Edge) -> usize {
        match edge {
            Edge::Terminal(_) => 0,
            Edge::Node(id) => self.arena[id as usize].level,
        }
    }

    /// A structural clone sharing no mutable state with `self`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Count the accepted paths: 0-terminal contributes 0, 1-terminal
    /// contributes 1, an interior node contributes the sum of its two
    /// children's counts.
    ///
    /// Relies on the arena's bottom-up order to compute every node's count
    /// exactly once, in a single forward pass.
    #[must_use]
    pub fn cardinality(&self) -> Decimal {
        let mut counts: Vec<Decimal> = Vec::with_capacity(self.arena.len());
        for node in &self.arena {
            let lo = self.edge_count_value(node.lo, &counts);
            let hi = self.edge_count_value(node.hi, &counts);
            counts.push(lo.add(&hi));
        }
        self.edge_count_value(self.root, &counts)
    }

    fn edge_count_value(&self, edge: Edge, counts: &[Decimal]) -> Decimal {
        match edge {
            Edge::Terminal(false) => Decimal::zero(),
            Edge::Terminal(true) => Decimal::from_u64(1),
            Edge::Node(id) => counts[id as usize].clone(),
        }
    }

    /// Re-canonicalize the diagram: merge any nodes sharing the same
    /// `(level, lo, hi)` and zero-suppress any node whose `hi` child is
    /// the 0-terminal.
    ///
    /// [`crate::build`] and [`crate::subset`] already maintain a unique
    /// table during construction, so their output is already canonical
    /// and a `reduce` pass over it is a no-op relabeling. `reduce` exists
    /// as an independent operation for diagrams assembled by other means
    /// (the Burnside aggregator calls it explicitly after every
    /// `subset`).
    #[must_use]
    pub fn reduce(&self) -> Self {
        let mut remap: HashMap<Edge, Edge> = HashMap::with_capacity(self.arena.len());
        let mut unique: HashMap<(usize, Edge, Edge), Edge> = HashMap::with_capacity(self.arena.len());
        let mut arena = Vec::with_capacity(self.arena.len());

        for (old_id, node) in self.arena.iter().enumerate() {
            let old_edge = Edge::Node(old_id as u32);
            let lo = *remap.get(&node.lo).unwrap_or(&node.lo);
            let hi = *remap.get(&node.hi).unwrap_or(&node.hi);

            let new_edge = if hi == Edge::Terminal(false) {
                lo
            } else if let Some(&existing) = unique.get(&(node.level, lo, hi)) {
                existing
            } else {
                let id = u32::try_from(arena.len()).expect("ZDD arena index overflowed u32");
                arena.push(Node {
                    level: node.level,
                    lo,
                    hi,
                });
                let edge = Edge::Node(id);
                unique.insert((node.level, lo, hi), edge);
                edge
            };
            remap.insert(old_edge, new_edge);
        }

        let root = *remap.get(&self.root).unwrap_or(&self.root);
        Self::new(arena, root, self.edge_count)
    }

    /// Enumerate every accepted path as a `Vec<bool>` of length
    /// `edge_count`, indexed by edge, `true` meaning the edge is selected.
    ///
    /// Exists purely as a verification tool (§9 "Subset-vs-enumerate
    /// duality"): property P7 cross-checks a small diagram's accepted
    /// paths directly against orbit-based reasoning. Not part of normal
    /// execution — a diagram of any real size has far too many accepted
    /// paths to collect into memory.
    #[must_use]
    pub fn accepted_paths(&self) -> Vec<Vec<bool>> {
        let mut out = Vec::new();
        let mut current = vec![false; self.edge_count];
        self.walk(self.root, self.edge_count, &mut current, &mut out);
        out
    }

    fn walk(&self, edge: Edge, level: usize, current: &mut Vec<bool>, out: &mut Vec<Vec<bool>>) {
        if level == 0 {
            if edge == Edge::Terminal(true) {
                out.push(current.clone());
            }
            return;
        }

        let i = self.edge_count - level;
        match edge {
            Edge::Terminal(false) => {}
            Edge::Terminal(true) => {
                // Zero-suppressed past this point: every remaining edge is
                // implicitly refused.
                current[i] = false;
                self.walk(edge, level - 1, current, out);
            }
            Edge::Node(id) => {
                let node = self.arena[id as usize];
                if node.level == level {
                    current[i] = false;
                    self.walk(node.lo, level - 1, current, out);
                    current[i] = true;
                    self.walk(node.hi, level - 1, current, out);
                    current[i] = false;
                } else {
                    current[i] = false;
                    self.walk(edge, level - 1, current, out);
                }
            }
        }
    }
}
