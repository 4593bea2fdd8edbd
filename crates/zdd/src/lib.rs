//! The zero-suppressed decision diagram engine: a generic top-down
//! `build`/`subset`/`cardinality`/`copy`/`reduce` core plus the four
//! concrete specifications the rest of the workspace drives it with:
//! `SpanningTree`, `UnfoldingFilter`, `SymmetryFilter` and
//! `EdgeRestrictor`.

pub mod build;
pub mod difference;
pub mod edge_restrictor;
pub mod node;
pub mod spanning_tree;
pub mod spec;
pub mod subset;
pub mod symmetry_filter;
pub mod unfolding_filter;

pub use build::build;
pub use difference::difference;
pub use edge_restrictor::EdgeRestrictor;
pub use node::{Edge, Node, Zdd};
pub use spanning_tree::SpanningTree;
pub use spec::{ProductSpec, Transition, ZddSpec};
pub use subset::subset;
pub use symmetry_filter::SymmetryFilter;
pub use unfolding_filter::UnfoldingFilter;
