//! The ordered-edge graph Γ and the frontier precomputation over it.
//!
//! Everything downstream (the `SpanningTree` ZDD specification, the
//! overlap and symmetry filters) only ever needs two things from a graph:
//! its edge endpoints in the fixed ZDD edge order, and, for the spanning
//! tree builder specifically, the frontier precomputed here once.

pub mod error;
pub mod frontier;
pub mod graph;

pub use error::GraphError;
pub use frontier::FrontierManager;
pub use graph::Graph;
