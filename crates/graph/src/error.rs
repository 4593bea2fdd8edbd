use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors constructing a [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// Γ has no edges; a spanning-tree count is undefined (and the ZDD
    /// engine has no levels to build).
    EmptyEdgeList,
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyEdgeList => write!(f, "graph has no edges"),
        }
    }
}

impl Context for GraphError {}
