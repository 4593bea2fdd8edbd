use core::fmt::{Display, Formatter};

use error_stack::Context;

/// Errors raised while reading the three external artifacts (§6: Graph
/// file, MOPE list, Automorphism list) or while writing the Result JSON.
///
/// One enum spans all four boundaries, following the single-enum-per-crate
/// convention already used by [`unfold_zdd_core::CoreError`],
/// [`unfold_zdd_graph::GraphError`] and
/// [`unfold_zdd_algorithms::BurnsideError`]; the offending file and
/// line/index is threaded through as `error_stack` attachments rather than
/// enum fields, so a single variant covers every reader's "malformed line"
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoError {
    /// A file could not be opened or read.
    FileRead,
    /// A graph-file line was not two whitespace-separated non-negative
    /// integers.
    MalformedGraphLine,
    /// A MOPE-list line was not a well-formed `{"edges": [...]}` JSON
    /// object.
    MalformedMopeLine,
    /// A MOPE referenced an edge index `>= E`.
    MopeEdgeOutOfRange,
    /// The automorphism list's top-level JSON was malformed.
    MalformedAutomorphismFile,
    /// An `edge_permutations` entry did not have length `E`.
    PermutationLengthMismatch,
    /// An `edge_permutations` entry was not a bijection on `0..E`.
    PermutationNotABijection,
    /// No permutation in `edge_permutations` was the identity.
    MissingIdentityPermutation,
    /// `zero_flags` was present but its length did not match
    /// `edge_permutations`.
    ZeroFlagsLengthMismatch,
    /// The Result object could not be serialized or written.
    ResultWrite,
}

impl Display for IoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FileRead => write!(f, "failed to read input file"),
            Self::MalformedGraphLine => {
                write!(f, "graph file line is not two whitespace-separated vertex ids")
            }
            Self::MalformedMopeLine => {
                write!(f, "MOPE list line is not a well-formed {{\"edges\": [...]}} object")
            }
            Self::MopeEdgeOutOfRange => write!(f, "MOPE references an edge index outside 0..E"),
            Self::MalformedAutomorphismFile => write!(f, "automorphism list JSON is malformed"),
            Self::PermutationLengthMismatch => {
                write!(f, "edge permutation length does not match the graph's edge count")
            }
            Self::PermutationNotABijection => {
                write!(f, "edge permutation is not a bijection on 0..E")
            }
            Self::MissingIdentityPermutation => {
                write!(f, "edge_permutations does not contain the identity permutation")
            }
            Self::ZeroFlagsLengthMismatch => {
                write!(f, "zero_flags length does not match edge_permutations length")
            }
            Self::ResultWrite => write!(f, "failed to write the result"),
        }
    }
}

impl Context for IoError {}
