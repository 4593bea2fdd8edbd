//! `unfold-zdd`: ZDD-based counting of spanning trees, non-overlapping
//! edge-unfoldings, and non-isomorphic unfoldings of convex
//! regular-faced polyhedra.
//!
//! This crate is a thin facade over the workspace's five path crates:
//! `unfold-zdd-core`, `unfold-zdd-graph`, `unfold-zdd-zdd`,
//! `unfold-zdd-algorithms` and `unfold-zdd-io`, each of which can also be
//! depended on directly. The `unfold-zdd` binary (`crates/cli`) is built
//! on top of the same public API re-exported here; nothing in the CLI is
//! privileged access.
//!
//! A full run (build the spanning-tree diagram, apply the overlap
//! filter, aggregate by Burnside's lemma) looks like:
//!
//! ```no_run
//! use unfold_zdd::graph::{FrontierManager, Graph};
//! use unfold_zdd::zdd::{build, subset, SpanningTree, UnfoldingFilter, difference};
//! use unfold_zdd::core::Mask64;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)])?;
//! let frontier = FrontierManager::build(&graph);
//! let t = build(&SpanningTree::new(&graph, &frontier));
//!
//! let filter = UnfoldingFilter::<Mask64>::new(graph.edge_count(), &[0]);
//! let filtered = subset(&t, &filter).reduce();
//! let non_overlapping = difference(&t, &filtered);
//!
//! println!("{}", non_overlapping.cardinality());
//! # Ok(())
//! # }
//! ```

pub use unfold_zdd_algorithms as algorithms;
pub use unfold_zdd_core as core;
pub use unfold_zdd_graph as graph;
pub use unfold_zdd_io as io;
pub use unfold_zdd_zdd as zdd;

pub use unfold_zdd_algorithms::{aggregate, finalize, fixed_point_counts, Automorphism, BurnsideError, BurnsideResult, PartitionedDriver};
pub use unfold_zdd_core::{BitMask, Decimal, WidthClass};
pub use unfold_zdd_graph::{FrontierManager, Graph};
pub use unfold_zdd_zdd::{build, difference, subset, Edge, SpanningTree, SymmetryFilter, UnfoldingFilter, Zdd, ZddSpec};

#[cfg(feature = "serde")]
pub use unfold_zdd_io::{read_automorphism_file, read_mope_file, write_result, AutomorphismFile, Mope, Phase4, Phase5, Phase6, RunResult};
