//! Readers for the three external artifacts the core consumes (§6: the
//! Graph file, the MOPE list, the Automorphism list) and the writer for
//! the Result JSON it produces.
//!
//! This crate is pure plumbing: it owns no algorithmic logic, only parsing,
//! validation, and the Result object's wire shape. The MOPE/automorphism
//! readers and the Result writer need `serde`/`serde_json`, gated behind
//! this crate's `serde` feature (on by default).

pub mod error;
pub mod graph_reader;

#[cfg(feature = "serde")]
pub mod automorphism_reader;
#[cfg(feature = "serde")]
pub mod mope_reader;
#[cfg(feature = "serde")]
pub mod result;

pub use error::IoError;
pub use graph_reader::read_graph_file;

#[cfg(feature = "serde")]
pub use automorphism_reader::{read_automorphism_file, AutomorphismFile};
#[cfg(feature = "serde")]
pub use mope_reader::{read_mope_file, Mope};
#[cfg(feature = "serde")]
pub use result::{write_result, Phase4, Phase5, Phase6, RunResult};
