//! Orbit counting and the optional memory-partitioned build driver,
//! layered on top of the ZDD engine.

pub mod burnside;
pub mod error;
pub mod partition;

pub use burnside::{aggregate, fixed_point_counts, finalize, Automorphism, BurnsideResult};
pub use error::BurnsideError;
pub use partition::PartitionedDriver;
