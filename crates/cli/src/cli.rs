use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// The command-line surface of §6: a positional graph file and optional
/// MOPE file, plus flags selecting the automorphism list, the
/// memory-partitioned driver's split depth, and the logging sink's
/// verbosity/format.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "unfold-zdd",
    about = "Count spanning trees, non-overlapping unfoldings and non-isomorphic unfoldings of a polyhedron's 1-skeleton."
)]
pub struct Cli {
    /// Ordered edge-list graph file (§6: lines of `u v`).
    pub graph_file: PathBuf,

    /// MOPE list (JSON-Lines); omit to skip Phase 5 entirely.
    pub mope_file: Option<PathBuf>,

    /// Automorphism list (JSON); omit to skip Phase 6 entirely.
    #[arg(long)]
    pub automorphisms: Option<PathBuf>,

    /// Split the build into `2^N` disjoint partitions on the first `N`
    /// edges (0 <= N <= 30 and N < E).
    #[arg(long, value_name = "N")]
    pub split_depth: Option<usize>,

    /// Raise the logging sink's level; repeat for more detail.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Select the `tracing-subscriber` formatter.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Suppress progress marks; the final Result is still printed.
    #[arg(long)]
    pub quiet: bool,
}

/// The logging sink's output format, selected by `--log-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text, the default.
    Text,
    /// One structured JSON object per log line.
    Json,
}

impl Cli {
    /// Validate the split-depth bound from §6 (`0 <= N <= 30 and N < E`)
    /// against the graph's actual edge count.
    #[must_use]
    pub fn split_depth_is_valid(&self, edge_count: usize) -> bool {
        match self.split_depth {
            None => true,
            Some(n) => n <= 30 && n < edge_count,
        }
    }
}
