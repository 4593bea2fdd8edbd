use std::fs;
use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::Deserialize;

use crate::error::IoError;

#[derive(Debug, Deserialize)]
struct MopeLine {
    edges: Vec<usize>,
}

/// A single parsed MOPE, with its 0-based edge-index set deduplicated and
/// sorted, plus the line it was read from (for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mope {
    /// The MOPE's edge-index set, deduplicated and sorted ascending.
    pub edges: Vec<usize>,
    /// The 1-based line number this MOPE was read from.
    pub line: usize,
}

/// Read a MOPE list (JSON-Lines, §6): each non-blank line a
/// `{"edges": [...]}` object of 0-based edge indices into the graph.
///
/// Blank lines are skipped (§7 semantic warning); duplicate edges within a
/// line are tolerated and deduplicated. Every edge index must be
/// `< edge_count`.
///
/// # Errors
///
/// Returns [`IoError::FileRead`] if `path` cannot be read,
/// [`IoError::MalformedMopeLine`] if a non-blank line is not a
/// well-formed `{"edges": [...]}` object, or
/// [`IoError::MopeEdgeOutOfRange`] if any edge index is `>= edge_count`.
pub fn read_mope_file(path: &Path, edge_count: usize) -> Result<Vec<Mope>, Report<IoError>> {
    let contents = fs::read_to_string(path)
        .change_context(IoError::FileRead)
        .attach_printable_lazy(|| format!("reading MOPE file {}", path.display()))?;

    let mut mopes = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let parsed: MopeLine = serde_json::from_str(line)
            .change_context(IoError::MalformedMopeLine)
            .attach_printable_lazy(|| format!("{}:{line_no}", path.display()))?;

        for &edge in &parsed.edges {
            if edge >= edge_count {
                return Err(Report::new(IoError::MopeEdgeOutOfRange)).attach_printable(format!(
                    "{}:{line_no}: edge index {edge} is out of range for {edge_count} edges",
                    path.display()
                ));
            }
        }

        let mut edges = parsed.edges;
        edges.sort_unstable();
        edges.dedup();
        mopes.push(Mope { edges, line: line_no });
    }

    Ok(mopes)
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_mopes_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mopes.jsonl");
        fs::write(&path, "{\"edges\": [0, 1]}\n\n{\"edges\": [2]}\n").unwrap();
        let mopes = read_mope_file(&path, 3).unwrap();
        assert_eq!(mopes.len(), 2);
        assert_eq!(mopes[0].edges, vec![0, 1]);
        assert_eq!(mopes[0].line, 1);
        assert_eq!(mopes[1].edges, vec![2]);
        assert_eq!(mopes[1].line, 3);
    }

    #[test]
    fn dedups_repeated_edges_within_a_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mopes.jsonl");
        fs::write(&path, "{\"edges\": [1, 1, 0]}\n").unwrap();
        let mopes = read_mope_file(&path, 2).unwrap();
        assert_eq!(mopes[0].edges, vec![0, 1]);
    }

    #[test]
    fn rejects_out_of_range_edge() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mopes.jsonl");
        fs::write(&path, "{\"edges\": [5]}\n").unwrap();
        assert!(read_mope_file(&path, 3).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mopes.jsonl");
        fs::write(&path, "not json\n").unwrap();
        assert!(read_mope_file(&path, 3).is_err());
    }

    #[test]
    fn empty_file_yields_no_mopes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mopes.jsonl");
        fs::write(&path, "").unwrap();
        assert_eq!(read_mope_file(&path, 3).unwrap(), Vec::new());
    }
}
