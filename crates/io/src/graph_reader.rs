use std::fs;
use std::path::Path;

use error_stack::{Report, ResultExt};
use unfold_zdd_graph::Graph;

use crate::error::IoError;

/// Read a graph file: lines of `u v` whitespace-separated non-negative
/// integers, one per edge, in the intended ZDD edge order (§6).
///
/// # Errors
///
/// Returns [`IoError::FileRead`] if `path` cannot be read, or
/// [`IoError::MalformedGraphLine`] if any non-blank line is not exactly
/// two whitespace-separated integers. Propagates
/// [`unfold_zdd_graph::GraphError`] (wrapped as `IoError::MalformedGraphLine`)
/// if the resulting edge list is empty.
pub fn read_graph_file(path: &Path) -> Result<Graph, Report<IoError>> {
    let contents = fs::read_to_string(path)
        .change_context(IoError::FileRead)
        .attach_printable_lazy(|| format!("reading graph file {}", path.display()))?;

    let mut edges = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut fields = trimmed.split_ascii_whitespace();
        let (Some(u), Some(v), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(Report::new(IoError::MalformedGraphLine)).attach_printable(format!(
                "{}:{}: expected exactly two whitespace-separated vertex ids",
                path.display(),
                line_no + 1
            ));
        };
        let u: u32 = u.parse().change_context(IoError::MalformedGraphLine).attach_printable_lazy(|| {
            format!("{}:{}: `{u}` is not a vertex id", path.display(), line_no + 1)
        })?;
        let v: u32 = v.parse().change_context(IoError::MalformedGraphLine).attach_printable_lazy(|| {
            format!("{}:{}: `{v}` is not a vertex id", path.display(), line_no + 1)
        })?;
        edges.push((u, v));
    }

    Graph::from_edges(edges)
        .change_context(IoError::MalformedGraphLine)
        .attach_printable_lazy(|| format!("graph file {}", path.display()))
}
