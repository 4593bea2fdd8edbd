use std::io::Write;

use error_stack::{Report, ResultExt};
use serde::Serialize;

use crate::error::IoError;

/// Phase 4 (ZDD build): always present once the build has run.
#[derive(Debug, Clone, Serialize)]
pub struct Phase4 {
    pub build_time_ms: u64,
    /// `spanning_tree_count`, a decimal string (may exceed `u64`).
    pub spanning_tree_count: String,
}

/// Phase 5 (overlap filter): `filter_applied` is always present; the rest
/// only when it is `true` (§6).
#[derive(Debug, Clone, Serialize)]
pub struct Phase5 {
    pub filter_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_mopes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subset_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_overlapping_count: Option<String>,
}

impl Phase5 {
    #[must_use]
    pub fn not_applied() -> Self {
        Self {
            filter_applied: false,
            num_mopes: None,
            subset_time_ms: None,
            non_overlapping_count: None,
        }
    }

    #[must_use]
    pub fn applied(num_mopes: usize, subset_time_ms: u64, non_overlapping_count: String) -> Self {
        Self {
            filter_applied: true,
            num_mopes: Some(num_mopes),
            subset_time_ms: Some(subset_time_ms),
            non_overlapping_count: Some(non_overlapping_count),
        }
    }
}

/// Phase 6 (Burnside aggregation): `burnside_applied` is always present;
/// the rest only when it is `true` (§6).
#[derive(Debug, Clone, Serialize)]
pub struct Phase6 {
    pub burnside_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_order: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burnside_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burnside_sum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonisomorphic_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invariant_counts: Option<Vec<String>>,
}

impl Phase6 {
    #[must_use]
    pub fn not_applied() -> Self {
        Self {
            burnside_applied: false,
            group_order: None,
            burnside_time_ms: None,
            burnside_sum: None,
            nonisomorphic_count: None,
            invariant_counts: None,
        }
    }

    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn applied(
        group_order: u64,
        burnside_time_ms: u64,
        burnside_sum: String,
        nonisomorphic_count: String,
        invariant_counts: Vec<String>,
    ) -> Self {
        Self {
            burnside_applied: true,
            group_order: Some(group_order),
            burnside_time_ms: Some(burnside_time_ms),
            burnside_sum: Some(burnside_sum),
            nonisomorphic_count: Some(nonisomorphic_count),
            invariant_counts: Some(invariant_counts),
        }
    }
}

/// The in-memory mirror of the §6 Result JSON object, built incrementally
/// as phases complete (§3: `RunResult`).
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub input_file: String,
    pub vertices: usize,
    pub edges: usize,
    pub phase4: Phase4,
    pub phase5: Phase5,
    pub phase6: Phase6,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_depth: Option<usize>,
}

/// Serialize `result` as pretty JSON and write it to `writer`.
///
/// # Errors
///
/// Returns [`IoError::ResultWrite`] if serialization or the write fails.
pub fn write_result(result: &RunResult, writer: &mut impl Write) -> Result<(), Report<IoError>> {
    let json = serde_json::to_string_pretty(result)
        .change_context(IoError::ResultWrite)
        .attach_printable("serializing result")?;
    writer
        .write_all(json.as_bytes())
        .change_context(IoError::ResultWrite)
        .attach_printable("writing result")?;
    writer
        .write_all(b"\n")
        .change_context(IoError::ResultWrite)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_phase5_detail_fields_when_not_applied() {
        let result = RunResult {
            input_file: "graph.txt".to_owned(),
            vertices: 3,
            edges: 3,
            phase4: Phase4 {
                build_time_ms: 1,
                spanning_tree_count: "3".to_owned(),
            },
            phase5: Phase5::not_applied(),
            phase6: Phase6::not_applied(),
            split_depth: None,
        };
        let mut buffer = Vec::new();
        write_result(&result, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"filter_applied\": false"));
        assert!(!text.contains("num_mopes"));
        assert!(!text.contains("split_depth"));
    }

    #[test]
    fn includes_phase6_detail_fields_when_applied() {
        let result = RunResult {
            input_file: "graph.txt".to_owned(),
            vertices: 3,
            edges: 3,
            phase4: Phase4 {
                build_time_ms: 1,
                spanning_tree_count: "3".to_owned(),
            },
            phase5: Phase5::not_applied(),
            phase6: Phase6::applied(3, 2, "3".to_owned(), "1".to_owned(), vec!["3".to_owned()]),
            split_depth: Some(2),
        };
        let mut buffer = Vec::new();
        write_result(&result, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"group_order\": 3"));
        assert!(text.contains("\"nonisomorphic_count\": \"1\""));
        assert!(text.contains("\"split_depth\": 2"));
    }
}
