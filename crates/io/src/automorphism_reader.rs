use std::fs;
use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::Deserialize;
use unfold_zdd_algorithms::Automorphism;

use crate::error::IoError;

#[derive(Debug, Deserialize)]
struct AutomorphismFileJson {
    group_order: u64,
    edge_permutations: Vec<Vec<usize>>,
    #[serde(default)]
    zero_flags: Option<Vec<bool>>,
}

/// The parsed Automorphism list (§6): the asserted group order, the
/// automorphisms actually supplied, and whether the asserted
/// `group_order` matched the number of permutations present (a semantic
/// warning, §7 item 3, when it does not).
#[derive(Debug, Clone)]
pub struct AutomorphismFile {
    /// The asserted `|Aut(Γ)|`, echoed verbatim into the Result JSON.
    pub group_order: u64,
    /// The automorphisms actually present, identity first if it was first
    /// in the input (order is otherwise preserved).
    pub automorphisms: Vec<Automorphism>,
}

impl AutomorphismFile {
    /// `true` iff the asserted `group_order` equals the number of
    /// permutations actually supplied; `false` triggers the §7 item 3
    /// semantic warning in the caller.
    #[must_use]
    pub fn group_order_matches_count(&self) -> bool {
        self.group_order == self.automorphisms.len() as u64
    }
}

fn is_permutation(p: &[usize], edge_count: usize) -> bool {
    if p.len() != edge_count {
        return false;
    }
    let mut seen = vec![false; edge_count];
    for &x in p {
        if x >= edge_count || seen[x] {
            return false;
        }
        seen[x] = true;
    }
    true
}

fn is_identity(p: &[usize]) -> bool {
    p.iter().enumerate().all(|(i, &x)| x == i)
}

/// Read and validate an Automorphism list (§6).
///
/// Every `edge_permutations` entry must have length `edge_count` and be a
/// bijection on `0..edge_count`; the identity permutation must be present;
/// `zero_flags`, if present, must have the same length as
/// `edge_permutations`.
///
/// # Errors
///
/// Returns [`IoError::FileRead`] if `path` cannot be read,
/// [`IoError::MalformedAutomorphismFile`] if the top-level JSON is
/// malformed, [`IoError::PermutationLengthMismatch`] or
/// [`IoError::PermutationNotABijection`] for a malformed entry,
/// [`IoError::ZeroFlagsLengthMismatch`] for a length mismatch, or
/// [`IoError::MissingIdentityPermutation`] if no entry is the identity.
pub fn read_automorphism_file(
    path: &Path,
    edge_count: usize,
) -> Result<AutomorphismFile, Report<IoError>> {
    let contents = fs::read_to_string(path)
        .change_context(IoError::FileRead)
        .attach_printable_lazy(|| format!("reading automorphism file {}", path.display()))?;

    let parsed: AutomorphismFileJson = serde_json::from_str(&contents)
        .change_context(IoError::MalformedAutomorphismFile)
        .attach_printable_lazy(|| path.display().to_string())?;

    if let Some(flags) = &parsed.zero_flags {
        if flags.len() != parsed.edge_permutations.len() {
            return Err(Report::new(IoError::ZeroFlagsLengthMismatch)).attach_printable(format!(
                "{}: {} zero_flags but {} edge_permutations",
                path.display(),
                flags.len(),
                parsed.edge_permutations.len()
            ));
        }
    }

    let mut saw_identity = false;
    let mut automorphisms = Vec::with_capacity(parsed.edge_permutations.len());
    for (index, permutation) in parsed.edge_permutations.into_iter().enumerate() {
        if permutation.len() != edge_count {
            return Err(Report::new(IoError::PermutationLengthMismatch)).attach_printable(format!(
                "{}: edge_permutations[{index}] has length {}, expected {edge_count}",
                path.display(),
                permutation.len()
            ));
        }
        if !is_permutation(&permutation, edge_count) {
            return Err(Report::new(IoError::PermutationNotABijection))
                .attach_printable(format!("{}: edge_permutations[{index}]", path.display()));
        }
        if is_identity(&permutation) {
            saw_identity = true;
        }
        let zero_certified = parsed
            .zero_flags
            .as_ref()
            .map(|flags| flags[index])
            .unwrap_or(false);
        automorphisms.push(Automorphism {
            permutation,
            zero_certified,
        });
    }

    if !saw_identity {
        return Err(Report::new(IoError::MissingIdentityPermutation))
            .attach_printable(path.display().to_string());
    }

    Ok(AutomorphismFile {
        group_order: parsed.group_order,
        automorphisms,
    })
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_a_well_formed_file() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 3, "edge_permutations": [[0,1,2],[1,2,0],[2,0,1]]}"#,
        );
        let file = read_automorphism_file(&path, 3).unwrap();
        assert_eq!(file.group_order, 3);
        assert_eq!(file.automorphisms.len(), 3);
        assert!(file.group_order_matches_count());
    }

    #[test]
    fn flags_a_group_order_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 10, "edge_permutations": [[0,1,2]]}"#,
        );
        let file = read_automorphism_file(&path, 3).unwrap();
        assert!(!file.group_order_matches_count());
    }

    #[test]
    fn rejects_missing_identity() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 1, "edge_permutations": [[1,2,0]]}"#,
        );
        assert!(read_automorphism_file(&path, 3).is_err());
    }

    #[test]
    fn rejects_non_bijective_permutation() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 1, "edge_permutations": [[0,0,2]]}"#,
        );
        assert!(read_automorphism_file(&path, 3).is_err());
    }

    #[test]
    fn rejects_wrong_length_permutation() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 1, "edge_permutations": [[0,1]]}"#,
        );
        assert!(read_automorphism_file(&path, 3).is_err());
    }

    #[test]
    fn rejects_zero_flags_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 1, "edge_permutations": [[0,1,2]], "zero_flags": [false, true]}"#,
        );
        assert!(read_automorphism_file(&path, 3).is_err());
    }

    #[test]
    fn honors_zero_flags() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "auto.json",
            r#"{"group_order": 2, "edge_permutations": [[0,1,2],[1,2,0]], "zero_flags": [false, true]}"#,
        );
        let file = read_automorphism_file(&path, 3).unwrap();
        assert!(!file.automorphisms[0].zero_certified);
        assert!(file.automorphisms[1].zero_certified);
    }
}
