use error_stack::{Report, ResultExt};
use unfold_zdd_core::{BitMask, Decimal};
use unfold_zdd_zdd::{subset, SymmetryFilter, Zdd};

use crate::error::BurnsideError;

/// One group element's contribution to the Burnside sum: the permutation
/// itself and whether its fixed-point count is already known to be zero
/// (skipping a `subset` + `reduce` + `cardinality` pass entirely).
#[derive(Debug, Clone)]
pub struct Automorphism {
    /// The edge permutation this automorphism induces.
    pub permutation: Vec<usize>,
    /// `true` when this element's fixed-point count is pre-certified as
    /// zero, letting the aggregator skip building its filtered diagram.
    pub zero_certified: bool,
}

/// The outcome of averaging fixed-point counts over a group of
/// automorphisms.
#[derive(Debug, Clone)]
pub struct BurnsideResult {
    /// The sum of per-automorphism fixed spanning-tree counts, S.
    pub sum: Decimal,
    /// The group order, `|Aut(Γ)|`.
    pub group_order: u64,
    /// `S / group_order`, floor division; the number of non-isomorphic
    /// unfoldings when `divisible` is `true`.
    pub orbit_count: Decimal,
    /// `false` means `sum` was not an exact multiple of `group_order`, a
    /// runtime-invariant violation worth a warning, but `orbit_count`
    /// (the floor-divided quotient) is still reported rather than
    /// withheld.
    pub divisible: bool,
}

fn is_identity(permutation: &[usize]) -> bool {
    permutation.iter().enumerate().all(|(i, &p)| p == i)
}

/// Compute, for each automorphism in order, `t_reduced`'s fixed-point
/// count under that element: `t_reduced`'s own cardinality for the
/// identity, 0 for a zero-certified element, or the cardinality of a
/// fresh copy intersected with that element's [`SymmetryFilter`] and
/// reduced.
///
/// Exposed standalone so the memory-partitioned driver can sum these
/// vectors index-wise across partitions before dividing once at the end.
#[must_use]
pub fn fixed_point_counts<B: BitMask>(t_reduced: &Zdd, automorphisms: &[Automorphism]) -> Vec<Decimal> {
    let edge_count = t_reduced.edge_count();
    automorphisms
        .iter()
        .map(|automorphism| {
            if automorphism.zero_certified {
                Decimal::zero()
            } else if is_identity(&automorphism.permutation) {
                t_reduced.cardinality()
            } else {
                let filter = SymmetryFilter::<B>::new(edge_count, &automorphism.permutation);
                subset(&t_reduced.copy(), &filter).reduce().cardinality()
            }
        })
        .collect()
}

/// Sum `fixed_point_counts` and floor-divide by the group order, per
/// Burnside's lemma.
///
/// A sum that isn't an exact multiple of the group order is not treated
/// as fatal: `orbit_count` is still the floor-divided quotient, and
/// `divisible` is `false` so the caller can log a warning rather than
/// discard the result.
///
/// # Errors
///
/// Returns [`BurnsideError::EmptyGroup`] if `fixed_point_counts` is empty.
pub fn finalize(fixed_point_counts: &[Decimal]) -> Result<BurnsideResult, Report<BurnsideError>> {
    if fixed_point_counts.is_empty() {
        return Err(Report::new(BurnsideError::EmptyGroup));
    }

    let mut sum = Decimal::zero();
    for count in fixed_point_counts {
        sum.add_assign(count);
    }

    let group_order = fixed_point_counts.len() as u64;
    let (orbit_count, remainder) = sum
        .divmod_small(group_order)
        .change_context(BurnsideError::EmptyGroup)
        .attach_printable("dividing by the group order should never hit division by zero here")?;

    Ok(BurnsideResult {
        sum,
        group_order,
        orbit_count,
        divisible: remainder == 0,
    })
}

/// Average `t_reduced`'s fixed-point count over `automorphisms` and
/// divide by the group order, per Burnside's lemma.
///
/// For every non-zero-certified, non-identity element, a fresh copy of
/// `t_reduced` is intersected with that element's [`SymmetryFilter`],
/// reduced, and counted; copies never share mutable state so automorphism
/// counting is trivially parallelizable by the caller.
///
/// # Errors
///
/// Returns [`BurnsideError::EmptyGroup`] if `automorphisms` is empty.
pub fn aggregate<B: BitMask>(
    t_reduced: &Zdd,
    automorphisms: &[Automorphism],
) -> Result<BurnsideResult, Report<BurnsideError>> {
    if automorphisms.is_empty() {
        return Err(Report::new(BurnsideError::EmptyGroup));
    }
    finalize(&fixed_point_counts::<B>(t_reduced, automorphisms))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use unfold_zdd_core::Mask64;
    use unfold_zdd_graph::{FrontierManager, Graph};
    use unfold_zdd_zdd::{build, SpanningTree};

    fn triangle_zdd() -> Zdd {
        let g = Graph::from_edges(vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let fm = FrontierManager::build(&g);
        build(&SpanningTree::new(&g, &fm))
    }

    #[test]
    fn identity_only_group_counts_all_spanning_trees() {
        let t = triangle_zdd();
        let result = aggregate::<Mask64>(
            &t,
            &[Automorphism {
                permutation: vec![0, 1, 2],
                zero_certified: false,
            }],
        )
        .unwrap();
        assert_eq!(result.sum.as_str(), "3");
        assert_eq!(result.orbit_count.as_str(), "3");
        assert!(result.divisible);
    }

    #[test]
    fn full_rotation_group_has_one_orbit_of_spanning_trees() {
        // The triangle's full automorphism group is S_3 on its edges for
        // this particular labeling (every spanning tree is a rotation of
        // every other), |G| = 3, all 3 trees forming a single orbit.
        let t = triangle_zdd();
        let automorphisms = vec![
            Automorphism {
                permutation: vec![0, 1, 2],
                zero_certified: false,
            },
            Automorphism {
                permutation: vec![1, 2, 0],
                zero_certified: false,
            },
            Automorphism {
                permutation: vec![2, 0, 1],
                zero_certified: false,
            },
        ];
        let result = aggregate::<Mask64>(&t, &automorphisms).unwrap();
        // identity fixes all 3; each rotation fixes 0 (shown in
        // symmetry_filter's tests), so S = 3 + 0 + 0 = 3, N = 3 / 3 = 1.
        assert_eq!(result.sum.as_str(), "3");
        assert_eq!(result.orbit_count.as_str(), "1");
        assert!(result.divisible);
    }

    #[test]
    fn indivisible_sum_floor_divides_and_flags_the_remainder() {
        let t = triangle_zdd();
        let result = aggregate::<Mask64>(
            &t,
            &[
                Automorphism {
                    permutation: vec![0, 1, 2],
                    zero_certified: false,
                },
                Automorphism {
                    permutation: vec![1, 2, 0],
                    zero_certified: true,
                },
            ],
        )
        .unwrap();
        // sum = 3 + 0 = 3, group order 2: floor(3/2) = 1, remainder 1.
        assert_eq!(result.sum.as_str(), "3");
        assert_eq!(result.orbit_count.as_str(), "1");
        assert!(!result.divisible);
    }

    #[test]
    fn empty_group_is_rejected() {
        let t = triangle_zdd();
        assert!(aggregate::<Mask64>(&t, &[]).is_err());
    }
}
