//! Phase-by-phase orchestration (§3, §6): read the three external
//! artifacts, build the spanning-tree ZDD, optionally apply the overlap
//! filter and the Burnside aggregator, and assemble the Result object.

use std::time::Instant;

use error_stack::{Report, ResultExt};
use tracing::{info, warn};
use unfold_zdd_algorithms::fixed_point_counts;
use unfold_zdd_core::{with_bitmask, BitMask, WidthClass};
use unfold_zdd_graph::{FrontierManager, Graph};
use unfold_zdd_io::{
    read_automorphism_file, read_graph_file, read_mope_file, AutomorphismFile, Phase4, Phase5,
    Phase6, RunResult,
};
use unfold_zdd_zdd::{build, difference, subset, PartitionedDriver, SpanningTree, UnfoldingFilter, Zdd};

use crate::cli::Cli;
use crate::error::CliError;

/// Run the full pipeline described by `cli` and return the assembled
/// [`RunResult`] together with whether the Burnside sum (if computed) was
/// evenly divisible by the group order, the caller's signal for the
/// exit code (§6: a non-zero exit on Burnside indivisibility, while the
/// Result JSON is still written in full per §7 item 4).
///
/// # Errors
///
/// Returns [`CliError::Input`] if any of the three artifacts fail to read
/// or validate, [`CliError::Capacity`] if `E` exceeds every configured
/// [`WidthClass`], or [`CliError::EmptyAutomorphismGroup`] if
/// `--automorphisms` names a file with no automorphisms.
pub fn run(cli: &Cli) -> Result<(RunResult, bool), Report<CliError>> {
    let graph = read_graph_file(&cli.graph_file).change_context(CliError::Input)?;
    let frontier = FrontierManager::build(&graph);
    let edge_count = frontier.edge_count();

    if let Some(split_depth) = cli.split_depth {
        if !cli.split_depth_is_valid(edge_count) {
            return Err(Report::new(CliError::Input)).attach_printable(format!(
                "--split-depth {split_depth} must be <= 30 and < the graph's edge count {edge_count}"
            ));
        }
    }

    let class = WidthClass::select(edge_count).change_context(CliError::Capacity)?;
    info!(vertices = graph.vertex_count(), edges = edge_count, width_bits = class.bits(), "graph loaded");

    let mopes = cli
        .mope_file
        .as_deref()
        .map(|path| read_mope_file(path, edge_count).change_context(CliError::Input))
        .transpose()?
        .unwrap_or_default();
    let mope_edge_sets: Vec<Vec<usize>> = mopes.iter().map(|m| m.edges.clone()).collect();

    let automorphism_file = cli
        .automorphisms
        .as_deref()
        .map(|path| read_automorphism_file(path, edge_count).change_context(CliError::Input))
        .transpose()?;

    with_bitmask!(class, |Mask| {
        run_with_width::<Mask>(cli, &graph, &frontier, &mope_edge_sets, automorphism_file.as_ref())
    })
}

fn run_with_width<B: BitMask>(
    cli: &Cli,
    graph: &Graph,
    frontier: &FrontierManager,
    mope_edge_sets: &[Vec<usize>],
    automorphism_file: Option<&AutomorphismFile>,
) -> Result<(RunResult, bool), Report<CliError>> {
    let edge_count = frontier.edge_count();

    let (phase4, phase5, phase6, divisible) = match cli.split_depth {
        Some(split_depth) => {
            let driver = PartitionedDriver::new(graph, frontier, split_depth);
            run_partitioned::<B>(&driver, mope_edge_sets, automorphism_file)?
        }
        None => run_unpartitioned::<B>(graph, frontier, mope_edge_sets, automorphism_file)?,
    };

    Ok((
        RunResult {
            input_file: cli.graph_file.display().to_string(),
            vertices: graph.vertex_count(),
            edges: edge_count,
            phase4,
            phase5,
            phase6,
            split_depth: cli.split_depth,
        },
        divisible,
    ))
}

fn run_unpartitioned<B: BitMask>(
    graph: &Graph,
    frontier: &FrontierManager,
    mope_edge_sets: &[Vec<usize>],
    automorphism_file: Option<&AutomorphismFile>,
) -> Result<(Phase4, Phase5, Phase6, bool), Report<CliError>> {
    let edge_count = frontier.edge_count();

    let build_start = Instant::now();
    let t = build(&SpanningTree::new(graph, frontier));
    let build_time_ms = elapsed_ms(build_start);
    let spanning_tree_count = t.cardinality();
    info!(count = %spanning_tree_count, build_time_ms, "phase 4: spanning trees built");
    let phase4 = Phase4 {
        build_time_ms,
        spanning_tree_count: spanning_tree_count.as_str().to_owned(),
    };

    let (non_overlapping, phase5) = apply_overlap_filter::<B>(t, edge_count, mope_edge_sets);

    let (phase6, divisible) = match automorphism_file {
        None => (Phase6::not_applied(), true),
        Some(file) => run_burnside::<B>(&non_overlapping, file)?,
    };

    Ok((phase4, phase5, phase6, divisible))
}

fn run_partitioned<B: BitMask>(
    driver: &PartitionedDriver<'_>,
    mope_edge_sets: &[Vec<usize>],
    automorphism_file: Option<&AutomorphismFile>,
) -> Result<(Phase4, Phase5, Phase6, bool), Report<CliError>> {
    let build_start = Instant::now();
    let spanning_tree_count = driver.run_cardinality::<B>(&[]);
    let build_time_ms = elapsed_ms(build_start);
    info!(count = %spanning_tree_count, build_time_ms, partitions = driver.partition_count(), "phase 4: spanning trees built (partitioned)");
    let phase4 = Phase4 {
        build_time_ms,
        spanning_tree_count: spanning_tree_count.as_str().to_owned(),
    };

    let phase5 = if mope_edge_sets.is_empty() {
        Phase5::not_applied()
    } else {
        let subset_start = Instant::now();
        let non_overlapping_count = driver.run_cardinality::<B>(mope_edge_sets);
        let subset_time_ms = elapsed_ms(subset_start);
        info!(count = %non_overlapping_count, subset_time_ms, "phase 5: overlap filter applied (partitioned)");
        Phase5::applied(mope_edge_sets.len(), subset_time_ms, non_overlapping_count.as_str().to_owned())
    };

    let (phase6, divisible) = match automorphism_file {
        None => (Phase6::not_applied(), true),
        Some(file) => {
            warn_on_group_order_mismatch(file);
            if file.automorphisms.is_empty() {
                return Err(Report::new(CliError::EmptyAutomorphismGroup));
            }
            let burnside_start = Instant::now();
            let (result, counts) = driver
                .run_burnside_with_counts::<B>(mope_edge_sets, &file.automorphisms)
                .change_context(CliError::EmptyAutomorphismGroup)?;
            let burnside_time_ms = elapsed_ms(burnside_start);
            let invariant_counts: Vec<String> = counts.iter().map(|c| c.as_str().to_owned()).collect();
            log_burnside_result(result.sum.as_str(), result.group_order, result.divisible, burnside_time_ms);
            (
                Phase6::applied(
                    file.group_order,
                    burnside_time_ms,
                    result.sum.as_str().to_owned(),
                    result.orbit_count.as_str().to_owned(),
                    invariant_counts,
                ),
                result.divisible,
            )
        }
    };

    Ok((phase4, phase5, phase6, divisible))
}

/// Apply every MOPE's overlap filter (chained per "Multiple MOPEs") and
/// return the diagram of genuinely non-overlapping spanning trees together
/// with its Phase 5 summary.
///
/// The overlap filter's own diagram counts the complement ("at least one
/// MOPE edge survives refusal", §9's deliberately inverted polarity, kept
/// as-is rather than "corrected"), so the non-overlapping diagram handed
/// onward to Phase 6 is `t \ filtered`, not `filtered` itself.
fn apply_overlap_filter<B: BitMask>(t: Zdd, edge_count: usize, mope_edge_sets: &[Vec<usize>]) -> (Zdd, Phase5) {
    if mope_edge_sets.is_empty() {
        return (t, Phase5::not_applied());
    }
    let subset_start = Instant::now();
    let original = t.copy();
    let filtered = mope_edge_sets.iter().fold(t, |acc, mope| {
        let filter = UnfoldingFilter::<B>::new(edge_count, mope);
        subset(&acc, &filter).reduce()
    });
    let non_overlapping = difference(&original, &filtered);
    let subset_time_ms = elapsed_ms(subset_start);
    let non_overlapping_count = non_overlapping.cardinality();
    info!(count = %non_overlapping_count, subset_time_ms, "phase 5: overlap filter applied");
    let phase5 = Phase5::applied(mope_edge_sets.len(), subset_time_ms, non_overlapping_count.as_str().to_owned());
    (non_overlapping, phase5)
}

fn warn_on_group_order_mismatch(file: &AutomorphismFile) {
    if !file.group_order_matches_count() {
        warn!(
            asserted = file.group_order,
            supplied = file.automorphisms.len(),
            "automorphism list's asserted group_order does not match the number of permutations supplied"
        );
    }
}

fn log_burnside_result(sum: &str, group_order: u64, divisible: bool, burnside_time_ms: u64) {
    if !divisible {
        warn!(sum, group_order, "Burnside sum is not evenly divisible by the group order; reporting the floor-divided quotient");
    }
    info!(sum, group_order, burnside_time_ms, "phase 6: Burnside aggregation complete");
}

fn run_burnside<B: BitMask>(
    t_reduced: &Zdd,
    file: &AutomorphismFile,
) -> Result<(Phase6, bool), Report<CliError>> {
    warn_on_group_order_mismatch(file);

    if file.automorphisms.is_empty() {
        return Err(Report::new(CliError::EmptyAutomorphismGroup));
    }

    let burnside_start = Instant::now();
    let counts = fixed_point_counts::<B>(t_reduced, &file.automorphisms);
    let result = unfold_zdd_algorithms::finalize(&counts)
        .change_context(CliError::EmptyAutomorphismGroup)?;
    let burnside_time_ms = elapsed_ms(burnside_start);

    log_burnside_result(result.sum.as_str(), result.group_order, result.divisible, burnside_time_ms);

    let invariant_counts: Vec<String> = counts.iter().map(|c| c.as_str().to_owned()).collect();
    Ok((
        Phase6::applied(
            file.group_order,
            burnside_time_ms,
            result.sum.as_str().to_owned(),
            result.orbit_count.as_str().to_owned(),
            invariant_counts,
        ),
        result.divisible,
    ))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
