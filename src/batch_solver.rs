/*!
# Batch Solver
Scores many truth/inferred partition pairs, one per manifest entry.
Each entry is independent, so the work is spread over the rayon thread pool; results come back in manifest order.
A failed entry is logged and reported as `None` so that one bad file does not stop the batch.
*/
use anyhow::Context;
use indicatif::ParallelProgressIterator;
use log::{debug, error};
use rayon::prelude::*;
use std::path::Path;

use crate::parsing::manifest::ManifestEntry;
use crate::parsing::partition_file::{load_partition, InputFormat, ParseMode};
use crate::similarity::{PartitionComparison, ScoreConfig};
use crate::util::progress_bar::get_progress_style;

/// Loads a truth and an inferred partition from disk and scores them.
/// # Arguments
/// * `truth_fn` - the true partition file
/// * `inferred_fn` - the inferred partition file
/// * `format` - the file representation shared by both files
/// * `mode` - strictness for the partition format
/// * `config` - scoring controls
/// # Errors
/// * if either file fails to load
/// * if the partitions cover different elements
pub fn compare_files(
    truth_fn: &Path, inferred_fn: &Path,
    format: InputFormat, mode: ParseMode, config: ScoreConfig
) -> anyhow::Result<PartitionComparison> {
    let truth = load_partition(truth_fn, format, mode)?;
    let inferred = load_partition(inferred_fn, format, mode)?;
    debug!("Loaded {} truth clusters and {} inferred clusters", truth.num_clusters(), inferred.num_clusters());
    let comparison = PartitionComparison::compare(&truth, &inferred, config)
        .with_context(|| format!("Error while comparing {truth_fn:?} to {inferred_fn:?}:"))?;
    Ok(comparison)
}

/// Scores every manifest entry in parallel.
/// # Arguments
/// * `entries` - the comparisons to run
/// * `format` - the file representation shared by all files
/// * `mode` - strictness for the partition format
/// * `config` - scoring controls
pub fn solve_batch(
    entries: Vec<ManifestEntry>,
    format: InputFormat, mode: ParseMode, config: ScoreConfig
) -> Vec<(ManifestEntry, Option<PartitionComparison>)> {
    let style = get_progress_style();
    entries.into_par_iter()
        .map(|entry| {
            let comparison = match compare_files(entry.truth_filename(), entry.inferred_filename(), format, mode, config) {
                Ok(c) => Some(c),
                Err(e) => {
                    error!("Error while solving batch entry {:?}: {e:#}", entry.label());
                    None
                }
            };
            debug!("{} => {comparison:?}", entry.label());
            (entry, comparison)
        })
        .progress_with_style(style)
        .collect()
}
