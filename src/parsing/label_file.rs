
use anyhow::Context;
use std::path::Path;

use crate::data_types::partition::{labels_to_lists, LabelVector, Partition};

/// Loads a file with one cluster label per line and converts it to a partition.
/// Element `i` is the `i`-th non-blank line; only the first tab-separated column is used.
/// # Arguments
/// * `filename` - the file to load
/// # Errors
/// * if the file cannot be opened or read
pub fn load_label_partition(filename: &Path) -> anyhow::Result<Partition<usize>> {
    let labels = load_label_vector(filename)?;
    Ok(labels_to_lists(&labels))
}

/// Loads the raw labels from a file with one label per line.
/// # Arguments
/// * `filename` - the file to load
/// # Errors
/// * if the file cannot be opened or read
pub fn load_label_vector(filename: &Path) -> anyhow::Result<LabelVector<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // no headers in the file, disable so we do not skip first row
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut labels = vec![];
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {filename:?}"))?;
        match row.get(0) {
            Some(label) if !label.is_empty() => labels.push(label.to_string()),
            _ => {}
        };
    }
    Ok(LabelVector::new(labels))
}
