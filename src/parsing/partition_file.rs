
use anyhow::{bail, Context};
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;
use strum_macros::EnumString;

use crate::data_types::partition::Partition;
use crate::parsing::label_file::load_label_partition;

/// How strictly the `;`-separated partition files are read
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, strum_macros::Display, EnumString, Serialize)]
pub enum ParseMode {
    /// Every non-empty field must be an element id
    #[default]
    #[strum(ascii_case_insensitive, serialize = "strict")]
    Strict,
    /// Non-integer fields are skipped, as are lines left without any element
    #[strum(ascii_case_insensitive, serialize = "lenient")]
    Lenient
}

/// The supported on-disk partition representations
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, strum_macros::Display, EnumString, Serialize, clap::ValueEnum)]
pub enum InputFormat {
    /// One cluster per line, element ids separated by ';'
    #[default]
    #[strum(ascii_case_insensitive, serialize = "partition")]
    #[clap(name = "partition")]
    Partition,
    /// One cluster label per line, the line order defines the element ids
    #[strum(ascii_case_insensitive, serialize = "labels")]
    #[clap(name = "labels")]
    Labels
}

/// Loads a partition from a file in any of the supported formats.
/// # Arguments
/// * `filename` - the file to load
/// * `format` - the file representation
/// * `mode` - strictness for the partition format, labels are always strict
/// # Errors
/// * if the file cannot be opened or parsed
/// * if the clusters do not form a valid partition
pub fn load_partition(filename: &Path, format: InputFormat, mode: ParseMode) -> anyhow::Result<Partition<usize>> {
    match format {
        InputFormat::Partition => load_partition_file(filename, mode),
        InputFormat::Labels => load_label_partition(filename)
    }
}

/// Loads a file with one cluster per line and element ids separated by ';'.
/// # Arguments
/// * `filename` - the file to load
/// * `mode` - strict or lenient handling of non-integer fields
/// # Errors
/// * if the file cannot be opened
/// * in strict mode, if a field is not an element id or a line has no elements
/// * if an element id is in more than one cluster
pub fn load_partition_file(filename: &Path, mode: ParseMode) -> anyhow::Result<Partition<usize>> {
    let file = std::fs::File::open(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;
    parse_partition(file, mode)
        .with_context(|| format!("Error while parsing {filename:?}:"))
}

/// Parses the `;`-separated partition format from any reader.
/// Blank lines are ignored, and whitespace around each field is trimmed.
/// # Arguments
/// * `reader` - the source of the text
/// * `mode` - strict or lenient handling of non-integer fields
pub fn parse_partition<R: std::io::Read>(reader: R, mode: ParseMode) -> anyhow::Result<Partition<usize>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true) // each line is a cluster of any size
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut clusters: Vec<Vec<usize>> = vec![];
    for result in csv_reader.records() {
        let row = result.context("Error while reading record")?;
        let line_number = row.position().map(|p| p.line()).unwrap_or_default();
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut cluster = Vec::with_capacity(row.len());
        for field in row.iter().filter(|field| !field.is_empty()) {
            match parse_element(field) {
                Some(element) => cluster.push(element),
                None => match mode {
                    ParseMode::Strict => bail!("Non-integer field {field:?} on line {line_number}"),
                    ParseMode::Lenient => debug!("Skipping non-integer field {field:?} on line {line_number}")
                }
            };
        }

        if cluster.is_empty() {
            match mode {
                ParseMode::Strict => bail!("No elements on line {line_number}"),
                ParseMode::Lenient => {
                    warn!("Skipping line {line_number} with no elements");
                    continue;
                }
            };
        }
        clusters.push(cluster);
    }

    let partition = Partition::new(clusters)?;
    Ok(partition)
}

/// Element ids are plain unsigned decimal numbers, no signs allowed
fn parse_element(field: &str) -> Option<usize> {
    if field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().ok()
    } else {
        None
    }
}
