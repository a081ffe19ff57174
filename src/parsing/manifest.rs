
use anyhow::{anyhow, bail, Context};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// One truth/inferred pair to compare in a batch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// User label for the comparison, unique within a manifest
    label: String,
    /// The true partition file
    truth_filename: PathBuf,
    /// The inferred partition file
    inferred_filename: PathBuf
}

impl ManifestEntry {
    // getters
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn truth_filename(&self) -> &Path {
        &self.truth_filename
    }

    pub fn inferred_filename(&self) -> &Path {
        &self.inferred_filename
    }
}

/// This will open a TSV file that is expected to have three columns and no header: label, truth file, inferred file.
/// Relative file paths are resolved against the folder containing the manifest.
/// Entries are returned in file order.
/// # Arguments
/// * `manifest_fn` - the manifest TSV
/// # Errors
/// * if the file cannot be opened or read
/// * if a row is missing a column
/// * if a label is used more than once
pub fn load_manifest(manifest_fn: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // no headers in the file, disable so we do not skip first row
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(manifest_fn)
        .with_context(|| format!("Error while opening {manifest_fn:?}:"))?;

    let manifest_folder = match manifest_fn.parent() {
        Some(parent) => parent.to_path_buf(),
        None => PathBuf::default()
    };

    let mut entries: IndexMap<String, ManifestEntry> = Default::default();
    for result in csv_reader.records() {
        let row = result.with_context(|| format!("Error while reading {manifest_fn:?}"))?;

        // make sure this is not a duplicate
        let label = row.get(0).ok_or(anyhow!("Missing label on row: {row:?}"))?;
        if entries.contains_key(label) {
            bail!("Duplicate label found: {label}");
        }

        let truth = row.get(1).ok_or(anyhow!("Missing truth filename on row: {row:?}"))?;
        let inferred = row.get(2).ok_or(anyhow!("Missing inferred filename on row: {row:?}"))?;
        let entry = ManifestEntry {
            label: label.to_string(),
            truth_filename: resolve_path(&manifest_folder, truth),
            inferred_filename: resolve_path(&manifest_folder, inferred)
        };
        entries.insert(label.to_string(), entry);
    }

    Ok(entries.into_values().collect())
}

fn resolve_path(folder: &Path, filename: &str) -> PathBuf {
    let raw_path = PathBuf::from(filename);
    if raw_path.has_root() {
        raw_path
    } else {
        folder.join(raw_path)
    }
}
