
use log::warn;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::similarity::{Measure, PartitionComparison};

/// Accumulates batch results and writes them out as a summary table
#[derive(Default)]
pub struct SummaryWriter {
    /// One row per comparison, in insertion order
    rows: Vec<SummaryRow>,
    /// Number of comparisons that succeeded
    solved_count: usize,
    /// Number of comparisons that failed
    error_count: usize
}

/// Contains all the data written to each row of our summary file
#[derive(Serialize)]
struct SummaryRow {
    /// User provided label
    label: String,
    /// "solved" or "error"; the remaining fields are empty for an error
    status: &'static str,
    /// Size of the shared universe
    num_elements: Option<usize>,
    /// Number of true clusters
    truth_clusters: Option<usize>,
    /// Number of inferred clusters
    inferred_clusters: Option<usize>,
    /// Pairs together in both partitions
    pairs_both: Option<u64>,
    /// Pairs together in the inferred partition only
    pairs_inferred_only: Option<u64>,
    /// Pairs together in the true partition only
    pairs_truth_only: Option<u64>,
    /// Pairs together in neither partition
    pairs_neither: Option<u64>,
    metric_ri: Option<f64>,
    metric_ari: Option<f64>,
    metric_ji: Option<f64>,
    metric_fmi: Option<f64>,
    metric_f1: Option<f64>,
    /// Empty when undefined
    metric_recall: Option<f64>,
    /// Empty when undefined
    metric_precision: Option<f64>
}

impl SummaryRow {
    /// Creates a new row from a label and a comparison
    fn new(label: String, comparison: &PartitionComparison) -> Self {
        let counts = comparison.pair_counts();
        Self {
            label,
            status: "solved",
            num_elements: Some(comparison.num_elements()),
            truth_clusters: Some(comparison.truth_clusters()),
            inferred_clusters: Some(comparison.inferred_clusters()),
            pairs_both: Some(counts.a),
            pairs_inferred_only: Some(counts.b),
            pairs_truth_only: Some(counts.c),
            pairs_neither: Some(counts.d),
            metric_ri: Some(comparison.score(Measure::Ri)),
            metric_ari: Some(comparison.score(Measure::Ari)),
            metric_ji: Some(comparison.score(Measure::Ji)),
            metric_fmi: Some(comparison.score(Measure::Fmi)),
            metric_f1: Some(comparison.score(Measure::F1)),
            metric_recall: comparison.recall(),
            metric_precision: comparison.precision()
        }
    }

    /// Creates a row for a label whose comparison failed
    fn failed(label: String) -> Self {
        Self {
            label,
            status: "error",
            num_elements: None,
            truth_clusters: None,
            inferred_clusters: None,
            pairs_both: None,
            pairs_inferred_only: None,
            pairs_truth_only: None,
            pairs_neither: None,
            metric_ri: None,
            metric_ari: None,
            metric_ji: None,
            metric_fmi: None,
            metric_f1: None,
            metric_recall: None,
            metric_precision: None
        }
    }
}

impl SummaryWriter {
    /// Creates a new writer to accumulate results
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the result of one batch entry; failed entries still get a row
    /// # Arguments
    /// * `label` - the manifest label
    /// * `comparison` - the scores, or None if the entry failed
    pub fn add_result(&mut self, label: &str, comparison: Option<&PartitionComparison>) {
        match comparison {
            Some(c) => {
                if c.recall().is_none() || c.precision().is_none() {
                    warn!("Recall or precision is undefined for {label:?}");
                }
                self.rows.push(SummaryRow::new(label.to_string(), c));
                self.solved_count += 1;
            },
            None => {
                self.rows.push(SummaryRow::failed(label.to_string()));
                self.error_count += 1;
            }
        };
    }

    // getters
    pub fn solved_count(&self) -> usize {
        self.solved_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Will write the summary out to the given file path
    /// # Arguments
    /// * `filename` - the filename for the output (tsv/csv)
    pub fn write_summary(&self, filename: &Path) -> csv::Result<()> {
        // modify the delimiter to "," if it ends with .csv
        let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
        let delimiter: u8 = if is_csv { b',' } else { b'\t' };
        let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_path(filename)?;

        for row in self.rows.iter() {
            csv_writer.serialize(row)?;
        }

        // save everything
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::partition::Partition;
    use crate::similarity::ScoreConfig;

    #[test]
    fn test_write_summary() {
        let truth = Partition::new(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap();
        let inferred = Partition::new(vec![vec![0], vec![1], vec![2], vec![3, 4, 5]]).unwrap();
        let singletons = Partition::new((0..6).map(|i| vec![i]).collect()).unwrap();
        let example = PartitionComparison::compare(&truth, &inferred, ScoreConfig::default()).unwrap();
        let vacuous = PartitionComparison::compare(&singletons, &singletons, ScoreConfig::default()).unwrap();

        let mut writer = SummaryWriter::new();
        writer.add_result("example", Some(&example));
        writer.add_result("failed", None);
        writer.add_result("vacuous", Some(&vacuous));
        assert_eq!(writer.solved_count(), 2);
        assert_eq!(writer.error_count(), 1);

        let out_fn = std::env::temp_dir().join(format!("clustsim_summary_test_{}.csv", std::process::id()));
        writer.write_summary(&out_fn).unwrap();
        let contents = std::fs::read_to_string(&out_fn).unwrap();
        std::fs::remove_file(&out_fn).unwrap();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "label,status,num_elements,truth_clusters,inferred_clusters,pairs_both,pairs_inferred_only,pairs_truth_only,pairs_neither,metric_ri,metric_ari,metric_ji,metric_fmi,metric_f1,metric_recall,metric_precision"
        );
        assert!(lines[1].starts_with("example,solved,6,3,4,1,2,2,10,"));
        assert_eq!(lines[2], "failed,error,,,,,,,,,,,,,,");
        assert!(lines[3].starts_with("vacuous,solved,6,6,6,0,0,0,15,"));
        assert!(lines[3].ends_with(",,"));
    }
}
