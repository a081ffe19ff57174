
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::pair_counter::CountStrategy;
use crate::parsing::partition_file::{InputFormat, ParseMode};
use crate::similarity::RecallPrecisionPolicy;

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct BatchSettings {
    #[clap(skip)]
    clustsim_version: String,

    /// Manifest TSV with columns: label, truth file, inferred file
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "manifest")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub manifest_filename: PathBuf,

    /// Output summary file (.csv for comma-separated, otherwise tab-separated)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Format of every partition file
    #[clap(long = "input-format")]
    #[clap(value_name = "FORMAT")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "partition")]
    pub input_format: InputFormat,

    /// Skips non-integer fields instead of failing on them
    #[clap(long = "lenient")]
    #[clap(help_heading = Some("Input/Output"))]
    pub lenient: bool,

    /// Pair counting algorithm
    #[clap(long = "strategy")]
    #[clap(value_name = "STRATEGY")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(default_value = "indexed")]
    pub count_strategy: CountStrategy,

    /// Reports recall and precision as 1.0 when no pairs are co-clustered, instead of leaving them blank
    #[clap(long = "vacuous-recall")]
    #[clap(help_heading = Some("Scoring"))]
    pub vacuous_recall: bool,

    /// Number of threads to use for the comparisons
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl BatchSettings {
    pub fn parse_mode(&self) -> ParseMode {
        if self.lenient { ParseMode::Lenient } else { ParseMode::Strict }
    }

    pub fn recall_precision_policy(&self) -> RecallPrecisionPolicy {
        if self.vacuous_recall { RecallPrecisionPolicy::VacuousAgreement } else { RecallPrecisionPolicy::Strict }
    }
}

pub fn check_batch_settings(mut settings: BatchSettings) -> anyhow::Result<BatchSettings> {
    // hard code the version in
    settings.clustsim_version = FULL_VERSION.clone();
    info!("clustsim version: {:?}", &settings.clustsim_version);
    info!("Sub-command: batch");
    info!("Inputs:");

    check_required_filename(&settings.manifest_filename, "Manifest")?;
    info!("\tManifest: {:?}", &settings.manifest_filename);
    info!("\tFormat: {}", settings.input_format);
    info!("\tParsing: {}", settings.parse_mode());

    info!("Scoring:");
    info!("\tCount strategy: {}", settings.count_strategy);
    info!("\tUndefined recall/precision: {}", settings.recall_precision_policy());

    info!("Outputs:");
    info!("\tSummary: {:?}", &settings.output_filename);

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_settings() {
        let settings = BatchSettings {
            manifest_filename: PathBuf::from("test_data/batch/manifest.tsv"),
            output_filename: PathBuf::from("summary.tsv"),
            lenient: true,
            threads: 0,
            ..Default::default()
        };
        let settings = check_batch_settings(settings).unwrap();
        assert_eq!(settings.threads, 1);
        assert_eq!(settings.parse_mode(), ParseMode::Lenient);

        let settings = BatchSettings {
            manifest_filename: PathBuf::from("test_data/batch/missing.tsv"),
            ..Default::default()
        };
        assert!(check_batch_settings(settings).is_err());
    }
}
