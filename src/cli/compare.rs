
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::pair_counter::CountStrategy;
use crate::parsing::partition_file::{InputFormat, ParseMode};
use crate::similarity::{Measure, RecallPrecisionPolicy};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CompareSettings {
    #[clap(skip)]
    clustsim_version: String,

    /// Ground-truth partition file
    #[clap(value_name = "TRUTH")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_filename: PathBuf,

    /// Inferred partition file
    #[clap(value_name = "INFERRED")]
    #[clap(help_heading = Some("Input/Output"))]
    pub inferred_filename: PathBuf,

    /// Format of both partition files
    #[clap(long = "input-format")]
    #[clap(value_name = "FORMAT")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "partition")]
    pub input_format: InputFormat,

    /// Skips non-integer fields instead of failing on them
    #[clap(long = "lenient")]
    #[clap(help_heading = Some("Input/Output"))]
    pub lenient: bool,

    /// Optional JSON report with every score; ".gz" output is compressed
    #[clap(long = "output-json")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_json: Option<PathBuf>,

    /// Comma-separated measures to print instead of the default "ARI, RI, recall, precision" line
    #[clap(long = "measures")]
    #[clap(value_name = "NAMES")]
    #[clap(value_delimiter = ',')]
    #[clap(help_heading = Some("Scoring"))]
    pub measures: Vec<String>,

    /// Pair counting algorithm
    #[clap(long = "strategy")]
    #[clap(value_name = "STRATEGY")]
    #[clap(help_heading = Some("Scoring"))]
    #[clap(default_value = "indexed")]
    pub count_strategy: CountStrategy,

    /// Reports recall and precision as 1.0 when no pairs are co-clustered, instead of failing
    #[clap(long = "vacuous-recall")]
    #[clap(help_heading = Some("Scoring"))]
    pub vacuous_recall: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl CompareSettings {
    pub fn parse_mode(&self) -> ParseMode {
        if self.lenient { ParseMode::Lenient } else { ParseMode::Strict }
    }

    pub fn recall_precision_policy(&self) -> RecallPrecisionPolicy {
        if self.vacuous_recall { RecallPrecisionPolicy::VacuousAgreement } else { RecallPrecisionPolicy::Strict }
    }
}

pub fn check_compare_settings(mut settings: CompareSettings) -> anyhow::Result<CompareSettings> {
    // hard code the version in
    settings.clustsim_version = FULL_VERSION.clone();
    info!("clustsim version: {:?}", &settings.clustsim_version);
    info!("Sub-command: compare");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.truth_filename, "Truth partition")?;
    check_required_filename(&settings.inferred_filename, "Inferred partition")?;
    info!("\tTruth: {:?}", &settings.truth_filename);
    info!("\tInferred: {:?}", &settings.inferred_filename);
    info!("\tFormat: {}", settings.input_format);
    info!("\tParsing: {}", settings.parse_mode());

    // validate measures now so we fail before loading anything
    info!("Scoring:");
    if settings.measures.is_empty() {
        info!("\tMeasures: ari, ri, recall, precision");
    } else {
        Measure::parse_all(settings.measures.as_slice())?;
        info!("\tMeasures: {}", settings.measures.join(", "));
    }
    info!("\tCount strategy: {}", settings.count_strategy);
    info!("\tUndefined recall/precision: {}", settings.recall_precision_policy());

    info!("Outputs:");
    if let Some(json_fn) = settings.output_json.as_deref() {
        info!("\tJSON report: {json_fn:?}");
    } else {
        info!("\tJSON report: None");
    }

    Ok(settings)
}
