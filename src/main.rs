
use log::{LevelFilter, error, info, warn};
use serde::Serialize;
use std::time::Instant;

use clustsim::batch_solver::solve_batch;
use clustsim::cli::batch::{BatchSettings, check_batch_settings};
use clustsim::cli::compare::{CompareSettings, check_compare_settings};
use clustsim::cli::core::{Commands, get_cli};
use clustsim::parsing::manifest::load_manifest;
use clustsim::parsing::partition_file::load_partition;
use clustsim::similarity::{
    cluster_similarity_scores, recall_and_precision, Measure, PartitionComparison, ScoreConfigBuilder
};
use clustsim::util::json_io::save_json;
use clustsim::writers::score_line::format_score_line;
use clustsim::writers::summary::SummaryWriter;

/// Everything saved by `compare --output-json`
#[derive(Serialize)]
struct CompareReport<'a> {
    settings: &'a CompareSettings,
    comparison: &'a PartitionComparison
}

fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

fn run_compare(settings: CompareSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // load both partitions
    let parse_mode = settings.parse_mode();
    info!("Loading truth partition...");
    let truth = match load_partition(&settings.truth_filename, settings.input_format, parse_mode) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading truth partition: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("\t{} elements in {} clusters", truth.num_elements(), truth.num_clusters());

    info!("Loading inferred partition...");
    let inferred = match load_partition(&settings.inferred_filename, settings.input_format, parse_mode) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading inferred partition: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("\t{} elements in {} clusters", inferred.num_elements(), inferred.num_clusters());

    let score_config = match ScoreConfigBuilder::default()
        .count_strategy(settings.count_strategy)
        .recall_precision_policy(settings.recall_precision_policy())
        .build() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Error while building score config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    info!("Scoring partitions...");
    let scores: Vec<f64> = if settings.measures.is_empty() {
        // ARI and RI are symmetric; recall and precision take the inferred partition first
        let mut scores = match cluster_similarity_scores(&truth, &inferred, &[Measure::Ari.to_string(), Measure::Ri.to_string()], score_config) {
            Ok(s) => s,
            Err(e) => {
                error!("Error while scoring partitions: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        };
        match recall_and_precision(&inferred, &truth, score_config) {
            Ok((recall, precision)) => {
                scores.push(recall);
                scores.push(precision);
            },
            Err(e) => {
                error!("Error while computing recall and precision: {e:#}");
                error!("Use --vacuous-recall to report 1.0 when no pairs are co-clustered.");
                std::process::exit(exitcode::DATAERR);
            }
        };
        scores
    } else {
        match cluster_similarity_scores(&truth, &inferred, settings.measures.as_slice(), score_config) {
            Ok(s) => s,
            Err(e) => {
                error!("Error while scoring partitions: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        }
    };
    println!("{}", format_score_line(&scores));

    if let Some(json_fn) = settings.output_json.as_deref() {
        let comparison = match PartitionComparison::compare(&truth, &inferred, score_config) {
            Ok(c) => c,
            Err(e) => {
                error!("Error while building comparison report: {e:#}");
                std::process::exit(exitcode::DATAERR);
            }
        };
        if comparison.recall().is_none() || comparison.precision().is_none() {
            warn!("Recall or precision is undefined and will be null in the report.");
        }

        info!("Saving JSON report to {json_fn:?}...");
        let report = CompareReport {
            settings: &settings,
            comparison: &comparison
        };
        if let Err(e) = save_json(&report, json_fn) {
            error!("Error while saving JSON report: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Comparison completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_batch(settings: BatchSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_batch_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // set up the number of threads for rayon
    match rayon::ThreadPoolBuilder::new().num_threads(settings.threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    info!("Loading manifest...");
    let entries = match load_manifest(&settings.manifest_filename) {
        Ok(e) => e,
        Err(e) => {
            error!("Error while loading manifest: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("\t{} comparisons to run", entries.len());

    let score_config = match ScoreConfigBuilder::default()
        .count_strategy(settings.count_strategy)
        .recall_precision_policy(settings.recall_precision_policy())
        .build() {
        Ok(sc) => sc,
        Err(e) => {
            error!("Error while building score config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    info!("Comparing partitions...");
    let all_results = solve_batch(entries, settings.input_format, settings.parse_mode(), score_config);

    let mut summary_writer = SummaryWriter::new();
    for (entry, opt_comparison) in all_results.iter() {
        summary_writer.add_result(entry.label(), opt_comparison.as_ref());
    }
    info!("Solved:error comparisons: {} : {}", summary_writer.solved_count(), summary_writer.error_count());

    info!("Saving output summary to {:?}...", settings.output_filename);
    if let Err(e) = summary_writer.write_summary(&settings.output_filename) {
        error!("Error while saving summary file: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Batch completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        },
        Commands::Batch(settings) => {
            run_batch(*settings);
        }
    }

    info!("Process finished successfully.");
}
