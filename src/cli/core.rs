
use anyhow::bail;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::batch::BatchSettings;
use crate::cli::compare::CompareSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string
    pub static ref AFTER_HELP: String = format!("Distributed under the {} license.
This program comes with ABSOLUTELY NO WARRANTY.", env!("CARGO_PKG_LICENSE"));
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// clustsim, agreement statistics between inferred and true clusterings.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Scores one inferred partition against a true partition
    Compare(Box<CompareSettings>),
    /// Scores every truth/inferred pair listed in a manifest
    Batch(Box<BatchSettings>)
}

/// Parses the command line.
/// Help and version requests exit with status 0; any other parsing problem prints the usage to stderr and exits with status 1.
pub fn get_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp |
            ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // clap renders errors with the usage line appended
                let _ = e.print();
                std::process::exit(1);
            }
        }
    }
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from(["clustsim", "compare", "truth.txt", "inferred.txt", "--lenient"]).unwrap();
        match cli.command {
            Commands::Compare(settings) => {
                assert_eq!(settings.truth_filename, Path::new("truth.txt"));
                assert_eq!(settings.inferred_filename, Path::new("inferred.txt"));
                assert!(settings.lenient);
                assert!(settings.measures.is_empty());
            },
            Commands::Batch(_) => panic!("expected compare")
        };
    }

    #[test]
    fn test_parse_measures() {
        let cli = Cli::try_parse_from(["clustsim", "compare", "t.txt", "i.txt", "--measures", "ji,ari", "--strategy", "naive"]).unwrap();
        match cli.command {
            Commands::Compare(settings) => {
                assert_eq!(settings.measures, vec!["ji".to_string(), "ari".to_string()]);
                assert_eq!(settings.count_strategy, crate::pair_counter::CountStrategy::Naive);
            },
            Commands::Batch(_) => panic!("expected compare")
        };
    }

    #[test]
    fn test_wrong_positional_count() {
        assert!(Cli::try_parse_from(["clustsim", "compare", "truth.txt"]).is_err());
        assert!(Cli::try_parse_from(["clustsim", "compare", "a.txt", "b.txt", "c.txt"]).is_err());
    }

    #[test]
    fn test_after_help() {
        assert!(AFTER_HELP.starts_with("Distributed under the MIT license."));
        assert!(!AFTER_HELP.contains("Copyright"));
    }

    #[test]
    fn test_check_required_filename() {
        assert!(check_required_filename(Path::new("test_data/partitions/truth.txt"), "Truth").is_ok());
        let error = check_required_filename(Path::new("test_data/missing.txt"), "Truth").unwrap_err();
        assert_eq!(error.to_string(), "Truth does not exist: \"test_data/missing.txt\"");
    }
}
