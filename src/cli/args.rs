//! Command line argument parsing for the Intentify CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::cluster::Granularity;
use crate::config::Config;
use crate::error::Result;

/// Intentify - discover intents in call and message logs
#[derive(Parser, Debug, Clone)]
#[command(name = "intentify")]
#[command(about = "Group utterance logs into labeled intents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IntentifyArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "INTENTIFY_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the corpus file
    #[arg(long, env = "INTENTIFY_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding cached runs
    #[arg(long, env = "INTENTIFY_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl IntentifyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Load the config file (or defaults) and apply directory overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = cache_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify the corpus and report its intents
    Classify(ClassifyArgs),

    /// Install a new corpus file and clear all cached runs
    Upload(UploadArgs),

    /// Delete all cached runs
    #[command(name = "clear-cache")]
    ClearCache,

    /// Show run metadata only
    Metadata(MetadataArgs),
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Granularity 0-100; higher values give more, finer intents
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub granularity: Option<u32>,

    /// Recompute even if a cached run exists (the result is not stored)
    #[arg(long)]
    pub no_cache: bool,

    /// Classify this file instead of the configured corpus (never cached)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Draw the histogram with vertical columns
    #[arg(long)]
    pub vertical: bool,
}

/// Arguments for installing a corpus
#[derive(Parser, Debug, Clone)]
pub struct UploadArgs {
    /// Text file with one call or message per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for showing metadata
#[derive(Parser, Debug, Clone)]
pub struct MetadataArgs {
    /// Granularity 0-100
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub granularity: Option<u32>,
}

/// Resolve an optional command-line granularity against the configured default.
pub fn resolve_granularity(requested: Option<u32>, config: &Config) -> Result<Granularity> {
    match requested {
        Some(value) => Granularity::new(value),
        None => Ok(config.default_granularity),
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_classify_command() {
        let args = IntentifyArgs::try_parse_from([
            "intentify",
            "classify",
            "--granularity",
            "40",
            "--no-cache",
            "--vertical",
        ])
        .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.granularity, Some(40));
            assert!(classify_args.no_cache);
            assert!(classify_args.vertical);
            assert!(classify_args.data.is_none());
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_granularity_out_of_range() {
        let result =
            IntentifyArgs::try_parse_from(["intentify", "classify", "--granularity", "101"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_and_clear_cache() {
        let args = IntentifyArgs::try_parse_from(["intentify", "upload", "calls.txt"]).unwrap();
        if let Command::Upload(upload_args) = args.command {
            assert_eq!(upload_args.file, PathBuf::from("calls.txt"));
        } else {
            panic!("Expected Upload command");
        }

        let args = IntentifyArgs::try_parse_from(["intentify", "clear-cache"]).unwrap();
        assert!(matches!(args.command, Command::ClearCache));
    }

    #[test]
    fn test_verbosity_and_format() {
        let args = IntentifyArgs::try_parse_from([
            "intentify", "-vvv", "--format", "json", "metadata", "-g", "5",
        ])
        .unwrap();
        assert_eq!(args.verbosity(), 3);
        assert_eq!(args.output_format, OutputFormat::Json);

        let args = IntentifyArgs::try_parse_from(["intentify", "-q", "-v", "clear-cache"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = IntentifyArgs::try_parse_from(["intentify", "clear-cache"]).unwrap();
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_directory_overrides() {
        let args = IntentifyArgs::try_parse_from([
            "intentify",
            "--data-dir",
            "/tmp/calls",
            "--cache-dir",
            "/tmp/calls/cache",
            "clear-cache",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/calls"));
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/calls/cache"));
        assert_eq!(config.data_file_name, "contact_data.txt");
    }

    #[test]
    fn test_resolve_granularity() {
        let config = Config::default();
        assert_eq!(resolve_granularity(None, &config).unwrap().value(), 16);
        assert_eq!(resolve_granularity(Some(70), &config).unwrap().value(), 70);
    }
}
