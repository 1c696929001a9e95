//! Command implementations for the Intentify CLI.

use std::fs;
use std::time::Instant;

use crate::cache::IntentCache;
use crate::classify::IntentData;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::Config;
use crate::corpus::{install_corpus, read_corpus};
use crate::error::{IntentifyError, Result};
use crate::service::IntentService;

/// Execute a CLI command.
pub fn execute_command(args: IntentifyArgs) -> Result<()> {
    let config = args.load_config()?;

    match &args.command {
        Command::Classify(classify_args) => classify(classify_args, &config, &args),
        Command::Upload(upload_args) => upload(upload_args, &config, &args),
        Command::ClearCache => clear_cache(&config, &args),
        Command::Metadata(metadata_args) => show_metadata(metadata_args, &config, &args),
    }
}

/// Classify the corpus and print the report.
fn classify(args: &ClassifyArgs, config: &Config, cli_args: &IntentifyArgs) -> Result<()> {
    let granularity = resolve_granularity(args.granularity, config)?;
    let start = Instant::now();

    let data = match &args.data {
        Some(path) => {
            if !path.is_file() {
                return Err(IntentifyError::invalid_argument(format!(
                    "corpus file not found: {}",
                    path.display()
                )));
            }
            let corpus = read_corpus(Some(path));
            let classifier = config.build_classifier()?;
            let intents = classifier.classify(&corpus.sentences, granularity)?;
            IntentData::new(granularity, &corpus, intents)
        }
        None => {
            let service = IntentService::from_config(config)?;
            if args.no_cache {
                service.compute(granularity)?
            } else {
                service.intent_data(granularity)?
            }
        }
    };

    log::info!(
        "Found {} intents at granularity {granularity} in {:.2?}",
        data.metadata.intents,
        start.elapsed()
    );

    let horizontal = config.histogram_horizontal && !args.vertical;
    output_intent_data(&data, cli_args, horizontal)
}

/// Install a corpus file and drop every cached run. Models are not loaded.
fn upload(args: &UploadArgs, config: &Config, cli_args: &IntentifyArgs) -> Result<()> {
    let contents = fs::read(&args.file).map_err(|e| {
        IntentifyError::invalid_argument(format!("cannot read {}: {e}", args.file.display()))
    })?;

    let target = config.data_file();
    install_corpus(&target, &contents)?;
    IntentCache::open(&config.cache_dir)?.clear()?;

    output_status(
        &format!("Installed {} as {}", args.file.display(), target.display()),
        &StatusResult {
            action: "upload".to_string(),
            path: target.to_string_lossy().to_string(),
        },
        cli_args,
    )
}

fn clear_cache(config: &Config, cli_args: &IntentifyArgs) -> Result<()> {
    let cache = IntentCache::open(&config.cache_dir)?;
    cache.clear()?;

    output_status(
        &format!("Cleared {}", cache.dir().display()),
        &StatusResult {
            action: "clear-cache".to_string(),
            path: cache.dir().to_string_lossy().to_string(),
        },
        cli_args,
    )
}

/// Print only the metadata of a run, computing it if it is not cached.
fn show_metadata(args: &MetadataArgs, config: &Config, cli_args: &IntentifyArgs) -> Result<()> {
    let granularity = resolve_granularity(args.granularity, config)?;
    let service = IntentService::from_config(config)?;
    let data = service.intent_data(granularity)?;

    output_metadata(&data.metadata, cli_args)
}
