use std::fs;
use std::path::Path;

use intentify::cache::IntentCache;
use intentify::classify::IntentData;
use intentify::cluster::Granularity;
use intentify::config::Config;
use intentify::error::Result;
use intentify::service::IntentService;
use tempfile::TempDir;

fn config_in(dir: &Path) -> Config {
    Config {
        data_dir: dir.join("data"),
        cache_dir: dir.join("data").join("_cache"),
        ..Config::default()
    }
}

#[test]
fn cached_run_is_served_until_upload() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path());
    let service = IntentService::from_config(&config)?;
    let g = Granularity::new(20)?;

    service.upload(b"call me back\ncall me back\nrefund please\n")?;
    let first = service.intent_data(g)?;
    assert_eq!(first.metadata.lines, 3);
    assert_eq!(first.metadata.sentences, 2);

    // Editing the corpus behind the service's back does not invalidate the
    // snapshot; only an upload does.
    fs::write(config.data_file(), "where is my package\n")?;
    assert_eq!(service.intent_data(g)?, first);

    service.upload(b"where is my package\n")?;
    let second = service.intent_data(g)?;
    assert_eq!(second.metadata.lines, 1);
    assert_eq!(second.intents.values().next(), Some(&vec!["where is my package".to_string()]));
    Ok(())
}

#[test]
fn snapshot_file_layout() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path());
    let service = IntentService::from_config(&config)?;
    service.upload(b"call me back\ncall me back\n")?;

    service.intent_data(Granularity::new(7)?)?;

    let path = config.cache_dir.join("intent_data_t7.json");
    let text = fs::read_to_string(&path)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;

    assert_eq!(json["metadata"]["granularity"], 7);
    assert_eq!(json["metadata"]["lines"], 2);
    assert_eq!(json["metadata"]["sentences"], 1);
    assert_eq!(json["metadata"]["intents"], 1);
    assert_eq!(json["intents"]["call back"][0], "call me back");
    assert!(text.contains("\n  \"intents\": {"));
    Ok(())
}

#[test]
fn snapshots_are_shared_between_service_instances() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path());
    let g = Granularity::DEFAULT;

    let writer = IntentService::from_config(&config)?;
    writer.upload(b"refund please\n")?;
    let data = writer.intent_data(g)?;

    let reader = IntentCache::open(&config.cache_dir)?;
    assert_eq!(reader.load(g)?, Some(data));
    assert_eq!(reader.cached_granularities()?, vec![g]);
    Ok(())
}

#[test]
fn clear_cache_forces_recompute() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path());
    let service = IntentService::from_config(&config)?;
    let g = Granularity::new(50)?;

    service.upload(b"refund please\n")?;
    service.intent_data(g)?;
    fs::write(config.data_file(), "call me back\ncall me back\n")?;

    service.clear_cache()?;
    assert!(service.cache().cached_granularities()?.is_empty());

    let data = service.intent_data(g)?;
    assert_eq!(data.metadata.lines, 2);
    Ok(())
}

#[test]
fn missing_corpus_is_an_empty_run() -> Result<()> {
    let dir = TempDir::new()?;
    let service = IntentService::from_config(&config_in(dir.path()))?;

    let data = service.intent_data(Granularity::MAX)?;
    assert_eq!(data, IntentData::empty(Granularity::MAX));
    assert!(data.intents.is_empty());
    Ok(())
}

#[test]
fn unreadable_snapshot_is_recomputed() -> Result<()> {
    let dir = TempDir::new()?;
    let config = config_in(dir.path());
    let service = IntentService::from_config(&config)?;
    let g = Granularity::new(16)?;

    service.upload(b"refund please\n")?;
    let path = service.cache().path(g);
    fs::create_dir_all(&config.cache_dir)?;
    fs::write(&path, [0xff, 0xfe, 0x00])?;
    assert_eq!(service.cache().load(g)?, None);

    let data = service.intent_data(g)?;
    assert_eq!(data.metadata.lines, 1);
    assert_eq!(service.cache().load(g)?, Some(data));
    Ok(())
}
