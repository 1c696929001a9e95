//! Granularity-keyed snapshots of classification runs.
//!
//! Each run is stored as pretty-printed JSON in
//! `{cache_dir}/intent_data_t{granularity}.json`. Snapshots are only valid for
//! the corpus they were computed from; whoever replaces the corpus must call
//! [`IntentCache::clear`].

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::classify::IntentData;
use crate::cluster::Granularity;
use crate::error::{IntentifyError, Result};

/// On-disk cache of [`IntentData`] snapshots.
#[derive(Debug)]
pub struct IntentCache {
    dir: PathBuf,
    /// Serializes compute-and-store so one granularity is written once.
    write_lock: Mutex<()>,
}

impl IntentCache {
    /// Open (creating if needed) the cache directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(IntentCache {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of the snapshot for `granularity`.
    pub fn file_name(granularity: Granularity) -> String {
        format!("intent_data_t{granularity}.json")
    }

    pub fn path(&self, granularity: Granularity) -> PathBuf {
        self.dir.join(Self::file_name(granularity))
    }

    /// Load the snapshot for `granularity`.
    ///
    /// A missing file is `Ok(None)`. So is a file that cannot be read or
    /// parsed; it is logged and treated as a miss so the run is recomputed.
    pub fn load(&self, granularity: Granularity) -> Result<Option<IntentData>> {
        let path = self.path(granularity);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                log::warn!("Ignoring unreadable snapshot {}: {e}", path.display());
                return Ok(None);
            }
        };

        match serde_json::from_str::<IntentData>(&text) {
            Ok(data) if data.metadata.granularity == granularity => Ok(Some(data)),
            Ok(data) => {
                log::warn!(
                    "Ignoring {}: it holds granularity {}",
                    path.display(),
                    data.metadata.granularity
                );
                Ok(None)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable snapshot {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    /// Write the snapshot for the granularity recorded in `data`.
    pub fn store(&self, data: &IntentData) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(data.metadata.granularity);

        let temp_file = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, data)?;
            writer.flush()?;
        }
        temp_file.persist(&path).map_err(|e| e.error)?;

        log::debug!("Stored {}", path.display());
        Ok(path)
    }

    /// Return the cached run for `granularity`, or compute, store and return
    /// it. Concurrent callers are serialized so a run is computed once.
    pub fn get_or_compute<F>(&self, granularity: Granularity, compute: F) -> Result<IntentData>
    where
        F: FnOnce() -> Result<IntentData>,
    {
        let _guard = self.write_lock.lock();

        if let Some(data) = self.load(granularity)? {
            log::debug!("Cache hit for granularity {granularity}");
            return Ok(data);
        }

        log::debug!("Cache miss for granularity {granularity}");
        let data = compute()?;
        if data.metadata.granularity != granularity {
            return Err(IntentifyError::cache(format!(
                "computed run has granularity {}, expected {granularity}",
                data.metadata.granularity
            )));
        }
        self.store(&data)?;
        Ok(data)
    }

    /// Delete every snapshot by removing and recreating the directory.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();

        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&self.dir)?;

        log::info!("Cleared cache {}", self.dir.display());
        Ok(())
    }

    /// Granularities with a snapshot on disk, ascending.
    pub fn cached_granularities(&self) -> Result<Vec<Granularity>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let Some(value) = name
                .to_str()
                .and_then(|n| n.strip_prefix("intent_data_t"))
                .and_then(|n| n.strip_suffix(".json"))
                .and_then(|n| n.parse::<u32>().ok())
            else {
                continue;
            };
            if let Ok(granularity) = Granularity::new(value) {
                found.push(granularity);
            }
        }
        found.sort();
        Ok(found)
    }
}
