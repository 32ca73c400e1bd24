//! File-backed cache store
//!
//! The in-memory map is the only writable copy. The file on disk is the last
//! flushed snapshot and is replaced atomically on every `put`.

use crate::cache::{CacheError, CacheResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persistent URL → body cache
///
/// Construct once per process with [`CacheStore::load`] and pass it by
/// `&mut` into the fetch pipeline.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl CacheStore {
    /// Loads the cache from `path`
    ///
    /// Never fails: a missing file or malformed content yields an empty store
    /// that will be written to `path` on the first `put`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        tracing::info!(
            "Loaded {} cached page(s) from {}",
            entries.len(),
            path.display()
        );
        Self { path, entries }
    }

    /// Looks up a cached body by exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if `key` has a cached body
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key` and flushes the full snapshot to disk
    ///
    /// The in-memory entry is kept even when the flush fails; the error is
    /// returned so the caller can stop before relying on the durable copy.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> CacheResult<()> {
        let key = key.into();
        tracing::debug!("Caching {}", key);
        self.entries.insert(key, value.into());
        save_entries(&self.path, &self.entries)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Location of the durable snapshot
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total bytes of keys and bodies held in memory
    pub fn size_bytes(&self) -> u64 {
        self.entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }

    /// Iterates cached URLs in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Reads a cache snapshot, treating any failure as an empty cache
pub fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No cache file at {}, starting cold", path.display());
            return BTreeMap::new();
        }
        Err(e) => {
            tracing::warn!("Cannot read cache {}: {}; starting cold", path.display(), e);
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cache {} is malformed: {}; starting cold", path.display(), e);
            BTreeMap::new()
        }
    }
}

/// Writes the whole mapping to `path`, replacing any previous snapshot
///
/// Data goes to a sibling temporary file first and is renamed into place.
pub fn save_entries(path: &Path, entries: &BTreeMap<String, String>) -> CacheResult<()> {
    let io_err = |source: std::io::Error| CacheError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let json = serde_json::to_string(entries)?;
    let temp = temp_path(path);
    fs::write(&temp, json).map_err(io_err)?;
    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(io_err(e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
