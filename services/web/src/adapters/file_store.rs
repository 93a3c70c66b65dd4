//! services/web/src/adapters/file_store.rs
//!
//! A `KeyValueStore` that keeps one UTF-8 file per key in a data directory.

use inventory_core::ports::{KeyValueStore, PortError, PortResult};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store, creating `root` if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> PortResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            PortError::Storage(format!("cannot create {}: {}", root.display(), e))
        })?;
        debug!("File store opened at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PortResult<PathBuf> {
        let name = sanitize_key(key)?;
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Storage(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write never leaves a truncated value behind.
    fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|()| fs::rename(&tmp, &path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                PortError::Storage(format!("cannot write {}: {}", path.display(), e))
            })
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::Storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Maps a key onto a safe file stem: anything outside `[A-Za-z0-9_.-]`
/// becomes `_`, and stems made only of dots or underscores are refused.
fn sanitize_key(key: &str) -> PortResult<String> {
    let safe: String = key
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if safe.chars().all(|ch| ch == '.' || ch == '_') {
        return Err(PortError::InvalidInput(format!("unusable storage key '{key}'")));
    }
    Ok(safe)
}
