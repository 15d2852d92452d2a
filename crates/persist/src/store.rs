// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Real (file-backed, atomic) and fake (in-memory) [`crate::ConfigStore`]
//! implementations.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::warn;

use crate::ConfigStore;

/// Errors from a [`ConfigStore`] operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// File-backed store rooted at a directory, one file per key. Writes
/// are atomic: write to `<key>.tmp`, `fsync`, then rename over the
/// real file, so a crash mid-write never corrupts the persisted blob
/// (grounded in the teacher's snapshot `save()`, which uses the same
/// write-tmp-then-rename sequence).
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }

        match fs::rename(&tmp_path, &path) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(key, error = %e, "failed to persist filter blob, leaving tmp file for inspection");
                Err(e.into())
            }
        }
    }
}

/// In-memory store for tests — the `test-support` fake for this
/// crate's one external boundary.
#[derive(Default)]
pub struct InMemoryStore {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for InMemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.data.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
