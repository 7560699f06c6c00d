//! Side table for values derived from a manifest after decoding.
//!
//! A [`Manifest`](crate::Manifest) never changes once decoded. Hashes that
//! workers compute later are recorded here instead, keyed by the path of the
//! manifest file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Hashes memoized for one package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageHashes {
    /// Hash of the package as a whole.
    pub hash: Option<String>,
    /// Hash of the package's tracked files.
    pub files_hash: Option<String>,
    /// Hash of the package's resolved external dependencies.
    pub external_deps_hash: Option<String>,
}

/// Thread-safe table of [`PackageHashes`] keyed by manifest path.
#[derive(Debug, Default)]
pub struct DerivedHashes {
    entries: RwLock<HashMap<PathBuf, PackageHashes>>,
}

impl DerivedHashes {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the hashes recorded for a manifest.
    #[must_use]
    pub fn get(&self, manifest: &Path) -> Option<PackageHashes> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(manifest).cloned()
    }

    /// Apply `update` to the entry for a manifest, creating it if needed, and
    /// return the updated hashes.
    pub fn update<F>(&self, manifest: &Path, update: F) -> PackageHashes
    where
        F: FnOnce(&mut PackageHashes),
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(manifest.to_path_buf()).or_default();
        update(entry);
        entry.clone()
    }

    /// Returns the package hash, computing and recording it on first use.
    ///
    /// `compute` runs outside the lock, so two racing callers may both
    /// compute; the first recorded value wins and is returned to both.
    pub fn hash_or_insert_with<F>(&self, manifest: &Path, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(hash) = self.get(manifest).and_then(|hashes| hashes.hash) {
            return hash;
        }
        let computed = compute();
        let hashes = self.update(manifest, |hashes| {
            hashes.hash.get_or_insert(computed);
        });
        hashes.hash.unwrap_or_default()
    }

    /// Forget everything recorded for a manifest.
    pub fn remove(&self, manifest: &Path) -> Option<PackageHashes> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(manifest)
    }

    /// Returns the number of manifests with recorded hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
