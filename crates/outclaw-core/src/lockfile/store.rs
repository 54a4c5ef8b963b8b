//! Lock file persistence.
//!
//! Reads never fail: a missing or unreadable lock file is the empty manifest.
//! Every read-modify-write holds an exclusive advisory lock on a sibling
//! `<lock>.lock` file and replaces the lock file atomically (tmp + rename), so
//! concurrent installs into the same scope serialize instead of dropping
//! each other's entries.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use fd_lock::RwLock;

use crate::error::{Error, Result};

use super::types::{MANIFEST_VERSION, Manifest};

/// Lock file storage for one scope.
#[derive(Debug, Clone)]
pub struct LockfileStore {
    path: PathBuf,
}

impl LockfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the manifest, falling back to an empty one.
    pub fn load(&self) -> Manifest {
        self.read_existing().unwrap_or_default()
    }

    /// Apply `mutate` to the current manifest and persist the result.
    pub fn update<F>(&self, mutate: F) -> Result<Manifest>
    where
        F: FnOnce(&mut Manifest),
    {
        self.with_lock(|| {
            let mut manifest = self.load();
            mutate(&mut manifest);
            self.save(&manifest)?;
            Ok(manifest)
        })
    }

    /// Drop the entry for `name`.
    ///
    /// A missing or unreadable lock file is left untouched. Returns whether an
    /// entry was removed.
    pub fn remove(&self, name: &str) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        self.with_lock(|| {
            let Some(mut manifest) = self.read_existing() else {
                return Ok(false);
            };
            let removed = manifest.remove(name).is_some();
            self.save(&manifest)?;
            Ok(removed)
        })
    }

    fn read_existing(&self) -> Option<Manifest> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "cannot read lock file");
                }
                return None;
            }
        };

        match serde_json::from_slice::<Manifest>(&bytes) {
            Ok(manifest) if manifest.version == MANIFEST_VERSION => Some(manifest),
            Ok(manifest) => {
                tracing::warn!(
                    path = %self.path.display(),
                    version = manifest.version,
                    "unsupported lock file version, treating as empty"
                );
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unparsable lock file, treating as empty");
                None
            }
        }
    }

    /// Save atomically (tmp + rename).
    fn save(&self, manifest: &Manifest) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(manifest)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(|e| Error::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(())
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let lock_path = self.path.with_extension("json.lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| Error::io(&lock_path, e))?;
        let mut lock = RwLock::new(file);
        let _guard = lock.write().map_err(|e| Error::io(&lock_path, e))?;

        f()
    }
}
