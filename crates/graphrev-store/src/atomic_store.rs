//! Read-modify-write of a JSONL quad store under an exclusive lock file.

use crate::memory::MemoryTripleStore;
use crate::protocol::StoreError;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Failure of [`mutate_store_jsonl`]. `Mutation` carries the caller's own
/// error unchanged.
#[derive(Debug, thiserror::Error)]
pub enum AtomicStoreMutationError<E> {
    #[error("quad store {} is locked by another writer", .path.display())]
    LockBusy { path: PathBuf },

    #[error("cannot take quad store lock {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Mutation(E),
}

/// The lock file guarding `store_path`: the store path with `.lock` appended.
pub fn store_lock_path(store_path: &Path) -> PathBuf {
    let mut raw = store_path.as_os_str().to_owned();
    raw.push(".lock");
    raw.into()
}

/// Load the store at `path`, hand it to `mutator`, and write it back when
/// the mutator reports a change. All of it happens under the lock.
///
/// A missing file starts from an empty store. The store is shared behind
/// an `Arc` so the mutator can build services that hold on to it.
pub fn mutate_store_jsonl<T, E, F>(
    path: impl AsRef<Path>,
    mutator: F,
) -> Result<T, AtomicStoreMutationError<E>>
where
    F: FnOnce(&Arc<MemoryTripleStore>) -> Result<(T, bool), E>,
{
    let path = path.as_ref();
    let _lock = StoreLock::acquire(path)?;

    let store = match path.try_exists() {
        Ok(true) => MemoryTripleStore::load_jsonl(path)?,
        Ok(false) => MemoryTripleStore::new(),
        Err(err) => return Err(StoreError::Io(0, format!("{}: {err}", path.display())).into()),
    };
    let store = Arc::new(store);

    let (value, changed) = mutator(&store).map_err(AtomicStoreMutationError::Mutation)?;
    if changed {
        store.save_jsonl(path)?;
        tracing::debug!(path = %path.display(), "quad store persisted");
    } else {
        tracing::trace!(path = %path.display(), "quad store unchanged");
    }
    Ok(value)
}

/// Held while a mutation runs; the lock file is removed on drop.
struct StoreLock {
    path: PathBuf,
}

impl StoreLock {
    fn acquire<E>(store_path: &Path) -> Result<Self, AtomicStoreMutationError<E>> {
        let path = store_lock_path(store_path);
        let lock_err = |source| AtomicStoreMutationError::Lock {
            path: path.clone(),
            source,
        };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(lock_err)?;
        }
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(AtomicStoreMutationError::LockBusy { path });
            }
            Err(err) => return Err(lock_err(err)),
        };
        let owner = serde_json::json!({
            "pid": std::process::id(),
            "acquiredAt": Utc::now().to_rfc3339(),
        });
        // The owner note is informational; a failed write still holds the lock.
        if let Err(err) = writeln!(file, "{owner}") {
            tracing::warn!(lock = %path.display(), error = %err, "lock owner note not written");
        }
        Ok(Self { path })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!(lock = %self.path.display(), error = %err, "quad store lock not released");
        }
    }
}
