//! Durable shared handle over the [`Store`]
//!
//! One tokio mutex is the single mutual-exclusion domain for the whole state:
//! command mutators and the reminder scheduler both serialize through it, so
//! no two read-modify-write cycles ever interleave. Every commit writes the
//! full snapshot to a temporary file and renames it into place, so a crash
//! mid-write never leaves a truncated record.

use std::io;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use tokio::sync::{Mutex, MutexGuard};

use super::Store;
use crate::core::error::{Result, StateError};

/// Cloneable handle to the store and its durable file
#[derive(Clone, Debug)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
    path: Arc<PathBuf>,
}

impl SharedStore {
    /// Load durable state from `path`.
    ///
    /// Missing or malformed data fails with [`StateError::CorruptState`]
    /// rather than silently yielding an empty store; use
    /// [`SharedStore::load_or_init`] to opt into fresh defaults.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path).map_err(|e| StateError::corrupt(&path, e))?;
        let store: Store =
            serde_json::from_str(&raw).map_err(|e| StateError::corrupt(&path, e))?;

        debug!(
            "Loaded state from {}: {} notes, {} reminders, {} milestones, {} leaderboard entries",
            path.display(),
            store.notes.len(),
            store.reminders.len(),
            store.milestones.len(),
            store.leaderboard.len()
        );

        Ok(Self {
            inner: Arc::new(Mutex::new(store)),
            path: Arc::new(path),
        })
    }

    /// Load durable state, initializing a fresh default store if the file
    /// does not exist yet. A malformed existing file still fails.
    pub fn load_or_init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No state file at {}, initializing defaults", path.display());
            let store = Store::default();
            persist_atomic(&path, &store)?;
            return Ok(Self {
                inner: Arc::new(Mutex::new(store)),
                path: Arc::new(path),
            });
        }
        Self::load(path)
    }

    /// Run `mutate` with sole mutation rights and persist the result durably
    /// before returning.
    ///
    /// If the mutator or the durable write fails, the in-memory state rolls
    /// back so memory and disk never diverge.
    pub async fn with_exclusive_access<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Store) -> Result<T>,
    {
        let mut guard = self.exclusive().await;
        let value = mutate(&mut guard)?;
        guard.commit()?;
        Ok(value)
    }

    /// Shared read access. No persistence happens.
    pub async fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    /// Guard-style exclusive access for multi-step critical sections (the
    /// scheduler awaits deliveries between mutations). Changes are discarded
    /// unless [`StoreGuard::commit`] is called.
    pub async fn exclusive(&self) -> StoreGuard<'_> {
        let guard = self.inner.lock().await;
        let snapshot = guard.clone();
        StoreGuard {
            guard,
            snapshot: Some(snapshot),
            path: Arc::clone(&self.path),
        }
    }

    /// Path of the durable state file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Exclusive access to the store with transactional commit.
///
/// Dropping the guard without committing restores the pre-lock snapshot, so a
/// failed critical section cannot leave memory ahead of disk.
pub struct StoreGuard<'a> {
    guard: MutexGuard<'a, Store>,
    snapshot: Option<Store>,
    path: Arc<PathBuf>,
}

impl StoreGuard<'_> {
    /// Persist the mutated state durably. On failure the in-memory mutation
    /// rolls back when the guard drops.
    pub fn commit(mut self) -> Result<()> {
        persist_atomic(&self.path, &self.guard)?;
        self.snapshot = None;
        Ok(())
    }
}

impl Deref for StoreGuard<'_> {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.guard
    }
}

impl DerefMut for StoreGuard<'_> {
    fn deref_mut(&mut self) -> &mut Store {
        &mut self.guard
    }
}

impl Drop for StoreGuard<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}

/// Write the full snapshot to a sibling temp file, then rename into place
fn persist_atomic(path: &Path, store: &Store) -> Result<()> {
    let json = serde_json::to_vec_pretty(store).map_err(io::Error::from)?;

    let tmp = tmp_path(path);
    std::fs::write(&tmp, &json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
