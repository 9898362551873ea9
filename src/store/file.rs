//! # JSON File Store
//!
//! Keeps the collection in memory and rewrites a JSON snapshot after every
//! successful mutation. Mutations are applied to a copy first; the live
//! collection is only swapped once the snapshot is durably on disk.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::memory::Collection;
use super::record::{CafeId, CafeRecord, NewCafe};
use super::CafeStore;

/// Store persisted to a single JSON snapshot file
#[derive(Debug)]
pub struct JsonFileCafeStore {
    path: PathBuf,
    data: RwLock<Collection>,
}

impl JsonFileCafeStore {
    /// Open the snapshot at `path`, starting empty if it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let collection = match fs::read(&path) {
            Ok(bytes) => {
                let collection: Collection = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?;
                collection.validate()?;
                collection
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Collection::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            cafes = collection.cafes.len(),
            "opened cafe snapshot"
        );

        Ok(Self {
            path,
            data: RwLock::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the snapshot; `.` for a bare file name
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Write to a sibling temp file, fsync, rename over the snapshot, then
    /// fsync the directory so the rename itself is durable
    fn persist(&self, collection: &Collection) -> StoreResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let bytes = serde_json::to_vec_pretty(collection)
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        fsync_dir(dir)
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Collection) -> StoreResult<T>) -> StoreResult<T> {
        let mut data = self.data.write().map_err(|_| StoreError::LockPoisoned)?;

        let mut next = data.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *data = next;

        Ok(out)
    }
}

fn fsync_dir(path: &Path) -> StoreResult<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
        .map_err(|e| StoreError::Io(format!("fsync directory {} failed: {}", path.display(), e)))
}

impl CafeStore for JsonFileCafeStore {
    fn insert(&self, cafe: NewCafe) -> StoreResult<CafeId> {
        self.mutate(|c| c.insert(cafe))
    }

    fn list_all(&self) -> StoreResult<Vec<CafeRecord>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.cafes.clone())
    }

    fn find_by_location(&self, location: &str) -> StoreResult<Option<CafeRecord>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.find_by_location(location).cloned())
    }

    fn get_by_id(&self, id: CafeId) -> StoreResult<Option<CafeRecord>> {
        let data = self.data.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(data.get_by_id(id).cloned())
    }

    fn update_price(&self, id: CafeId, price: Option<String>) -> StoreResult<bool> {
        // Skip the rewrite when nothing matched
        if self.get_by_id(id)?.is_none() {
            return Ok(false);
        }
        self.mutate(|c| Ok(c.update_price(id, price)))
    }

    fn delete_by_id(&self, id: CafeId) -> StoreResult<bool> {
        if self.get_by_id(id)?.is_none() {
            return Ok(false);
        }
        self.mutate(|c| Ok(c.delete_by_id(id)))
    }
}
