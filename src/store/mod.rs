//! Flat JSON array files.
//!
//! Every store is a single file holding a JSON array. Reads never fail: a missing
//! or corrupt file reads as an empty list. Writes rewrite the whole file through a
//! temp file + rename while holding an exclusive lock on a sibling `.lock` file.
//! A corrupt file is moved aside to `<name>.corrupt` before the first rewrite.

mod lock;

use std::fs::{self, File};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use lock::FileLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lock error on {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. Missing, empty or unparseable files yield an empty list.
    pub fn load(&self) -> Vec<T> {
        self.read().unwrap_or_default()
    }

    /// `None` only when the file exists but does not parse.
    fn read(&self) -> Option<Vec<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Some(Vec::new()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable store, treating as empty");
                return Some(Vec::new());
            }
        };

        if content.trim().is_empty() {
            return Some(Vec::new());
        }

        match serde_json::from_str(&content) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt store, treating as empty");
                None
            }
        }
    }

    /// Load for a read-modify-write. Caller holds the lock.
    fn load_for_write(&self) -> Vec<T> {
        match self.read() {
            Some(items) => items,
            None => {
                self.move_aside();
                Vec::new()
            }
        }
    }

    fn move_aside(&self) {
        let target = self.sibling_path("", ".corrupt");
        match fs::rename(&self.path, &target) {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                moved_to = %target.display(),
                "corrupt store moved aside before rewrite"
            ),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "could not move corrupt store aside, it will be overwritten"
            ),
        }
    }

    pub fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write_all(items)
    }

    pub fn append(&self, item: T) -> Result<(), StoreError> {
        self.update(|items| {
            items.push(item);
        })
    }

    /// Removes every item matching `pred`; returns how many were dropped.
    pub fn remove_where<F>(&self, pred: F) -> Result<usize, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        self.update(|items| {
            let before = items.len();
            items.retain(|item| !pred(item));
            before - items.len()
        })
    }

    /// Locked read-modify-write. The closure's return value is handed back.
    pub fn update<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut items = self.load_for_write();
        let result = f(&mut items);
        self.write_all(&items)?;
        Ok(result)
    }

    /// Like [`update`](Self::update) but the closure may veto the write.
    pub fn try_update<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut items = self.load_for_write();
        let result = f(&mut items)?;
        self.write_all(&items)?;
        Ok(result)
    }

    fn write_all(&self, items: &[T]) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(items)?;
        let tmp_path = self.sibling_path(".", ".tmp");

        let mut tmp = File::create(&tmp_path).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.sync_all().map_err(io_err)?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), count = items.len(), "store written");
        Ok(())
    }

    fn sibling_path(&self, prefix: &str, suffix: &str) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "store.json".to_string());
        self.path.with_file_name(format!("{prefix}{name}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        name: String,
    }

    fn item(id: u32) -> Item {
        Item {
            id,
            name: format!("item-{id}"),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonStore<Item> = JsonStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_kept_aside_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let store: JsonStore<Item> = JsonStore::new(&path);

        // Reads alone leave it in place.
        assert!(store.load().is_empty());
        assert!(!dir.path().join("bad.json.corrupt").exists());

        store.append(item(1)).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("bad.json.corrupt")).unwrap(),
            "{not json"
        );
        assert_eq!(store.load(), vec![item(1)]);
    }

    #[test]
    fn test_concurrent_appends_from_separate_handles_lose_nothing() {
        const THREADS: u32 = 16;
        const PER_THREAD: u32 = 25;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store: JsonStore<Item> = JsonStore::new(path);
                    for n in 0..PER_THREAD {
                        store.append(item(t * PER_THREAD + n)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let store: JsonStore<Item> = JsonStore::new(&path);
        let mut ids: Vec<u32> = store.load().iter().map(|i| i.id).collect();
        assert_eq!(ids.len() as u32, THREADS * PER_THREAD);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len() as u32, THREADS * PER_THREAD);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let store = JsonStore::new(&path);
        for id in [3, 1, 2] {
            store.append(item(id)).unwrap();
        }

        let reopened: JsonStore<Item> = JsonStore::new(&path);
        let ids: Vec<u32> = reopened.load().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_file_is_a_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let store = JsonStore::new(&path);
        store.append(item(7)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["name"], "item-7");
        assert!(!dir.path().join(".items.json.tmp").exists());
    }

    #[test]
    fn test_remove_where() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("items.json"));
        store.save(&[item(1), item(2), item(3)]).unwrap();

        let removed = store.remove_where(|i| i.id == 2).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.remove_where(|i| i.id == 99).unwrap(), 0);

        let ids: Vec<u32> = store.load().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_try_update_error_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("items.json"));
        store.save(&[item(1)]).unwrap();

        let result: Result<(), StoreError> = store.try_update(|items| {
            items.clear();
            Err(StoreError::Json(
                serde_json::from_str::<Item>("x").unwrap_err(),
            ))
        });
        assert!(result.is_err());
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested/deeper/items.json"));
        store.append(item(1)).unwrap();
        assert_eq!(store.load(), vec![item(1)]);
    }
}
