use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use indexmap::IndexMap;
use tracing::debug;

use super::KeyValueStore;
use crate::dao::storage::{StorageError, StorageResult};

/// Store persisted as a single JSON object (`{"key": "value", ...}`) on disk.
///
/// Every write rewrites the whole document through a temporary sibling file
/// followed by a rename, so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

type Entries = IndexMap<String, String>;

impl FileKeyValueStore {
    /// Open (without creating) the store at `path`, creating missing parent directories.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                StorageError::unavailable(format!("creating `{}`", parent.display()), err)
            })?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<Entries> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => {
                return Err(StorageError::unavailable(
                    format!("reading `{}`", self.path.display()),
                    err,
                ));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&contents).map_err(|err| {
            StorageError::corrupted(format!("decoding `{}`", self.path.display()), err)
        })
    }

    fn write_entries(&self, entries: &Entries) -> StorageResult<()> {
        let encoded = serde_json::to_string_pretty(entries).map_err(|err| {
            StorageError::unavailable(format!("encoding `{}`", self.path.display()), err)
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded)
            .map_err(|err| StorageError::unavailable(format!("writing `{}`", tmp.display()), err))?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            StorageError::unavailable(format!("replacing `{}`", self.path.display()), err)
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_entries()?.shift_remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), key, bytes = value.len(), "key-value entry written");
        Ok(())
    }

    fn health_check(&self) -> StorageResult<()> {
        self.read_entries().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::open(dir.path().join("nested").join("store.json")).unwrap()
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get("players").unwrap(), None);
        assert!(store.health_check().is_ok());
    }

    #[test]
    fn values_survive_reopening() {
        let dir = TempDir::new().unwrap();
        store_in(&dir).set("players", "[]").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("players").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn writing_one_key_keeps_the_others() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let err = store.get("players").unwrap_err();
        assert!(matches!(err, StorageError::Corrupted { .. }));
        assert!(store.health_check().is_err());
    }
}
