use std::{fs, io, marker::PhantomData};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Serialize, de::DeserializeOwned};

/// Errors that can occur while moving a store's state to or from its backing file.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Error reading store file {path}")]
    Read { path: Utf8PathBuf, #[source] source: anyhow::Error },
    #[error("Store file {path} does not contain valid JSON")]
    Decode { path: Utf8PathBuf, #[source] source: anyhow::Error },
    #[error("Error writing store file {path}")]
    Write { path: Utf8PathBuf, #[source] source: anyhow::Error },
    #[error("Error removing store file {path}")]
    Remove { path: Utf8PathBuf, #[source] source: anyhow::Error },
}

/// Whole-file JSON persistence for a single state value.
///
/// Every save serializes and rewrites the entire file; there is no partial or
/// incremental update. Loading from a path with no file present yields the
/// state type's default value, so a store that has never been saved behaves
/// like an empty one.
///
/// Nothing here coordinates concurrent access. Two processes saving to the
/// same path race and the last writer wins.
pub struct JsonFileStore<S> {
    path: Utf8PathBuf,
    _state: PhantomData<S>,
}

impl<S> JsonFileStore<S>
where
    S: Serialize + DeserializeOwned + Default,
{
    pub fn at(path: impl Into<Utf8PathBuf>) -> JsonFileStore<S> {
        JsonFileStore { path: path.into(), _state: PhantomData }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads and decodes the entire backing file, or returns `S::default()`
    /// when the file does not exist. Any other read failure, and any decode
    /// failure, is an error.
    pub fn load(&self) -> Result<S, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Store file {} not present, starting from empty state", self.path);
                return Ok(S::default());
            },
            Err(e) => return Err(StoreError::Read { path: self.path.clone(), source: e.into() }),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Decode { path: self.path.clone(), source: e.into() })
    }

    /// Serializes the given state and rewrites the whole backing file with it.
    pub fn save(&self, state: &S) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(state)
            .map_err(|e| StoreError::Write { path: self.path.clone(), source: e.into() })?;
        fs::write(&self.path, bytes)
            .map_err(|e| StoreError::Write { path: self.path.clone(), source: e.into() })?;
        log::debug!("Rewrote store file {}", self.path);
        Ok(())
    }

    /// Removes the backing file entirely. Deleting a file that is already
    /// absent is not an error.
    pub fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Removed store file {}", self.path);
                Ok(())
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Remove { path: self.path.clone(), source: e.into() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir, name: &str) -> JsonFileStore<BTreeMap<String, u64>> {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name))
            .expect("temp dir path is not valid UTF-8");
        JsonFileStore::at(path)
    }

    #[test]
    fn missing_file_loads_as_default() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = store_in(&dir, "absent.json");

        let state = store.load().expect("load of missing file should succeed");
        assert!(state.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = store_in(&dir, "state.json");

        let mut state = BTreeMap::new();
        state.insert("bolt".to_owned(), 10);
        store.save(&state).expect("save should succeed");

        let reloaded = store.load().expect("load should succeed");
        assert_eq!(reloaded, state);
    }

    #[test]
    fn delete_removes_file_and_tolerates_absence() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = store_in(&dir, "state.json");

        store.save(&BTreeMap::new()).expect("save should succeed");
        assert!(store.path().as_std_path().exists());

        store.delete().expect("delete should succeed");
        assert!(!store.path().as_std_path().exists());

        // Second delete hits a file that no longer exists
        store.delete().expect("delete of absent file should succeed");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = store_in(&dir, "garbage.json");
        std::fs::write(store.path(), b"{ not json").expect("failed to write garbage");

        let err = store.load().expect_err("load of malformed file should fail");
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
