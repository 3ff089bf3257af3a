use super::{SessionStorage, StorageKey};
use crate::error::SessionError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const SESSION_FILE: &str = "session.json";

/// Session values kept as one JSON object in the user cache directory.
///
/// Every write rewrites the whole file, so writes within this process are
/// serialized through a lock. Other processes sharing the file race with
/// last-write-wins semantics.
pub struct FileStorage {
    session_path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage under `<cache dir>/promptcraft`.
    pub fn new() -> Result<Self, SessionError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| SessionError::Configuration("Could not find cache directory".to_string()))?
            .join("promptcraft");
        Self::in_dir(cache_dir)
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        let dir = dir.as_ref();

        // Create cache directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                SessionError::Storage(format!("Failed to create session directory: {}", e))
            })?;
        }

        Ok(Self {
            session_path: dir.join(SESSION_FILE),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.session_path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        if !self.session_path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.session_path)
            .map_err(|e| SessionError::Storage(format!("Failed to read session: {}", e)))?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&json)?)
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if values.is_empty() {
            if self.session_path.exists() {
                fs::remove_file(&self.session_path).map_err(|e| {
                    SessionError::Storage(format!("Failed to delete session: {}", e))
                })?;
            }
            return Ok(());
        }

        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.session_path, json)
            .map_err(|e| SessionError::Storage(format!("Failed to save session: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.session_path)
                .map_err(|e| {
                    SessionError::Storage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.session_path, perms).map_err(|e| {
                SessionError::Storage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    fn update<F>(&self, update_fn: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut values = self.load()?;
        update_fn(&mut values);
        self.persist(&values)
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, SessionError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.remove(key.as_str()))
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), SessionError> {
        self.update(|values| {
            values.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn remove(&self, key: StorageKey) -> Result<(), SessionError> {
        self.update(|values| {
            values.remove(key.as_str());
        })
    }
}
