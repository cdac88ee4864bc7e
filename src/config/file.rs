//! JSON file settings backend.
//!
//! Stores the settings blob at `~/.vault-relay/config.json` unless another
//! path is given. Writes go to a temp file with restrictive permissions and
//! are renamed into place, since the blob holds a password.

use crate::error::{Error, Result};
use crate::host::SettingsPersistence;
use serde_json::Value;
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default settings file location.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".vault-relay").join("config.json"))
}

/// Settings persistence backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsPersistence for JsonFileStorage {
    fn load_persisted(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {e}")))?;
        Ok(Some(value))
    }

    fn save_persisted(&self, data: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!("Failed to create config directory: {e}"))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        let write = || -> std::io::Result<()> {
            {
                let mut opts = fs::OpenOptions::new();
                opts.write(true).create(true).truncate(true);
                #[cfg(unix)]
                opts.mode(0o600);
                let mut file = opts.open(&temp_path)?;
                file.write_all(content.as_bytes())?;
                file.flush()?;
            }
            fs::rename(&temp_path, &self.path)
        };

        write().map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;
        debug!(path = %self.path.display(), "Wrote settings file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("config.json"));
        assert!(storage.load_persisted().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let storage = JsonFileStorage::new(&path);

        let data = json!({"notesWebhookUrl": "https://hooks.example/notes"});
        storage.save_persisted(&data).unwrap();

        assert!(path.exists());
        assert_eq!(storage.load_persisted().unwrap(), Some(data));
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("config.json"));

        storage.save_persisted(&json!({"a": 1})).unwrap();
        storage.save_persisted(&json!({"b": 2})).unwrap();

        assert_eq!(storage.load_persisted().unwrap(), Some(json!({"b": 2})));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileStorage::new(&path).load_persisted().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        JsonFileStorage::new(&path).save_persisted(&json!({})).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_default_path_ends_with_config_json() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(".vault-relay/config.json"));
        }
    }
}
