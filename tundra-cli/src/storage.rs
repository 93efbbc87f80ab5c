//! JSON snapshot storage adapter for TaskStore
//!
//! Persists the durable task/category state to a single JSON file.
//! Ephemeral view and edit state never reaches disk; the store's serde
//! derivation skips it.

use std::fs;
use std::path::{Path, PathBuf};

use tundra_core::TaskStore;

use crate::error::{CliError, Result};

/// JSON file storage adapter
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Create a new storage adapter for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the storage path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store from disk; a missing file yields an empty store
    pub fn load(&self) -> Result<TaskStore> {
        if !self.path.exists() {
            return Ok(TaskStore::new());
        }

        let data = fs::read_to_string(&self.path)
            .map_err(|e| CliError::io(format!("Failed to read {}", self.path.display()), e))?;
        let store = serde_json::from_str(&data)?;
        Ok(store)
    }

    /// Save the store to disk, backing up the previous snapshot first
    pub fn save(&self, store: &TaskStore) -> Result<()> {
        self.backup()?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| CliError::io(format!("Failed to create {}", parent.display()), e))?;
        }

        let data = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, data)
            .map_err(|e| CliError::io(format!("Failed to write {}", self.path.display()), e))?;
        Ok(())
    }

    /// Create a backup of the snapshot file
    pub fn backup(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(()); // Nothing to backup
        }

        let backup_path = self.path.with_extension("json.bak");
        fs::copy(&self.path, &backup_path)
            .map_err(|e| CliError::io(format!("Failed to back up {}", self.path.display()), e))?;
        Ok(())
    }

    /// Recover the store from the backup file
    pub fn recover(&self) -> Result<TaskStore> {
        let backup_path = self.path.with_extension("json.bak");

        if !backup_path.exists() {
            return Err(CliError::storage("Backup file not found"));
        }

        let backup_storage = JsonStorage::new(backup_path);
        backup_storage.load()
    }

    /// Check if a backup exists
    pub fn backup_exists(&self) -> bool {
        self.path.with_extension("json.bak").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tundra_core::UNCATEGORIZED_NAME;

    fn storage_in(dir: &tempfile::TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("tasks.json"))
    }

    #[test]
    fn test_load_missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let store = storage.load().unwrap();
        assert!(store.is_empty());
        assert!(store.categories().contains_name(UNCATEGORIZED_NAME));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let mut store = TaskStore::new();
        let work = store.add_category("Work").unwrap();
        let id = store.add_task("Write report").unwrap();
        store.set_task_category(id, work);
        store.toggle_completed(id);
        storage.save(&store).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        let task = loaded.get_task(id).unwrap();
        assert_eq!(task.text, "Write report");
        assert!(task.completed);
        assert_eq!(loaded.category_name(task.category), Some("Work"));
    }

    #[test]
    fn test_ephemeral_state_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let mut store = TaskStore::new();
        let id = store.add_task("draft me").unwrap();
        store.begin_task_edit(id);
        store.set_completed_filter(true);
        storage.save(&store).unwrap();

        let loaded = storage.load().unwrap();
        assert!(loaded.task_edit().is_none());
        assert!(!loaded.view().completed);
    }

    #[test]
    fn test_backup_and_recover() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let mut store = TaskStore::new();
        store.add_task("first").unwrap();
        storage.save(&store).unwrap();
        assert!(!storage.backup_exists());

        // Second save backs up the first snapshot
        store.add_task("second").unwrap();
        storage.save(&store).unwrap();
        assert!(storage.backup_exists());

        let recovered = storage.recover().unwrap();
        assert_eq!(recovered.len(), 1);
        assert_eq!(recovered.tasks()[0].text, "first");
    }

    #[test]
    fn test_recover_without_backup_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.recover().is_err());
    }
}
