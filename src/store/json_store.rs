use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{ProfileData, ProgressData};

/// JSON persistence under the platform data dir. Writes go through a .tmp
/// file plus rename so a crash mid-save never truncates existing data.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load and deserialize progress. Returns None if the file exists but
    /// cannot be parsed (schema mismatch / corruption).
    pub fn load_progress(&self) -> Option<ProgressData> {
        let path = self.file_path("progress.json");
        if path.exists() {
            let content = fs::read_to_string(&path).ok()?;
            serde_json::from_str(&content).ok()
        } else {
            // No file yet means a fresh default, not a schema mismatch
            Some(ProgressData::default())
        }
    }

    pub fn save_progress(&self, data: &ProgressData) -> Result<()> {
        self.save("progress.json", data)
    }

    pub fn load_profile(&self) -> ProfileData {
        self.load("profile.json")
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        self.save("profile.json", data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_progress_round_trip() {
        let (_dir, store) = make_test_store();

        let mut progress = ProgressData::default();
        progress.mark_known("english-101", "cat");
        progress.deck_mut("english-101").pass_count = 3;
        store.save_progress(&progress).unwrap();

        let loaded = store.load_progress().unwrap();
        assert!(loaded.learned("english-101").unwrap().contains("cat"));
        assert_eq!(loaded.decks["english-101"].pass_count, 3);
    }

    #[test]
    fn test_missing_progress_file_is_fresh_default() {
        let (_dir, store) = make_test_store();
        let progress = store.load_progress().unwrap();
        assert!(progress.decks.is_empty());
        assert!(!progress.needs_reset());
    }

    #[test]
    fn test_corrupt_progress_file_returns_none() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path("progress.json"), "{not json").unwrap();
        assert!(store.load_progress().is_none());
    }

    #[test]
    fn test_corrupt_profile_degrades_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path("profile.json"), "[]").unwrap();
        let profile = store.load_profile();
        assert_eq!(profile.total_reviews, 0);
    }

    #[test]
    fn test_save_leaves_no_tmp_files() {
        let (dir, store) = make_test_store();
        store.save_profile(&ProfileData::default()).unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }
}
