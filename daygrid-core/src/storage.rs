//! File-backed key-value storage.
//!
//! One file per key under the daygrid data directory. Writes go through a
//! temp file and rename so a crash mid-write never corrupts existing state.

use std::path::{Path, PathBuf};

use crate::error::DaygridResult;

/// Key holding the serialized event mapping.
pub const EVENTS_KEY: &str = "events";

/// Presence flag recording that the welcome banner was shown.
pub const SEEN_WELCOME_KEY: &str = "seenWelcome";

/// A small key-value store over a local directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store over `dir`. The directory is created lazily on first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        LocalStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read a key. Absent keys and read failures both come back as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Write a key atomically.
    pub fn put(&self, key: &str, value: &str) -> DaygridResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = path.with_extension("json.tmp");

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_absent_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());
        assert_eq!(store.get("events"), None);
        assert!(!store.contains("events"));
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());

        store.put("events", r#"{"2024-06-01":[]}"#).unwrap();
        assert_eq!(store.get("events").as_deref(), Some(r#"{"2024-06-01":[]}"#));
        assert!(store.contains("events"));
    }

    #[test]
    fn put_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("daygrid");
        let store = LocalStore::open(&nested);

        store.put(SEEN_WELCOME_KEY, "true").unwrap();
        assert!(nested.join("seenWelcome.json").exists());
    }

    #[test]
    fn put_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());

        store.put("events", "first").unwrap();
        store.put("events", "second").unwrap();
        assert_eq!(store.get("events").as_deref(), Some("second"));
    }
}
