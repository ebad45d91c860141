use super::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// String key-value persistence seam.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result;
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
        store
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(key);
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, value).await?;
        tokio::fs::rename(&staging, &path).await?;
        trace!("Persisted {key} to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        use rand::Rng;
        let suffix: String = rand::rng()
            .sample_iter(&rand::distr::Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        std::env::temp_dir().join(format!("qassist_store_{}", suffix.to_lowercase()))
    }

    #[tokio::test]
    async fn memory_store_overwrites() -> Result {
        let store = MemoryKeyValueStore::default();
        assert_eq!(store.get("k").await?, None);

        store.set("k", "one".into()).await?;
        store.set("k", "two".into()).await?;
        assert_eq!(store.get("k").await?.as_deref(), Some("two"));
        Ok(())
    }

    #[tokio::test]
    async fn file_store_round_trips_and_misses_cleanly() -> Result {
        let dir = scratch_dir();
        let store = FileKeyValueStore::new(&dir);

        assert_eq!(store.get("favoriteSuggestions").await?, None);
        store.set("favoriteSuggestions", r#"["SELECT 1"]"#.into()).await?;
        assert_eq!(
            store.get("favoriteSuggestions").await?.as_deref(),
            Some(r#"["SELECT 1"]"#)
        );
        assert!(dir.join("favoriteSuggestions.json").exists());

        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }
}
