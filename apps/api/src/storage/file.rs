use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::StorageBackend;

/// Filesystem backend. Each key is a JSON document at `<dir>/<key>.json`,
/// rewritten wholesale on every put.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates the data directory if needed and returns the backend.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        info!("File storage ready at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading storage key {key}")),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::write(self.path_for(key), value)
            .await
            .with_context(|| format!("writing storage key {key}"))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing storage key {key}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::create(dir.path()).await.unwrap();

        assert_eq!(storage.get("rmp_users").await.unwrap(), None);
        storage.put("rmp_users", "[]").await.unwrap();
        assert_eq!(
            storage.get("rmp_users").await.unwrap(),
            Some("[]".to_string())
        );
        assert!(dir.path().join("rmp_users.json").exists());

        storage.remove("rmp_users").await.unwrap();
        assert_eq!(storage.get("rmp_users").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_makes_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::create(&nested).await.unwrap();
        storage.put("k", "v").await.unwrap();
        assert!(nested.join("k.json").exists());
    }
}
