use super::{CartStorage, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Directory-backed storage: each key maps to one `<key>.json` file.
///
/// Writes go to a sibling `.tmp` file which is synced and then renamed over
/// the target, so readers see either the old or the new snapshot.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the value for `key`: the URL-encoded key plus `.json`.
    ///
    /// The encoding is reversible, so two keys never share a file, and it
    /// escapes `/`, so the file always sits directly inside the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

#[async_trait]
impl CartStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(value.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).await?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote cart snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read("@RocketShoes:cart").await.unwrap(), None);

        storage
            .write("@RocketShoes:cart", "[]".to_string())
            .await
            .unwrap();
        storage
            .write("@RocketShoes:cart", "[1]".to_string())
            .await
            .unwrap();

        assert_eq!(
            storage.read("@RocketShoes:cart").await.unwrap(),
            Some("[1]".to_string())
        );
        assert!(!storage.path_for("@RocketShoes:cart").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_key_is_encoded() {
        let storage = FileStorage::new("/data");
        assert_eq!(
            storage.path_for("@RocketShoes:cart"),
            PathBuf::from("/data/%40RocketShoes%3Acart.json")
        );
        assert_eq!(
            storage.path_for("../escape"),
            PathBuf::from("/data/..%2Fescape.json")
        );
    }

    #[tokio::test]
    async fn test_similar_keys_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_ne!(storage.path_for("@a:b"), storage.path_for("_a_b"));

        storage.write("@a:b", "[1]".to_string()).await.unwrap();
        storage.write("_a_b", "[2]".to_string()).await.unwrap();

        assert_eq!(storage.read("@a:b").await.unwrap(), Some("[1]".to_string()));
        assert_eq!(storage.read("_a_b").await.unwrap(), Some("[2]".to_string()));
    }
}
