use std::ffi::OsString;
use std::path::{Path, PathBuf};

use herald_common::error::StateError;
use herald_common::types::PersistedState;

/// Handle to the on-disk last-seen identifier.
///
/// Opened once by the poller and owned by it; every `save` flushes to disk.
pub struct StateStore {
    path: PathBuf,
    last_id: Option<String>,
}

impl StateStore {
    /// Open the store at `path`, loading any existing identifier.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let last_id = Self::load(&path).await;
        Self { path, last_id }
    }

    /// Read the identifier from `path`.
    ///
    /// A missing, unreadable or malformed file yields `None`.
    pub async fn load(path: &Path) -> Option<String> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unable to read state file");
                return None;
            }
        };

        match serde_json::from_slice::<PersistedState>(&bytes) {
            Ok(state) => state.last_id,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed state file");
                None
            }
        }
    }

    pub fn last_id(&self) -> Option<&str> {
        self.last_id.as_deref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `id` as the last-seen identifier and write it to disk.
    ///
    /// The in-memory value is updated even when the write fails.
    pub async fn save(&mut self, id: &str) -> Result<(), StateError> {
        self.last_id = Some(id.to_string());

        let state = PersistedState {
            last_id: self.last_id.clone(),
        };
        let bytes = serde_json::to_vec(&state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so readers never see a partial file.
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), last_id = id, "State saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::open(dir.path().join("last_id.json")).await;
        assert_eq!(store.last_id(), None);
    }

    #[tokio::test]
    async fn test_save_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("last_id.json");

        let mut store = StateStore::open(&path).await;
        store.save("post-1").await.unwrap();
        store.save("post-2").await.unwrap();
        assert_eq!(store.last_id(), Some("post-2"));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"last_id":"post-2"}"#);

        let reopened = StateStore::open(&path).await;
        assert_eq!(reopened.last_id(), Some("post-2"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_id.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(StateStore::load(&path).await, None);

        std::fs::write(&path, r#"{"last_id": null}"#).unwrap();
        assert_eq!(StateStore::load(&path).await, None);
    }

    #[tokio::test]
    async fn test_save_failure_still_advances_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        // Parent "directory" is a regular file, so the write must fail.
        let mut store = StateStore::open(blocker.join("last_id.json")).await;
        assert!(store.save("post-9").await.is_err());
        assert_eq!(store.last_id(), Some("post-9"));
    }
}
