//! JSON-file-backed user store.
//!
//! Persists the whole user list as a single `{"users": [...]}` document,
//! mirroring the one-blob storage model the browser frontend used. Writes
//! go through a temp file and rename so a crash never leaves a torn
//! document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use findaname_core::error::{CoreError, CoreResult};
use findaname_core::traits::UserRepository;
use findaname_core::types::User;

/// On-disk document shape.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    users: Vec<User>,
}

/// Whole-document JSON user store.
pub struct JsonUserStore {
    path: PathBuf,
    /// Serializes writers; readers see either the old or the new document.
    write_lock: Mutex<()>,
}

impl JsonUserStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is not created until the first save with users in it, so a
    /// fresh install leaves no trace on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserRepository for JsonUserStore {
    async fn load_all(&self) -> CoreResult<Vec<User>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read user store: {e}"
                )))
            }
        };

        let document: UserDocument = serde_json::from_str(&contents).map_err(|e| {
            CoreError::SerializationError(format!("Failed to parse user store: {e}"))
        })?;
        Ok(document.users)
    }

    async fn save_all(&self, users: &[User]) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        // A fresh install with no users leaves no file behind.
        if users.is_empty() && tokio::fs::metadata(&self.path).await.is_err() {
            return Ok(());
        }

        let document = UserDocument {
            users: users.to_vec(),
        };
        let json = serde_json::to_string_pretty(&document).map_err(|e| {
            CoreError::SerializationError(format!("Failed to serialize user store: {e}"))
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    CoreError::StorageError(format!("Failed to create store directory: {e}"))
                })?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json.as_bytes())
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to write user store: {e}")))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to replace user store: {e}")))?;

        Ok(())
    }
}
