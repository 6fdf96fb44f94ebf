//! Flat-file JSON UserRepository implementation.
//!
//! The whole record set lives in memory inside the repository and the entire
//! document is serialized back to disk on every mutating operation. A
//! `tokio::sync::RwLock` makes each mutation single-writer, so two concurrent
//! requests can no longer race to serialize the collection. Whole-file
//! rewrite without a temp-file dance is an accepted crash-consistency
//! limitation of this backing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use roster_core::error::{Result, RosterError};
use roster_core::user::{UserRecord, UserRepository};

/// On-disk document shape: `{ "users": [ ... ] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UserDocument {
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// JSON-document-backed user repository.
///
/// Records keep the insertion order of the underlying document, which is the
/// order `list_all` returns them in.
#[derive(Debug)]
pub struct JsonUserRepository {
    path: PathBuf,
    document: RwLock<UserDocument>,
}

impl JsonUserRepository {
    /// Opens the repository at `path`, loading the document if it exists.
    ///
    /// A missing or empty file means an empty store; a file that exists but
    /// cannot be parsed is an error.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let document = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await.map_err(|e| {
                RosterError::io(format!("failed to read user document {:?}: {e}", path))
            })?;
            if content.trim().is_empty() {
                UserDocument::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            UserDocument::default()
        };

        tracing::debug!(path = %path.display(), users = document.users.len(), "opened user document");

        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    /// Serializes the whole document back to disk.
    ///
    /// Callers hold the write lock across mutate-and-persist, so the file on
    /// disk always reflects one mutation at a time.
    async fn persist(&self, document: &UserDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    RosterError::io(format!(
                        "failed to create data directory {:?}: {e}",
                        parent
                    ))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content).await.map_err(|e| {
            RosterError::io(format!("failed to write user document {:?}: {e}", self.path))
        })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserRepository for JsonUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let document = self.document.read().await;
        Ok(document
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, record: &UserRecord) -> Result<UserRecord> {
        let mut document = self.document.write().await;
        if document
            .users
            .iter()
            .any(|user| user.username == record.username)
        {
            return Err(RosterError::duplicate(&record.username));
        }

        document.users.push(record.clone());
        self.persist(&document).await?;
        Ok(record.clone())
    }

    async fn update(&self, old_username: &str, record: &UserRecord) -> Result<UserRecord> {
        let mut document = self.document.write().await;
        let Some(index) = document
            .users
            .iter()
            .position(|user| user.username == old_username)
        else {
            return Err(RosterError::not_found(old_username));
        };

        if record.username != old_username
            && document
                .users
                .iter()
                .any(|user| user.username == record.username)
        {
            return Err(RosterError::duplicate(&record.username));
        }

        document.users[index] = record.clone();
        self.persist(&document).await?;
        Ok(record.clone())
    }

    async fn delete(&self, username: &str) -> Result<UserRecord> {
        let mut document = self.document.write().await;
        let Some(index) = document
            .users
            .iter()
            .position(|user| user.username == username)
        else {
            return Err(RosterError::not_found(username));
        };

        let removed = document.users.remove(index);
        self.persist(&document).await?;
        Ok(removed)
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>> {
        let document = self.document.read().await;
        Ok(document.users.clone())
    }
}
