//! Persistence of the single signed-in user record.
//!
//! Last writer wins; there is no locking between processes.

use crate::error::Result;
use crate::types::User;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// A key-value slot holding one serialized [`User`]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Read the persisted user, if any
    async fn load(&self) -> Result<Option<User>>;

    /// Persist the user, replacing any previous record
    async fn save(&self, user: &User) -> Result<()>;

    /// Remove the persisted record. Clearing an empty slot is not an error.
    async fn clear(&self) -> Result<()>;
}

/// User record stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn load(&self) -> Result<Option<User>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "no persisted user");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let user: User = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), user_id = %user.id, "loaded persisted user");
        Ok(Some(user))
    }

    async fn save(&self, user: &User) -> Result<()> {
        let content = serde_json::to_string_pretty(user)?;
        atomic_write(&self.path, content.as_bytes()).await?;
        debug!(path = %self.path.display(), user_id = %user.id, "persisted user");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared persisted user");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process user slot, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    slot: Mutex<Option<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a record
    pub fn with_user(user: User) -> Self {
        Self {
            slot: Mutex::new(Some(user)),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn load(&self) -> Result<Option<User>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn save(&self, user: &User) -> Result<()> {
        *self.slot.lock().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.slot.lock().await.take();
        Ok(())
    }
}

/// Write via a temp file in the same directory, then rename into place
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}
