//! File-backed session token storage.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use inkpost_core::error::Result;
use inkpost_core::session::{AccessToken, SessionStore};

use crate::paths::InkpostPaths;

/// On-disk shape of the session file: the token under a single fixed key.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    access_token: String,
}

/// [`SessionStore`] implementation persisting the token to
/// `session.toml` under the inkpost config directory.
///
/// The token is cached in memory after the initial load so `get` is a pure
/// read; `set` and `clear` update the cache and the file together.
#[derive(Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: Arc<RwLock<Option<AccessToken>>>,
}

impl FileSessionStore {
    /// Opens the store at the default platform location, loading any
    /// persisted token.
    pub async fn new_default() -> Result<Self> {
        Self::open(InkpostPaths::session_file()?).await
    }

    /// Opens the store at an explicit path, loading any persisted token.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let cached = Self::load(&path).await?;
        Ok(Self {
            path,
            cached: Arc::new(RwLock::new(cached)),
        })
    }

    async fn load(path: &PathBuf) -> Result<Option<AccessToken>> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => {
                let file: SessionFile = toml::from_str(&raw)?;
                Ok(Some(AccessToken::new(file.access_token)))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, token: &AccessToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let raw = toml::to_string(&SessionFile {
            access_token: token.reveal().to_string(),
        })?;
        tokio::fs::write(&self.path, raw).await?;

        // Token file must not be world-readable.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, permissions).await?;
        }

        Ok(())
    }

    async fn remove_file(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Option<AccessToken> {
        self.cached.read().await.clone()
    }

    async fn set(&self, token: AccessToken) -> Result<()> {
        self.persist(&token).await?;
        *self.cached.write().await = Some(token);
        tracing::debug!("session token stored");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.remove_file().await?;
        *self.cached.write().await = None;
        tracing::debug!("session token cleared");
        Ok(())
    }
}
