//! Client configuration loading.

use std::path::PathBuf;

use inkpost_core::config::ClientConfig;
use inkpost_core::error::Result;

use crate::paths::InkpostPaths;

/// Loads and persists [`ClientConfig`] from `config.toml`.
///
/// A missing file is not an error: the defaults are written out so the
/// user has a file to edit.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new_default() -> Result<Self> {
        Ok(Self {
            path: InkpostPaths::config_file()?,
        })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the configuration, writing and returning the defaults when the
    /// file does not exist yet.
    pub async fn load_or_init(&self) -> Result<ClientConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let config = ClientConfig::default();
                self.save(&config).await?;
                tracing::info!(path = %self.path.display(), "wrote default configuration");
                Ok(config)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = toml::to_string_pretty(config)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
