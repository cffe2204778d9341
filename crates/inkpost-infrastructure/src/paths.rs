//! Unified path management for inkpost configuration files.
//!
//! All client configuration and session data live under a single
//! per-platform config directory:
//!
//! ```text
//! ~/.config/inkpost/           # Linux (platform-appropriate elsewhere)
//! ├── config.toml              # Client configuration
//! └── session.toml             # The bearer token (0600 on Unix)
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for inkpost_core::InkpostError {
    fn from(err: PathError) -> Self {
        inkpost_core::InkpostError::config(err.to_string())
    }
}

/// Unified path management for inkpost.
pub struct InkpostPaths;

impl InkpostPaths {
    /// Returns the inkpost configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("inkpost"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the session token file.
    ///
    /// # Security Note
    ///
    /// This file holds the bearer token; writers set its permissions to
    /// 600 on Unix.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = InkpostPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("inkpost"));
    }

    #[test]
    fn test_config_file() {
        let config_file = InkpostPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = InkpostPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_session_file() {
        let session_file = InkpostPaths::session_file().unwrap();
        assert!(session_file.ends_with("session.toml"));
        let config_dir = InkpostPaths::config_dir().unwrap();
        assert!(session_file.starts_with(&config_dir));
    }
}
