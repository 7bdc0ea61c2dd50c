//! Global configuration parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

/// Attachment upload settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct UploadConfig {
    /// Directory where uploaded attachments are written.
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    /// Base URL prefixed to stored file names to form the public URL.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/api/uploads".into()
}

fn default_max_upload_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/tasks.db")
}

fn default_http_port() -> u16 {
    8080
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// HTTP port the API listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// User IDs allowed to call the API. Empty means any presented
    /// identity is accepted — tasks are still scoped per user.
    #[serde(default)]
    pub authorized_user_ids: Vec<String>,
    /// Attachment upload settings.
    #[serde(default)]
    pub upload: UploadConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            http_port: default_http_port(),
            authorized_user_ids: Vec::new(),
            upload: UploadConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalize it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that a presented user ID may call the API.
    ///
    /// An empty allowlist accepts any non-empty opaque identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the user is not in the
    /// configured allowlist.
    pub fn ensure_authorized(&self, user_id: &str) -> Result<()> {
        if self.authorized_user_ids.is_empty()
            || self.authorized_user_ids.iter().any(|id| id == user_id)
        {
            Ok(())
        } else {
            Err(AppError::Unauthorized("user is not authorized".into()))
        }
    }

    fn validate(&mut self) -> Result<()> {
        if self.upload.max_upload_bytes == 0 {
            return Err(AppError::Config(
                "upload.max_upload_bytes must be greater than zero".into(),
            ));
        }

        if self.upload.public_base_url.is_empty() {
            return Err(AppError::Config(
                "upload.public_base_url must not be empty".into(),
            ));
        }

        // Stored file names are appended with a single separator.
        while self.upload.public_base_url.ends_with('/') {
            self.upload.public_base_url.pop();
        }

        Ok(())
    }
}
