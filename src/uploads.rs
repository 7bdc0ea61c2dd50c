//! Attachment upload store.
//!
//! Accepts raw image bytes, writes them under the configured directory
//! with a generated name, and hands back the public URL that callers
//! store verbatim in a task's `attachment` field.

use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::{AppError, Result};

/// Accepted image content types and their file extensions.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Local file-backed store for uploaded attachments.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_base_url: String,
    max_bytes: u64,
}

impl UploadStore {
    /// Create a store from the upload configuration.
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            public_base_url: config.public_base_url.clone(),
            max_bytes: config.max_upload_bytes,
        }
    }

    /// Store `bytes` as a new attachment and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upload` if the content type is not an accepted
    /// image type or the payload exceeds the size cap, and `AppError::Io`
    /// if the file cannot be written.
    pub async fn save(&self, bytes: &[u8], content_type: &str) -> Result<String> {
        let extension = extension_for(content_type)
            .ok_or_else(|| AppError::Upload(format!("unsupported content type: {content_type}")))?;

        if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > self.max_bytes {
            return Err(AppError::Upload(format!(
                "payload of {} bytes exceeds limit of {} bytes",
                bytes.len(),
                self.max_bytes
            )));
        }

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| AppError::Io(format!("failed to create upload dir: {err}")))?;

        let name = format!("{}.{extension}", Uuid::new_v4());
        let path = self.dir.join(&name);
        fs::write(&path, bytes)
            .await
            .map_err(|err| AppError::Io(format!("failed to write upload: {err}")))?;

        Ok(format!("{}/{name}", self.public_base_url))
    }

    /// Read a stored attachment back, returning its bytes and content
    /// type.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Upload` for names that escape the upload
    /// directory or carry an unknown extension, and `AppError::NotFound`
    /// if no such file exists.
    pub async fn read(&self, name: &str) -> Result<(Vec<u8>, &'static str)> {
        // Names are generated flat; anything with a separator is an
        // attempt to escape the upload directory.
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::Upload(format!("invalid attachment name: {name}")));
        }

        let content_type = name
            .rsplit_once('.')
            .and_then(|(_, ext)| content_type_for(ext))
            .ok_or_else(|| AppError::Upload(format!("unknown attachment extension: {name}")))?;

        let path = self.dir.join(name);
        match fs::read(&path).await {
            Ok(bytes) => Ok((bytes, content_type)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("attachment not found: {name}")))
            }
            Err(err) => Err(AppError::Io(format!("failed to read upload: {err}"))),
        }
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    IMAGE_TYPES
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
}

fn content_type_for(extension: &str) -> Option<&'static str> {
    IMAGE_TYPES
        .iter()
        .find(|(_, ext)| *ext == extension)
        .map(|(ct, _)| *ct)
}
