use async_trait::async_trait;
use std::path::Path;

use crate::multimedia::application::{
    domain::{
        entities::{DestinationDescriptor, ResourceKind},
        policies::upload_policy::UploadPolicy,
    },
    ports::outgoing::cloud_storage::{RemoteAsset, RemoteStorageError, UploadSource},
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UploadCommandError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid file name")]
    InvalidFileName,

    #[error("File too large (max {max_bytes} bytes, got {actual_bytes} bytes)")]
    FileTooLarge { max_bytes: u64, actual_bytes: u64 },

    #[error("Unsupported file format '{ext}' (allowed: {})", .allowed.join(", "))]
    UnsupportedFormat {
        ext: String,
        allowed: &'static [&'static str],
    },
}

fn sanitize_basename(file_name: &str, max_len: usize) -> Result<String, UploadCommandError> {
    // Browsers on Windows may send full client paths; keep only the last segment.
    let last_segment = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);

    let base = Path::new(last_segment)
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or(UploadCommandError::InvalidFileName)?;

    if base.is_empty() || base.len() > max_len {
        return Err(UploadCommandError::InvalidFileName);
    }

    if base.chars().any(|c| c.is_control()) {
        return Err(UploadCommandError::InvalidFileName);
    }

    Ok(base.to_string())
}

fn ext_lower(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
}

/// A single file ready to be pushed to remote storage, with its destination resolved.
#[derive(Debug, Clone)]
pub struct UploadMediaCommand {
    field_name: String,
    source: UploadSource,
    destination: DestinationDescriptor,
}

impl UploadMediaCommand {
    pub fn builder() -> UploadMediaCommandBuilder {
        UploadMediaCommandBuilder::default()
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }
    pub fn file_name(&self) -> Option<&str> {
        self.source.file_name.as_deref()
    }
    pub fn mime_type(&self) -> Option<&str> {
        self.source.mime_type.as_deref()
    }
    pub fn file_size_bytes(&self) -> u64 {
        self.source.bytes.len() as u64
    }
    pub fn destination(&self) -> &DestinationDescriptor {
        &self.destination
    }

    pub fn into_parts(self) -> (String, UploadSource, DestinationDescriptor) {
        (self.field_name, self.source, self.destination)
    }
}

#[derive(Default)]
pub struct UploadMediaCommandBuilder {
    field_name: Option<String>,
    file_name: Option<String>,
    mime_type: Option<String>,
    bytes: Option<Vec<u8>>,
}

impl UploadMediaCommandBuilder {
    pub fn field_name(mut self, field_name: String) -> Self {
        self.field_name = Some(field_name);
        self
    }

    pub fn file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name;
        self
    }

    pub fn mime_type(mut self, mime_type: Option<String>) -> Self {
        self.mime_type = mime_type;
        self
    }

    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// Build a validated command using injected policy (no hardcoded constants).
    pub fn build(self, policy: &UploadPolicy) -> Result<UploadMediaCommand, UploadCommandError> {
        let field_name = self
            .field_name
            .filter(|f| !f.is_empty())
            .ok_or(UploadCommandError::MissingField("field_name"))?;
        let bytes = self
            .bytes
            .ok_or(UploadCommandError::MissingField("file"))?;

        // 1) Filename hardening
        let file_name = match self.file_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Some(sanitize_basename(name, policy.max_file_name_len)?)
            }
            _ => None,
        };

        // 2) File size rule
        let actual_bytes = bytes.len() as u64;
        if actual_bytes > policy.max_file_size_bytes {
            return Err(UploadCommandError::FileTooLarge {
                max_bytes: policy.max_file_size_bytes,
                actual_bytes,
            });
        }

        // 3) Destination + extension allow-list.
        // Without an extension the media host's own allowed_formats check decides.
        let destination = policy.resolve(&field_name, self.mime_type.as_deref());
        if let Some(ext) = file_name.as_deref().and_then(ext_lower) {
            if !destination.allows_format(&ext) {
                return Err(UploadCommandError::UnsupportedFormat {
                    ext,
                    allowed: destination.allowed_formats(),
                });
            }
        }

        Ok(UploadMediaCommand {
            field_name,
            source: UploadSource {
                file_name,
                mime_type: self.mime_type,
                bytes,
            },
            destination,
        })
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UploadMediaError {
    #[error("Upload rejected by media host: {0}")]
    Rejected(String),

    #[error("Media host authentication failed")]
    Unauthorized,

    #[error("Storage service error: {0}")]
    StorageError(String),
}

impl From<RemoteStorageError> for UploadMediaError {
    fn from(error: RemoteStorageError) -> Self {
        match error {
            RemoteStorageError::Rejected(msg) => UploadMediaError::Rejected(msg),
            RemoteStorageError::Unauthorized => UploadMediaError::Unauthorized,
            other => UploadMediaError::StorageError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    pub field_name: String,
    pub folder: String,
    pub resource_kind: ResourceKind,
    pub asset: RemoteAsset,
}

#[async_trait]
pub trait UploadMediaUseCase: Send + Sync {
    async fn execute(&self, command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError>;
}
