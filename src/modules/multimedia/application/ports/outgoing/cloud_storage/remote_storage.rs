use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::multimedia::application::domain::entities::{DestinationDescriptor, ResourceKind};

// ============================================================================
// Domain Types
// ============================================================================

/// File bytes plus the metadata the media host needs to ingest them.
#[derive(Clone, PartialEq)]
pub struct UploadSource {
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSource")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

/// Reference to an asset stored by the media host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteAsset {
    pub public_id: String,
    pub secure_url: String,
    pub resource_type: ResourceKind,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub version: Option<u64>,
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when uploading to the media host.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RemoteStorageError {
    /// The media host refused the file (disallowed format, corrupt file, ...).
    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Media host rejected the configured credentials")]
    Unauthorized,

    #[error("Infrastructure error occurred: {0}")]
    Infrastructure(String),

    #[error("Unexpected response from media host: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// Port Interface
// ============================================================================

/// Port for pushing file bytes to remote media storage.
///
/// Implementations must honour every part of the destination: folder,
/// resource kind, allowed formats and transformation chain.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    async fn upload(
        &self,
        source: UploadSource,
        destination: &DestinationDescriptor,
    ) -> Result<RemoteAsset, RemoteStorageError>;
}
