use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::multimedia::application::ports::incoming::use_cases::{
    UploadMediaCommand, UploadMediaError, UploadMediaUseCase, UploadedMedia,
};
use crate::multimedia::application::ports::outgoing::cloud_storage::RemoteAsset;

/// Records every command it receives.
///
/// Clones share the same call log, so a test can keep one handle and give
/// the other to the app state.
#[derive(Clone)]
pub struct StubUploadMediaUseCase {
    outcome: Result<(), UploadMediaError>,
    calls: Arc<Mutex<Vec<UploadMediaCommand>>>,
}

impl StubUploadMediaUseCase {
    pub fn success() -> Self {
        Self {
            outcome: Ok(()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failure(error: UploadMediaError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<UploadMediaCommand> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadMediaUseCase for StubUploadMediaUseCase {
    async fn execute(&self, command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError> {
        self.calls.lock().unwrap().push(command.clone());
        self.outcome.clone()?;

        let destination = command.destination();
        let stem = command
            .file_name()
            .and_then(|n| n.rsplit_once('.').map(|(stem, _)| stem.to_string()))
            .unwrap_or_else(|| "upload".to_string());
        let public_id = format!("{}/{}", destination.folder(), stem);
        let kind = destination.resource_kind();

        Ok(UploadedMedia {
            field_name: command.field_name().to_string(),
            folder: destination.folder().to_string(),
            resource_kind: kind,
            asset: RemoteAsset {
                secure_url: format!("https://res.cloudinary.com/demo/{kind}/upload/v1/{public_id}"),
                public_id,
                resource_type: kind,
                format: command
                    .file_name()
                    .and_then(|n| n.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())),
                bytes: command.file_size_bytes(),
                width: None,
                height: None,
                duration: None,
                version: Some(1),
            },
        })
    }
}
