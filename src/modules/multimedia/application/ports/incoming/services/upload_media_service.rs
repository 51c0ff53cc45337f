use async_trait::async_trait;

use crate::multimedia::application::ports::{
    incoming::use_cases::{UploadMediaCommand, UploadMediaError, UploadMediaUseCase, UploadedMedia},
    outgoing::cloud_storage::RemoteStorage,
};

pub struct UploadMediaService<S>
where
    S: RemoteStorage,
{
    storage: S,
}

impl<S> UploadMediaService<S>
where
    S: RemoteStorage,
{
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S> UploadMediaUseCase for UploadMediaService<S>
where
    S: RemoteStorage + Send + Sync,
{
    async fn execute(&self, command: UploadMediaCommand) -> Result<UploadedMedia, UploadMediaError> {
        let (field_name, source, destination) = command.into_parts();
        let size_bytes = source.bytes.len();

        tracing::info!(
            field_name = %field_name,
            folder = %destination.folder(),
            resource_kind = %destination.resource_kind(),
            size_bytes,
            "uploading media to remote storage"
        );

        let asset = match self.storage.upload(source, &destination).await {
            Ok(asset) => asset,
            Err(e) => {
                tracing::error!(
                    field_name = %field_name,
                    folder = %destination.folder(),
                    "remote upload failed: {}",
                    e
                );
                return Err(UploadMediaError::from(e));
            }
        };

        tracing::info!(
            field_name = %field_name,
            public_id = %asset.public_id,
            "media uploaded"
        );

        Ok(UploadedMedia {
            field_name,
            folder: destination.folder().to_string(),
            resource_kind: destination.resource_kind(),
            asset,
        })
    }
}
