use std::sync::Arc;

use crate::multimedia::application::ports::incoming::use_cases::UploadMediaUseCase;

#[derive(Clone)]
pub struct MultimediaUseCases {
    pub upload_media: Arc<dyn UploadMediaUseCase + Send + Sync>,
}
