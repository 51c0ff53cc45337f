use crate::multimedia::application::domain::policies::upload_policy::UploadPolicy;
use crate::multimedia::application::media_use_cases::MultimediaUseCases;
use crate::multimedia::application::ports::incoming::use_cases::UploadMediaUseCase;
use crate::tests::support::stubs::StubUploadMediaUseCase;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    upload_media: Option<Arc<dyn UploadMediaUseCase + Send + Sync>>,
    upload_policy: Option<UploadPolicy>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            upload_media: Some(Arc::new(StubUploadMediaUseCase::success())),
            upload_policy: Some(UploadPolicy::default()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_upload_media(
        mut self,
        uc: impl UploadMediaUseCase + Send + Sync + 'static,
    ) -> Self {
        self.upload_media = Some(Arc::new(uc));
        self
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = Some(policy);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            multimedia: MultimediaUseCases {
                upload_media: self
                    .upload_media
                    .unwrap_or_else(|| Arc::new(StubUploadMediaUseCase::success())),
            },
            multimedia_upload_policy: self.upload_policy.unwrap_or_default(),
        })
    }
}
