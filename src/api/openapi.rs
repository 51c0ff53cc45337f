use crate::api::schemas::{ErrorCode, ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::OpenApi;

use crate::health::HealthResponse;
use crate::multimedia::adapter::incoming::web::routes::{
    PreviewUploadPolicyRequest, UploadMediaForm, UploadMediaResponse, UploadedFileResponse,
};
use crate::multimedia::application::domain::entities::{
    CropMode, FetchFormat, Quality, ResourceKind, TransformationStep, UploadParams,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noor Automobiles Media API",
        version = "1.0.0",
        description = "Upload gateway for car and spare-part photos and videos"
    ),
    paths(
        crate::health::health,
        crate::multimedia::adapter::incoming::web::routes::upload_media_handler,
        crate::multimedia::adapter::incoming::web::routes::preview_upload_policy_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<UploadMediaResponse>,
            SuccessResponse<UploadParams>,
            ErrorResponse,
            ErrorDetail,
            ErrorCode,
            HealthResponse,

            // Media DTOs
            UploadMediaForm,
            UploadMediaResponse,
            UploadedFileResponse,
            PreviewUploadPolicyRequest,

            // Domain
            UploadParams,
            ResourceKind,
            TransformationStep,
            CropMode,
            Quality,
            FetchFormat,
        )
    ),
    tags(
        (name = "media", description = "Media upload endpoints"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
