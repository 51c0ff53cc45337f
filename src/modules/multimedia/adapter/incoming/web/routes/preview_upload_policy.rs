use actix_web::{post, web, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::multimedia::application::domain::entities::UploadParams;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewUploadPolicyRequest {
    /// Multipart field name the file would be sent under
    #[schema(example = "parts")]
    pub field_name: String,
    /// Declared MIME type of the file
    #[schema(example = "video/mp4")]
    pub mime_type: Option<String>,
}

/// Preview upload parameters
///
/// Returns the folder, resource type, allowed formats and transformation the
/// upload endpoint would use for a file with this field name and MIME type.
#[utoipa::path(
    post,
    path = "/api/media/upload-policy",
    tag = "media",
    request_body = PreviewUploadPolicyRequest,
    responses(
        (status = 200, description = "Resolved upload parameters", body = inline(SuccessResponse<UploadParams>)),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
    )
)]
#[post("/api/media/upload-policy")]
pub async fn preview_upload_policy_handler(
    req: web::Json<PreviewUploadPolicyRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let destination = data
        .multimedia_upload_policy
        .resolve(&req.field_name, req.mime_type.as_deref());

    ApiResponse::success(destination.to_upload_params())
}
