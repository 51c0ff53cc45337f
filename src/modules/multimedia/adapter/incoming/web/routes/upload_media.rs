// src/modules/multimedia/adapter/incoming/web/routes/upload_media.rs

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{post, web, Responder};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::multimedia::application::domain::entities::ResourceKind;
use crate::multimedia::application::ports::incoming::use_cases::{
    UploadCommandError, UploadMediaCommand, UploadMediaError, UploadedMedia,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request schema (documentation only)
// ──────────────────────────────────────────────────────────
//

/// Any field name is accepted; `parts` is routed to the parts folder and
/// everything else to the cars folder.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadMediaForm {
    /// Car photo (jpg, jpeg, png, webp) or video (mp4, webm, mov)
    #[schema(value_type = String, format = Binary)]
    cars: Vec<u8>,
    /// Spare part photo or video
    #[schema(value_type = String, format = Binary)]
    parts: Vec<u8>,
}

//
// ──────────────────────────────────────────────────────────
// Response DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileResponse {
    #[schema(example = "cars")]
    pub field_name: String,
    #[schema(example = "noor-automobiles/cars")]
    pub folder: String,
    pub resource_type: ResourceKind,
    #[schema(example = "noor-automobiles/cars/k2x8sd0v1m")]
    pub public_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<UploadedMedia> for UploadedFileResponse {
    fn from(m: UploadedMedia) -> Self {
        Self {
            field_name: m.field_name,
            folder: m.folder,
            resource_type: m.resource_kind,
            public_id: m.asset.public_id,
            url: m.asset.secure_url,
            format: m.asset.format,
            bytes: m.asset.bytes,
            width: m.asset.width,
            height: m.asset.height,
            duration: m.asset.duration,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadMediaResponse {
    pub files: Vec<UploadedFileResponse>,
}

//
// ──────────────────────────────────────────────────────────
// Field reading
// ──────────────────────────────────────────────────────────
//

enum FieldReadError {
    TooLarge { max_bytes: u64 },
    Multipart(MultipartError),
}

/// Buffers one field, giving up as soon as it grows past `max_bytes`.
async fn read_field_limited(field: &mut Field, max_bytes: u64) -> Result<Vec<u8>, FieldReadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(FieldReadError::Multipart)?;
        if (bytes.len() + chunk.len()) as u64 > max_bytes {
            return Err(FieldReadError::TooLarge { max_bytes });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn drain_field(field: &mut Field) -> Result<(), MultipartError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}

//
// ──────────────────────────────────────────────────────────
// Handler
// ──────────────────────────────────────────────────────────
//

/// Upload car and spare-part media
///
/// Reads each file part of a `multipart/form-data` request into memory (up to the
/// size limit) and forwards it to the media host.
/// Folder and processing are chosen per file from its field name and MIME type.
#[utoipa::path(
    post,
    path = "/api/media/upload",
    tag = "media",
    request_body(content = UploadMediaForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "All files uploaded", body = inline(SuccessResponse<UploadMediaResponse>)),
        (status = 400, description = "Malformed multipart body or no file", body = ErrorResponse),
        (status = 413, description = "A file exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "File extension not allowed for its media type", body = ErrorResponse),
        (status = 422, description = "Media host rejected the file", body = ErrorResponse),
        (status = 502, description = "Media host unavailable or credentials rejected", body = ErrorResponse),
    )
)]
#[post("/api/media/upload")]
pub async fn upload_media_handler(
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let policy = &data.multimedia_upload_policy;
    let mut uploaded: Vec<UploadedFileResponse> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => return map_multipart_error(e),
        };

        // An unselected file input arrives as `filename=""` with no body.
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        // Plain form values and empty file inputs are not uploads.
        if file_name.is_none() {
            if let Err(e) = drain_field(&mut field).await {
                return map_multipart_error(e);
            }
            continue;
        }

        let field_name = field.name().unwrap_or_default().to_string();
        let mime_type = field.content_type().map(|m| m.essence_str().to_string());

        let bytes = match read_field_limited(&mut field, policy.max_file_size_bytes).await {
            Ok(bytes) => bytes,
            Err(FieldReadError::TooLarge { max_bytes }) => {
                warn!(field_name = %field_name, "upload exceeds {} bytes", max_bytes);
                return ApiResponse::payload_too_large(
                    "FILE_TOO_LARGE",
                    &format!("File too large (max {} bytes)", max_bytes),
                );
            }
            Err(FieldReadError::Multipart(e)) => return map_multipart_error(e),
        };

        // Build upload command
        let command = match UploadMediaCommand::builder()
            .field_name(field_name)
            .file_name(file_name)
            .mime_type(mime_type)
            .bytes(bytes)
            .build(policy)
        {
            Ok(cmd) => cmd,
            Err(e) => return map_command_error(e),
        };

        // Execute use case
        match data.multimedia.upload_media.execute(command).await {
            Ok(media) => uploaded.push(media.into()),
            Err(e) => return map_upload_error(e),
        }
    }

    if uploaded.is_empty() {
        return ApiResponse::bad_request("MISSING_FILE", "No file was provided");
    }

    ApiResponse::created(UploadMediaResponse { files: uploaded })
}

fn map_multipart_error(e: MultipartError) -> actix_web::HttpResponse {
    warn!("Malformed multipart request: {}", e);
    ApiResponse::bad_request("INVALID_MULTIPART", &format!("Invalid multipart body: {}", e))
}

fn map_command_error(e: UploadCommandError) -> actix_web::HttpResponse {
    match e {
        UploadCommandError::MissingField(field) => {
            ApiResponse::bad_request("MISSING_FIELD", &format!("Missing field: {}", field))
        }
        UploadCommandError::InvalidFileName => {
            ApiResponse::bad_request("INVALID_FILE_NAME", "Invalid file name")
        }
        UploadCommandError::FileTooLarge { max_bytes, .. } => ApiResponse::payload_too_large(
            "FILE_TOO_LARGE",
            &format!("File too large (max {} bytes)", max_bytes),
        ),
        e @ UploadCommandError::UnsupportedFormat { .. } => {
            ApiResponse::unsupported_media_type("UNSUPPORTED_FORMAT", &e.to_string())
        }
    }
}

fn map_upload_error(e: UploadMediaError) -> actix_web::HttpResponse {
    match e {
        UploadMediaError::Rejected(msg) => ApiResponse::unprocessable("UPLOAD_REJECTED", &msg),
        UploadMediaError::Unauthorized => {
            error!("Media host rejected the configured credentials");
            ApiResponse::bad_gateway(
                "STORAGE_AUTH_FAILED",
                "Media storage rejected the service credentials",
            )
        }
        UploadMediaError::StorageError(e) => {
            error!("Storage error uploading media: {}", e);
            ApiResponse::bad_gateway("STORAGE_ERROR", "Failed to upload media")
        }
    }
}
