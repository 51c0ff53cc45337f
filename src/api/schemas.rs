// src/api/schemas.rs
//! Envelope shapes shared by every media endpoint, for the OpenAPI document.
//! Handlers build the same JSON through `shared::api::ApiResponse`.
use serde::Serialize;
use utoipa::ToSchema;

/// `{ "success": true, "data": ... }`
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// `{ "success": false, "error": { "code", "message" } }`
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: ErrorCode,

    /// Safe to show to the uploader. Storage failures never carry vendor details.
    #[schema(example = "Unsupported file format 'gif' (allowed: jpg, jpeg, png, webp)")]
    pub message: String,
}

/// Every code the media endpoints can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// 400: required multipart field missing
    MissingField,
    /// 400: file name empty, too long or with control characters
    InvalidFileName,
    /// 400: body is not valid multipart
    InvalidMultipart,
    /// 400: multipart body contained no file part
    MissingFile,
    /// 400: JSON body could not be parsed
    ValidationError,
    /// 413: a single file exceeds the size ceiling
    FileTooLarge,
    /// 413: JSON body exceeds the size ceiling
    PayloadTooLarge,
    /// 415: extension not allowed for the file's media type
    UnsupportedFormat,
    /// 415: JSON endpoint called without `application/json`
    InvalidContentType,
    /// 422: media host refused the file
    UploadRejected,
    /// 502: media host rejected the service credentials
    StorageAuthFailed,
    /// 502: media host unreachable or failing
    StorageError,
}
