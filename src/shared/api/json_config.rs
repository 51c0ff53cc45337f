// src/shared/api/json_config.rs
use crate::shared::api::ApiResponse;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::JsonConfig;

/// JSON bodies are small descriptors; file bytes only arrive as multipart.
pub const JSON_LIMIT_BYTES: usize = 16 * 1024;

pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let message = err.to_string();
            let response = match &err {
                JsonPayloadError::ContentType => ApiResponse::unsupported_media_type(
                    "INVALID_CONTENT_TYPE",
                    "Expected application/json",
                ),
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    ApiResponse::payload_too_large("PAYLOAD_TOO_LARGE", &message)
                }
                _ => ApiResponse::bad_request("VALIDATION_ERROR", &message),
            };
            InternalError::from_response(err, response).into()
        })
}
