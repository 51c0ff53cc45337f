use async_trait::async_trait;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::multimedia::adapter::outgoing::cloud_storage::cloudinary_config::{
    CloudinaryConfig, SignatureAlgorithm,
};
use crate::multimedia::application::domain::entities::{
    transformation_chain, DestinationDescriptor,
};
use crate::multimedia::application::ports::outgoing::cloud_storage::{
    RemoteAsset, RemoteStorage, RemoteStorageError, UploadSource,
};

/// Part name used when the client did not send a file name.
const FALLBACK_FILE_NAME: &str = "upload";

/// Signs request parameters the way the media host expects:
/// `k1=v1&k2=v2...` sorted by key, empty values skipped, secret appended, hex digest.
pub fn sign_params(
    params: &BTreeMap<&str, String>,
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let to_sign = params
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let payload = format!("{to_sign}{api_secret}");

    match algorithm {
        SignatureAlgorithm::Sha1 => hex::encode(Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(payload.as_bytes())),
    }
}

/// The parameters that travel with the file and take part in the signature.
fn signed_params(destination: &DestinationDescriptor, timestamp: i64) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    params.insert("folder", destination.folder().to_string());
    params.insert("allowed_formats", destination.allowed_formats().join(","));
    params.insert("timestamp", timestamp.to_string());

    let transformation = transformation_chain(destination.transformation());
    if !transformation.is_empty() {
        params.insert("transformation", transformation);
    }

    params
}

#[derive(Debug, Deserialize)]
struct VendorErrorBody {
    error: VendorErrorDetail,
}

#[derive(Debug, Deserialize)]
struct VendorErrorDetail {
    message: String,
}

fn vendor_error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<VendorErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status))
}

fn map_reply(reply: HttpReply) -> Result<RemoteAsset, RemoteStorageError> {
    match reply.status {
        200..=299 => serde_json::from_slice::<RemoteAsset>(&reply.body)
            .map_err(|e| RemoteStorageError::InvalidResponse(e.to_string())),
        401 | 403 => Err(RemoteStorageError::Unauthorized),
        400..=499 => Err(RemoteStorageError::Rejected(vendor_error_message(
            reply.status,
            &reply.body,
        ))),
        status => Err(RemoteStorageError::Infrastructure(vendor_error_message(
            status,
            &reply.body,
        ))),
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Everything needed for one multipart upload request.
#[derive(Debug, Clone, PartialEq)]
struct UploadForm {
    fields: Vec<(&'static str, String)>,
    file_name: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
struct HttpReply {
    status: u16,
    body: Vec<u8>,
}

/// Transport used by [`CloudinaryStorage`]; reqwest in production.
#[async_trait]
trait CloudinaryHttp: Send + Sync {
    async fn post_form(&self, url: &str, form: UploadForm) -> Result<HttpReply, String>;
}

/// Production adapter: implements the RemoteStorage port with signed uploads.
#[derive(Clone)]
pub struct CloudinaryStorage {
    config: Arc<CloudinaryConfig>,
    http: Arc<dyn CloudinaryHttp>,
    clock: fn() -> i64,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Result<Self, RemoteStorageError> {
        let http = ReqwestCloudinaryHttp::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            http: Arc::new(http),
            clock: unix_now,
        })
    }

    /// Test-friendly constructor with a fake transport and fixed clock.
    #[cfg(test)]
    fn with_client(config: CloudinaryConfig, http: Arc<dyn CloudinaryHttp>, clock: fn() -> i64) -> Self {
        Self {
            config: Arc::new(config),
            http,
            clock,
        }
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    fn build_form(&self, source: UploadSource, destination: &DestinationDescriptor) -> UploadForm {
        let params = signed_params(destination, (self.clock)());
        let signature = sign_params(
            &params,
            &self.config.api_secret,
            self.config.signature_algorithm,
        );

        let mut fields: Vec<(&'static str, String)> = params.into_iter().collect();
        fields.push(("api_key", self.config.api_key.clone()));
        fields.push(("signature", signature));

        UploadForm {
            fields,
            file_name: source
                .file_name
                .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string()),
            mime_type: source.mime_type,
            bytes: source.bytes,
        }
    }
}

#[async_trait]
impl RemoteStorage for CloudinaryStorage {
    async fn upload(
        &self,
        source: UploadSource,
        destination: &DestinationDescriptor,
    ) -> Result<RemoteAsset, RemoteStorageError> {
        let url = self
            .config
            .upload_url(destination.resource_kind().as_str());
        let form = self.build_form(source, destination);

        let reply = self
            .http
            .post_form(&url, form)
            .await
            .map_err(RemoteStorageError::Infrastructure)?;

        map_reply(reply)
    }
}

// ============================================================================
// Real HTTP client (reqwest)
// ============================================================================

struct ReqwestCloudinaryHttp {
    client: reqwest::Client,
}

impl ReqwestCloudinaryHttp {
    fn new(config: &CloudinaryConfig) -> Result<Self, RemoteStorageError> {
        let client = reqwest::Client::builder()
            .timeout(config.upload_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build media host HTTP client: {:?}", e);
                RemoteStorageError::Infrastructure(e.to_string())
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CloudinaryHttp for ReqwestCloudinaryHttp {
    async fn post_form(&self, url: &str, form: UploadForm) -> Result<HttpReply, String> {
        let mut file_part =
            reqwest::multipart::Part::bytes(form.bytes).file_name(form.file_name);
        if let Some(mime) = form.mime_type.as_deref() {
            file_part = file_part
                .mime_str(mime)
                .map_err(|e| format!("invalid mime type {mime}: {e}"))?;
        }

        let mut multipart = reqwest::multipart::Form::new();
        for (key, value) in form.fields {
            multipart = multipart.text(key, value);
        }
        multipart = multipart.part("file", file_part);

        let response = self
            .client
            .post(url)
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| e.to_string())?;

        Ok(HttpReply {
            status,
            body: body.to_vec(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
