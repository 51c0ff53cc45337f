use std::env;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    Sha1,
    Sha256,
}

impl SignatureAlgorithm {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sha1" => Some(SignatureAlgorithm::Sha1),
            "sha256" => Some(SignatureAlgorithm::Sha256),
            _ => None,
        }
    }
}

/// Account identity and transport settings for the media host.
///
/// Built once at start-up and shared read-only by every worker.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
    pub signature_algorithm: SignatureAlgorithm,
    pub upload_timeout: Duration,
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("signature_algorithm", &self.signature_algorithm)
            .field("upload_timeout", &self.upload_timeout)
            .finish()
    }
}

impl CloudinaryConfig {
    pub const DEFAULT_API_BASE_URL: &'static str = "https://api.cloudinary.com/v1_1";
    pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;

    /// Credentials are not validated here: a missing or wrong value shows up as
    /// an authentication failure on the first upload.
    fn credential(key: &str) -> String {
        let value = env::var(key).unwrap_or_default();
        if value.trim().is_empty() {
            tracing::warn!("{} is not set; uploads will fail to authenticate", key);
        }
        value.trim().to_string()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let cloud_name = Self::credential("CLOUDINARY_CLOUD_NAME");
        let api_key = Self::credential("CLOUDINARY_API_KEY");
        let api_secret = Self::credential("CLOUDINARY_API_SECRET");

        let api_base_url = env::var("CLOUDINARY_API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_API_BASE_URL.to_string());

        let signature_algorithm = match env::var("CLOUDINARY_SIGNATURE_ALGORITHM") {
            Ok(v) => SignatureAlgorithm::parse(&v)
                .unwrap_or_else(|| panic!("Invalid CLOUDINARY_SIGNATURE_ALGORITHM value: {}", v)),
            Err(_) => SignatureAlgorithm::Sha1,
        };

        let upload_timeout_secs = env::var("CLOUDINARY_UPLOAD_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_UPLOAD_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or_else(|_| panic!("Invalid CLOUDINARY_UPLOAD_TIMEOUT_SECS value"));

        if upload_timeout_secs == 0 {
            panic!("CLOUDINARY_UPLOAD_TIMEOUT_SECS must be greater than 0");
        }

        Self {
            cloud_name,
            api_key,
            api_secret,
            api_base_url,
            signature_algorithm,
            upload_timeout: Duration::from_secs(upload_timeout_secs),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    /// `{base}/{cloud_name}/{resource_type}/upload`
    pub fn upload_url(&self, resource_type: &str) -> String {
        format!(
            "{}/{}/{}/upload",
            self.api_base_url.trim_end_matches('/'),
            self.cloud_name,
            resource_type
        )
    }
}
