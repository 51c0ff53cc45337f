use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Video,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CropMode {
    /// Shrink to fit inside the box, keep aspect ratio, never upscale.
    Limit,
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CropMode::Limit => "limit",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Quality {
    #[serde(rename = "auto:good")]
    AutoGood,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::AutoGood => "auto:good",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FetchFormat {
    /// Output encoding negotiated from the requesting client.
    Auto,
}

impl fmt::Display for FetchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchFormat::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

/// A single image-processing directive applied by the media host.
///
/// Serializes to the same object shape the media host's SDKs accept
/// (`{"width":1200,"height":800,"crop":"limit"}`, `{"quality":"auto:good"}`,
/// `{"fetch_format":"auto"}`); `Display` renders the URL/transformation
/// syntax used on the wire (`c_limit,h_800,w_1200`, `q_auto:good`, `f_auto`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(untagged)]
pub enum TransformationStep {
    Resize {
        width: u32,
        height: u32,
        crop: CropMode,
    },
    Quality {
        quality: Quality,
    },
    FetchFormat {
        fetch_format: FetchFormat,
    },
}

impl fmt::Display for TransformationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Parameters are emitted in alphabetical order, like the vendor SDKs do.
            TransformationStep::Resize {
                width,
                height,
                crop,
            } => write!(f, "c_{crop},h_{height},w_{width}"),
            TransformationStep::Quality { quality } => write!(f, "q_{quality}"),
            TransformationStep::FetchFormat { fetch_format } => write!(f, "f_{fetch_format}"),
        }
    }
}

/// Renders a chain of steps as `step/step/step`.
pub fn transformation_chain(steps: &[TransformationStep]) -> String {
    steps
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Where and how the remote storage should place one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationDescriptor {
    Image {
        folder: String,
        allowed_formats: &'static [&'static str],
        transformation: Vec<TransformationStep>,
    },
    Video {
        folder: String,
        allowed_formats: &'static [&'static str],
    },
}

impl DestinationDescriptor {
    pub fn folder(&self) -> &str {
        match self {
            DestinationDescriptor::Image { folder, .. } => folder,
            DestinationDescriptor::Video { folder, .. } => folder,
        }
    }

    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            DestinationDescriptor::Image { .. } => ResourceKind::Image,
            DestinationDescriptor::Video { .. } => ResourceKind::Video,
        }
    }

    pub fn allowed_formats(&self) -> &'static [&'static str] {
        match self {
            DestinationDescriptor::Image {
                allowed_formats, ..
            } => allowed_formats,
            DestinationDescriptor::Video {
                allowed_formats, ..
            } => allowed_formats,
        }
    }

    /// Empty for video.
    pub fn transformation(&self) -> &[TransformationStep] {
        match self {
            DestinationDescriptor::Image { transformation, .. } => transformation,
            DestinationDescriptor::Video { .. } => &[],
        }
    }

    pub fn allows_format(&self, ext: &str) -> bool {
        self.allowed_formats()
            .iter()
            .any(|f| f.eq_ignore_ascii_case(ext))
    }

    pub fn to_upload_params(&self) -> UploadParams {
        let transformation = match self {
            DestinationDescriptor::Image { transformation, .. } => Some(transformation.clone()),
            DestinationDescriptor::Video { .. } => None,
        };

        UploadParams {
            folder: self.folder().to_string(),
            resource_type: self.resource_kind(),
            allowed_formats: self
                .allowed_formats()
                .iter()
                .map(|f| f.to_string())
                .collect(),
            transformation,
        }
    }
}

/// Per-file parameter set handed to the media host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UploadParams {
    #[schema(example = "noor-automobiles/cars")]
    pub folder: String,
    pub resource_type: ResourceKind,
    #[schema(example = json!(["jpg", "jpeg", "png", "webp"]))]
    pub allowed_formats: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Vec<TransformationStep>>,
}
