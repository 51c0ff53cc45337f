use crate::multimedia::application::domain::entities::{
    CropMode, DestinationDescriptor, FetchFormat, Quality, TransformationStep,
};

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub max_file_name_len: usize,
    pub folder_namespace: String,
}

impl UploadPolicy {
    pub const DEFAULT_FOLDER_NAMESPACE: &'static str = "noor-automobiles";
    pub const MAX_FILE_SIZE_BYTES: u64 = 50 * 1024 * 1024; // 50MB
    pub const PARTS_FIELD: &'static str = "parts";
    pub const PARTS_FOLDER: &'static str = "parts";
    pub const CARS_FOLDER: &'static str = "cars";
    pub const IMAGE_FORMATS: &'static [&'static str] = &["jpg", "jpeg", "png", "webp"];
    pub const VIDEO_FORMATS: &'static [&'static str] = &["mp4", "webm", "mov"];
    pub const IMAGE_MAX_WIDTH_PX: u32 = 1200;
    pub const IMAGE_MAX_HEIGHT_PX: u32 = 800;
    pub const VIDEO_MIME_PREFIX: &'static str = "video/";

    /// Load policy with `folder_namespace` from env var, fallback to "noor-automobiles".
    ///
    /// Env var name: `UPLOAD_FOLDER_NAMESPACE`
    pub fn from_env() -> Self {
        let folder_namespace = std::env::var("UPLOAD_FOLDER_NAMESPACE")
            .ok()
            .map(|s| s.trim().trim_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_FOLDER_NAMESPACE.to_string());

        Self::new(folder_namespace)
    }

    /// Handy for unit tests or custom wiring (no env reads).
    pub fn new(folder_namespace: String) -> Self {
        Self {
            max_file_size_bytes: Self::MAX_FILE_SIZE_BYTES,
            max_file_name_len: 255,
            folder_namespace,
        }
    }

    /// Decide where and how a file is stored, from its form field name and MIME type.
    ///
    /// Total over its input: unknown field names land in the cars folder and
    /// anything that is not `video/*` (including a missing MIME type) is
    /// treated as an image.
    pub fn resolve(&self, field_name: &str, mime_type: Option<&str>) -> DestinationDescriptor {
        let sub_folder = if field_name == Self::PARTS_FIELD {
            Self::PARTS_FOLDER
        } else {
            Self::CARS_FOLDER
        };
        let folder = format!("{}/{}", self.folder_namespace, sub_folder);

        // MIME types are case-insensitive; actix already lowercases parsed ones.
        let is_video = mime_type
            .and_then(|m| m.get(..Self::VIDEO_MIME_PREFIX.len()))
            .is_some_and(|p| p.eq_ignore_ascii_case(Self::VIDEO_MIME_PREFIX));
        if is_video {
            return DestinationDescriptor::Video {
                folder,
                allowed_formats: Self::VIDEO_FORMATS,
            };
        }

        DestinationDescriptor::Image {
            folder,
            allowed_formats: Self::IMAGE_FORMATS,
            transformation: vec![
                TransformationStep::Resize {
                    width: Self::IMAGE_MAX_WIDTH_PX,
                    height: Self::IMAGE_MAX_HEIGHT_PX,
                    crop: CropMode::Limit,
                },
                TransformationStep::Quality {
                    quality: Quality::AutoGood,
                },
                TransformationStep::FetchFormat {
                    fetch_format: FetchFormat::Auto,
                },
            ],
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOLDER_NAMESPACE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multimedia::application::domain::entities::ResourceKind;

    fn policy() -> UploadPolicy {
        UploadPolicy::default()
    }

    fn assert_image_chain(d: &DestinationDescriptor) {
        assert_eq!(
            d.transformation(),
            &[
                TransformationStep::Resize {
                    width: 1200,
                    height: 800,
                    crop: CropMode::Limit,
                },
                TransformationStep::Quality {
                    quality: Quality::AutoGood,
                },
                TransformationStep::FetchFormat {
                    fetch_format: FetchFormat::Auto,
                },
            ]
        );
    }

    #[test]
    fn test_cars_png_goes_to_cars_as_image() {
        let d = policy().resolve("cars", Some("image/png"));

        assert_eq!(d.folder(), "noor-automobiles/cars");
        assert_eq!(d.resource_kind(), ResourceKind::Image);
        assert_eq!(d.allowed_formats(), &["jpg", "jpeg", "png", "webp"]);
        assert_image_chain(&d);
    }

    #[test]
    fn test_parts_mp4_goes_to_parts_as_video() {
        let d = policy().resolve("parts", Some("video/mp4"));

        assert_eq!(d.folder(), "noor-automobiles/parts");
        assert_eq!(d.resource_kind(), ResourceKind::Video);
        assert_eq!(d.allowed_formats(), &["mp4", "webm", "mov"]);
        assert!(d.transformation().is_empty());
    }

    #[test]
    fn test_parts_webp_goes_to_parts_as_image() {
        let d = policy().resolve("parts", Some("image/webp"));

        assert_eq!(d.folder(), "noor-automobiles/parts");
        assert_eq!(d.resource_kind(), ResourceKind::Image);
        assert_eq!(d.allowed_formats(), &["jpg", "jpeg", "png", "webp"]);
        assert_image_chain(&d);
    }

    #[test]
    fn test_cars_webm_goes_to_cars_as_video() {
        let d = policy().resolve("cars", Some("video/webm"));

        assert_eq!(d.folder(), "noor-automobiles/cars");
        assert_eq!(d.resource_kind(), ResourceKind::Video);
        assert_eq!(d.allowed_formats(), &["mp4", "webm", "mov"]);
    }

    #[test]
    fn test_unknown_field_names_default_to_cars() {
        for field in ["gallery", "Parts", "parts ", "", "part"] {
            let d = policy().resolve(field, Some("image/jpeg"));
            assert_eq!(d.folder(), "noor-automobiles/cars", "field {field:?}");
        }
    }

    #[test]
    fn test_video_prefix_is_case_insensitive() {
        for mime in ["Video/mp4", "VIDEO/QUICKTIME", "video/webm"] {
            let d = policy().resolve("parts", Some(mime));
            assert_eq!(d.resource_kind(), ResourceKind::Video, "mime {mime}");
            assert!(d.transformation().is_empty());
        }
    }

    #[test]
    fn test_short_or_multibyte_mime_is_image() {
        for mime in ["vid", "vidéo/mp4", "é"] {
            let d = policy().resolve("cars", Some(mime));
            assert_eq!(d.resource_kind(), ResourceKind::Image, "mime {mime}");
        }
    }

    #[test]
    fn test_non_video_mime_types_default_to_image() {
        for mime in [
            Some("application/pdf"),
            Some("videos"),
            Some(""),
            Some("not a mime"),
            None,
        ] {
            let d = policy().resolve("cars", mime);
            assert_eq!(d.resource_kind(), ResourceKind::Image, "mime {mime:?}");
            assert_image_chain(&d);
        }
    }

    #[test]
    fn test_any_video_subtype_is_video() {
        for mime in ["video/quicktime", "video/x-matroska", "video/"] {
            let d = policy().resolve("parts", Some(mime));
            assert_eq!(d.resource_kind(), ResourceKind::Video, "mime {mime}");
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let p = policy();
        assert_eq!(
            p.resolve("parts", Some("image/png")),
            p.resolve("parts", Some("image/png"))
        );
        assert_eq!(
            p.resolve("cars", Some("video/mov")),
            p.resolve("cars", Some("video/mov"))
        );
    }

    #[test]
    fn test_custom_namespace() {
        let p = UploadPolicy::new("staging".to_string());
        assert_eq!(p.resolve("parts", None).folder(), "staging/parts");
        assert_eq!(p.max_file_size_bytes, 50 * 1024 * 1024);
    }
}
