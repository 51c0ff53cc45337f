mod preview_upload_policy;
mod upload_media;

pub use preview_upload_policy::{preview_upload_policy_handler, PreviewUploadPolicyRequest};
pub use upload_media::{
    upload_media_handler, UploadMediaForm, UploadMediaResponse, UploadedFileResponse,
};

// OpenAPI path descriptors
pub use preview_upload_policy::__path_preview_upload_policy_handler;
pub use upload_media::__path_upload_media_handler;
