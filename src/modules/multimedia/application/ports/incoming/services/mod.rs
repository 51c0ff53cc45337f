mod upload_media_service;
pub use upload_media_service::UploadMediaService;
