mod upload_media;
pub use upload_media::{
    UploadCommandError, UploadMediaCommand, UploadMediaCommandBuilder, UploadMediaError,
    UploadMediaUseCase, UploadedMedia,
};
