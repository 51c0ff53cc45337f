pub mod cloudinary_config;
mod remote_storage_cloudinary;

pub use cloudinary_config::CloudinaryConfig;
pub use remote_storage_cloudinary::CloudinaryStorage;
