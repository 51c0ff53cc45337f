mod remote_storage;

pub use remote_storage::{RemoteAsset, RemoteStorage, RemoteStorageError, UploadSource};
