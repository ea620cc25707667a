pub mod fs_media_store;

pub use fs_media_store::FsMediaStore;
