pub mod auth_tokens;
pub mod config;
pub mod media;
pub mod persistence;

// Re-export commonly used adapters for convenience
pub use auth_tokens::{Claims, TokenConfig, TokenError, TokenIssuer};
pub use config::settings::{AllowedOrigins, Settings};
pub use media::fs_media_store::FsMediaStore;
pub use persistence::{
    hashmap_post_store::HashMapPostStore, hashmap_user_store::HashMapUserStore,
    postgres_post_store::PostgresPostStore, postgres_user_store::PostgresUserStore,
};
