//! # Inkpress - Blogging Backend Library
//!
//! This is a facade crate that re-exports all public APIs from the blog
//! service components. Use this crate to get access to the whole backend in
//! one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Email`, `Password`, `User`, `Post`, etc.
//! - **Repository traits**: `UserStore`, `PostStore`, `MediaStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `CreatePostUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `FsMediaStore`, `TokenIssuer`, `Settings`, etc.
//! - **Service**: `BlogService` - The main entry point for the blog service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use inkpress_core::*;
}

// Re-export most commonly used core types at the root level
pub use inkpress_core::{
    Email, FileUpload, ImageMeta, NewPost, NewUser, Password, Post, PostAuthor, PostFilter,
    PostId, PostPatch, TokenKind, User, UserId, UserUpdate, Username,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use inkpress_core::{
        MediaStore, MediaStoreError, PostStore, PostStoreError, UserStore, UserStoreError,
    };
}

// Re-export repository traits at root level
pub use inkpress_core::{
    MediaStore, MediaStoreError, PostStore, PostStoreError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use inkpress_application::*;
}

// Re-export use cases at root level
pub use inkpress_application::{
    AuthorizeUseCase, ChangePasswordUseCase, CreatePostUseCase, DeleteAccountUseCase,
    DeletePostUseCase, FindPostsUseCase, LoginUseCase, RegisterUseCase, ShowMyPostsUseCase,
    UpdatePostUseCase, UpdateProfileUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use inkpress_adapters::persistence::*;
    }

    /// Media storage
    pub mod media {
        pub use inkpress_adapters::media::*;
    }

    /// JWT token service
    pub mod auth_tokens {
        pub use inkpress_adapters::auth_tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use inkpress_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use inkpress_adapters::{
    AllowedOrigins, Claims, FsMediaStore, HashMapPostStore, HashMapUserStore, PostgresPostStore,
    PostgresUserStore, Settings, TokenConfig, TokenError, TokenIssuer,
};

// ============================================================================
// HTTP Edge
// ============================================================================

/// Axum routes, error surface and guards
pub mod http {
    pub use inkpress_axum::*;
}

pub use inkpress_axum::{ApiError, CurrentUser, UploadLimit};

// ============================================================================
// Blog Service (Main Entry Point)
// ============================================================================

/// Main blog service
pub use inkpress_blog_service::{BlogService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
