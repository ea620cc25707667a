//! Axum route handlers, one module per endpoint.

pub mod change_password;
pub mod create_post;
pub mod delete_account;
pub mod delete_post;
pub mod download_file;
pub mod find_posts;
pub mod login;
pub mod refresh;
pub mod register;
pub mod show_my_posts;
pub mod update_post;
pub mod update_profile;

pub use change_password::change_password;
pub use create_post::create_post;
pub use delete_account::delete_account;
pub use delete_post::delete_post;
pub use download_file::download_file;
pub use find_posts::find_posts;
pub use login::login;
pub use refresh::refresh;
pub use register::register;
pub use show_my_posts::show_my_posts;
pub use update_post::update_post;
pub use update_profile::update_profile;

use serde::Serialize;

/// Plain confirmation body used by the delete/change-password endpoints.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
