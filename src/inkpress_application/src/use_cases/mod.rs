pub mod authorize;
pub mod change_password;
pub mod create_post;
pub mod delete_account;
pub mod delete_post;
pub mod find_posts;
pub mod login;
pub mod register;
pub mod show_my_posts;
pub mod update_post;
pub mod update_profile;
