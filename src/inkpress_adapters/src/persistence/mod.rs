pub mod hashmap_post_store;
pub mod hashmap_user_store;
pub mod password;
pub mod postgres_post_store;
pub mod postgres_user_store;
