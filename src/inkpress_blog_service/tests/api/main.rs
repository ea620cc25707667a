mod helpers;
mod posts;
mod users;
