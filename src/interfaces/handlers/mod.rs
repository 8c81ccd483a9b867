pub mod auth;
pub mod images;
pub mod posts;
