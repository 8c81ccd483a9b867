pub mod admin;
pub mod image;
pub mod post;
pub mod sqlx_repo;
