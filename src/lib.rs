use std::sync::Arc;

use chrono::Duration;
use sqlx::SqlitePool;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, slug, use_cases};
pub use interfaces::{handlers, middlewares, repositories, routes};
pub use infrastructure::{auth, db};

use auth::session::SessionStore;
use repositories::sqlx_repo::{SqlxAdminRepo, SqlxImageRepo, SqlxPostRepo};
use use_cases::{auth::SessionAuthority, images::ImageIngestor, posts::PostLifecycle};

pub type AppPostLifecycle = PostLifecycle<SqlxPostRepo, SqlxImageRepo>;
pub type AppImageIngestor = ImageIngestor<SqlxImageRepo>;
pub type AppSessionAuthority = SessionAuthority<SqlxAdminRepo>;

pub struct AppState {
    pub posts: AppPostLifecycle,
    pub images: AppImageIngestor,
    pub auth: AppSessionAuthority,
    pub sessions: Arc<SessionStore>,
    pub max_upload_bytes: usize,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: SqlitePool) -> Self {
        let sessions = Arc::new(SessionStore::new(
            Duration::minutes(config.session_idle_minutes),
            Duration::hours(config.session_absolute_hours),
        ));

        let posts = PostLifecycle::new(
            SqlxPostRepo::new(pool.clone()),
            SqlxImageRepo::new(pool.clone()),
        );
        let images = ImageIngestor::new(SqlxImageRepo::new(pool.clone()), &config.uploads_dir);
        let auth = SessionAuthority::new(SqlxAdminRepo::new(pool), Arc::clone(&sessions));

        AppState {
            posts,
            images,
            auth,
            sessions,
            max_upload_bytes: config.max_upload_bytes,
            cookie_secure: config.is_production(),
        }
    }
}
