#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;

use photowall_backend::{
    auth::password::hash_password,
    db::sqlite::{create_pool, init_schema},
    entities::post::NewPostRequest,
    repositories::{
        admin::AdminRepository,
        sqlx_repo::{SqlxAdminRepo, SqlxImageRepo, SqlxPostRepo},
    },
    settings::{AppConfig, AppEnvironment},
    use_cases::{images::ImageIngestor, posts::PostLifecycle},
};

/// A throwaway database under a temp dir; dropped with the TestDb.
pub struct TestDb {
    pub pool: SqlitePool,
    pub dir: TempDir,
}

impl TestDb {
    pub async fn spawn() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("test.db").display());

        let pool = create_pool(&url).await.expect("Failed to open test database");
        init_schema(&pool).await.expect("Failed to initialize schema");

        TestDb { pool, dir }
    }

    pub fn lifecycle(&self) -> PostLifecycle<SqlxPostRepo, SqlxImageRepo> {
        PostLifecycle::new(
            SqlxPostRepo::new(self.pool.clone()),
            SqlxImageRepo::new(self.pool.clone()),
        )
    }

    pub fn ingestor(&self) -> ImageIngestor<SqlxImageRepo> {
        ImageIngestor::new(
            SqlxImageRepo::new(self.pool.clone()),
            self.dir.path().join("uploads"),
        )
    }

    /// Registers an image row directly, bypassing ingestion.
    pub async fn register_image(&self, url: &str) -> i64 {
        sqlx::query("INSERT INTO images (url) VALUES (?)")
            .bind(url)
            .execute(&self.pool)
            .await
            .expect("Failed to insert image")
            .last_insert_rowid()
    }

    pub async fn create_admin(&self, username: &str, password: &str) -> i64 {
        let hash = hash_password(password).expect("Failed to hash password");
        SqlxAdminRepo::new(self.pool.clone())
            .create_admin(username, &hash)
            .await
            .expect("Failed to create admin")
    }

    /// Attachment rows for a post, ordered by image id for stable asserts.
    pub async fn attachments(&self, post_id: i64) -> Vec<(i64, i64)> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT image_id, position FROM post_images WHERE post_id = ? ORDER BY image_id",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .expect("Failed to query attachments")
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Photowall-Test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            worker_count: 1,
            database_url: String::new(),
            uploads_dir: self.dir.path().join("uploads").display().to_string(),
            max_upload_bytes: 30 * 1024 * 1024,
            cors_allowed_origins: vec![],
            session_idle_minutes: 30,
            session_absolute_hours: 12,
        }
    }
}

pub fn new_post(title: &str) -> NewPostRequest {
    NewPostRequest {
        title: title.to_string(),
        display_time: None,
    }
}
