use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{entities::admin::AdminAccount, errors::AppError, repositories::sqlx_repo::SqlxAdminRepo};

#[async_trait]
pub trait AdminRepository: Sync + Send {
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AppError>;
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<i64, AppError>;
}

impl SqlxAdminRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxAdminRepo { pool }
    }
}

#[async_trait]
impl AdminRepository for SqlxAdminRepo {
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<AdminAccount>, AppError> {
        let admin = sqlx::query_as::<_, AdminAccount>(
            "SELECT id, username, password_hash FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Write path for the `create-admin` provisioning tool only; the runtime
    /// service never inserts admins.
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<i64, AppError> {
        let result = sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict(_) => AppError::Conflict("Username already exists".into()),
                other => other,
            })?;

        Ok(result.last_insert_rowid())
    }
}
