use std::sync::Arc;

use crate::{
    entities::admin::Credentials,
    errors::AppError,
    infrastructure::auth::password::verify_password,
    infrastructure::auth::session::SessionStore,
    repositories::admin::AdminRepository,
};

/// Gates every mutating operation: issues session tokens on a successful
/// credential check and resolves tokens back to an admin id.
pub struct SessionAuthority<R>
where
    R: AdminRepository,
{
    pub admin_repo: R,
    pub sessions: Arc<SessionStore>,
}

impl<R> SessionAuthority<R>
where
    R: AdminRepository,
{
    pub fn new(admin_repo: R, sessions: Arc<SessionStore>) -> Self {
        SessionAuthority { admin_repo, sessions }
    }

    /// An unknown username and a failed hash verify return the identical
    /// error, so a caller cannot enumerate usernames. The supplied password
    /// is never logged.
    pub async fn login(&self, credentials: Credentials) -> Result<String, AppError> {
        let admin = self
            .admin_repo
            .get_admin_by_username(&credentials.username)
            .await
            .map_err(|_| AppError::InvalidCredentials)?
            .ok_or(AppError::InvalidCredentials)?;

        let is_valid = verify_password(&credentials.password, &admin.password_hash)
            .map_err(|_| AppError::InvalidCredentials)?;
        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(username = %credentials.username, "admin logged in");
        Ok(self.sessions.create(admin.id))
    }

    pub fn logout(&self, token: &str) {
        self.sessions.destroy(token);
    }

    /// Resolves a session token to its admin id, rejecting missing, unknown
    /// and expired tokens alike.
    pub fn authorize(&self, token: &str) -> Result<i64, AppError> {
        self.sessions.validate(token).ok_or(AppError::Unauthorized)
    }
}
