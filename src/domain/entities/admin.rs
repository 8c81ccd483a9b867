use serde::{Deserialize, Serialize};

/// Provisioned out-of-band by the `create-admin` tool; read-only at runtime.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
