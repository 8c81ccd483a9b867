use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxPostRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxImageRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxAdminRepo {
    pub pool: SqlitePool,
}
