use anyhow::Context;

use photowall_backend::{
    auth::password::hash_password,
    db::sqlite::{create_pool, init_schema},
    repositories::{admin::AdminRepository, sqlx_repo::SqlxAdminRepo},
    settings::AppConfig,
};

/// Provisions an admin account out-of-band; the runtime service only ever
/// reads the admins relation.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let (username, password) = match args.as_slice() {
        [_, username, password] => (username.clone(), password.clone()),
        _ => anyhow::bail!("usage: create-admin <username> <password>"),
    };

    let config = AppConfig::new().context("Failed to load configuration")?;

    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to open database")?;
    init_schema(&pool).await.context("Failed to initialize schema")?;

    let hash = hash_password(&password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let repo = SqlxAdminRepo::new(pool);
    let id = repo
        .create_admin(&username, &hash)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    println!("Admin user created: {} (id {})", username, id);
    Ok(())
}
