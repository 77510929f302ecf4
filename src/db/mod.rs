use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod care_repo;
pub mod event_repo;
pub mod friendship_repo;
pub mod message_repo;
pub mod moderation_repo;
pub mod report_repo;
pub mod user_repo;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
