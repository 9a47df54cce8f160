pub mod queries;

use std::str::FromStr;

use secrecy::ExposeSecret;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

use crate::config::DatabaseSettings;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn establish_connection(settings: &DatabaseSettings) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(settings.url.expose_secret())?
        .create_if_missing(settings.create_if_missing);
    SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Fresh in-memory database with migrations applied.
///
/// Pinned to a single connection that never expires, since every in-memory
/// connection would otherwise see its own empty database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_seed_standard_categories() {
        let pool = test_pool().await;
        let categories = queries::categories::get_all_categories(&pool).await.unwrap();
        let labels: Vec<&str> = categories.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(
            labels,
            ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        );
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();
        assert_eq!(
            queries::categories::get_all_categories(&pool).await.unwrap().len(),
            6
        );
    }
}
