//! Database schema

use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;
use tracing::{debug, info};

/// Initialize the database
pub async fn initialize_database(db_path: &Path) -> Result<Pool<Sqlite>> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {:?}", parent))?;
    }

    let db_url = db_path.to_string_lossy();

    // Create database if it doesn't exist
    if !Sqlite::database_exists(&db_url).await? {
        debug!("Creating database at: {}", db_url);
        Sqlite::create_database(&db_url).await?;
    }

    // Connect to the database
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect(&db_url)
        .await
        .with_context(|| format!("Failed to open database {}", db_url))?;

    info!("Running database migrations");
    create_tables(&pool).await?;

    Ok(pool)
}

/// Create database tables
async fn create_tables(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value BLOB NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    debug!("Database tables created successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("data").join("ShortFeed").join("shortfeed.db");

        let pool = initialize_database(&db_path).await.unwrap();
        assert!(db_path.exists());
        pool.close().await;
    }
}
