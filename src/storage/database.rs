use std::str::FromStr;

use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{AnyPool, ConnectOptions};
use tracing::info;

use crate::config::{DatabaseKind, DatabaseSettings};
use crate::error::Result;

/// Shared handle to the relational database.
///
/// Cloning is cheap; every clone refers to the same connection pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: AnyPool,
    kind: DatabaseKind,
}

impl Database {
    /// Open the pool and, when `synchronize` is set, create the `user` table.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let kind = settings.resolved_kind()?;
        let url = settings.connection_url();

        let mut options = AnyConnectOptions::from_str(&url)?;
        if !settings.logging {
            options = options.disable_statement_logging();
        }

        // Every connection to `sqlite::memory:` is a separate database, so
        // keep exactly one alive for the lifetime of the pool.
        let pool_options = if settings.is_in_memory() {
            AnyPoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            AnyPoolOptions::new().max_connections(settings.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(?kind, "Connected to database");

        let db = Self { pool, kind };
        if settings.synchronize {
            db.synchronize().await?;
        }
        Ok(db)
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    #[cfg(test)]
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Create the `user` table if it does not exist yet.
    ///
    /// Table and column names match the layout earlier deployments created,
    /// so existing databases keep working.
    pub async fn synchronize(&self) -> Result<()> {
        let ddl = match self.kind {
            DatabaseKind::Postgres => {
                r#"
                CREATE TABLE IF NOT EXISTS "user" (
                    id SERIAL PRIMARY KEY,
                    "firstName" VARCHAR NOT NULL,
                    "lastName" VARCHAR NOT NULL,
                    age INTEGER NOT NULL,
                    email VARCHAR NOT NULL
                );
                "#
            }
            DatabaseKind::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS "user" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    "firstName" VARCHAR NOT NULL,
                    "lastName" VARCHAR NOT NULL,
                    age INTEGER NOT NULL,
                    email VARCHAR NOT NULL
                );
                "#
            }
        };

        sqlx::query(ddl).execute(&self.pool).await?;
        info!("Database schema synchronized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory_synchronizes() {
        let db = Database::connect(&DatabaseSettings::in_memory())
            .await
            .unwrap();
        assert_eq!(db.kind(), DatabaseKind::Sqlite);

        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_synchronize_is_idempotent() {
        let db = Database::connect(&DatabaseSettings::in_memory())
            .await
            .unwrap();
        db.synchronize().await.unwrap();
        db.synchronize().await.unwrap();
    }

    #[tokio::test]
    async fn test_without_synchronize_table_is_missing() {
        let settings = DatabaseSettings {
            synchronize: false,
            ..DatabaseSettings::in_memory()
        };
        let db = Database::connect(&settings).await.unwrap();

        let result = sqlx::query(r#"SELECT id FROM "user""#)
            .fetch_all(db.pool())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unsupported_url_fails() {
        let settings = DatabaseSettings {
            url: Some("mysql://localhost/users".to_string()),
            ..DatabaseSettings::default()
        };
        assert!(Database::connect(&settings).await.is_err());
    }
}
