use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{path::Path, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError(#[source] sqlx::Error),
    #[error("database.migration_error")]
    MigrationError(#[source] sqlx::migrate::MigrateError),
    #[error("database.migrations_not_found: {0}")]
    MigrationsNotFound(String),
}

/// Configuration for the database connection
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Creates a new database configuration with default values
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Process-wide handle to the product store.
///
/// Connected once at startup and handed to the repositories; the catalog never
/// opens or closes connections itself.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Opens the PostgreSQL connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.connection_string)
            .await
            .map_err(DatabaseError::ConnectionError)?;

        tracing::info!("Database online");
        Ok(Self { pool })
    }

    /// Runs database migrations from the specified directory
    pub async fn run_migrations(&self, migrations_path: &str) -> Result<(), DatabaseError> {
        let path = Path::new(migrations_path);

        if !path.exists() {
            return Err(DatabaseError::MigrationsNotFound(migrations_path.to_string()));
        }

        sqlx::migrate::Migrator::new(path)
            .await
            .map_err(DatabaseError::MigrationError)?
            .run(&self.pool)
            .await
            .map_err(DatabaseError::MigrationError)?;

        tracing::info!(path = migrations_path, "Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Waits for in-flight queries and closes every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}
