use anyhow::Context;
use persistence::db::{Database, DatabaseConfig};
use std::env;

const DEFAULT_MIGRATIONS_PATH: &str = "infrastructure/persistence/migrations";

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub connection: DatabaseConfig,
    pub migrations_path: String,
}

impl DatabaseSettings {
    /// Load database settings from environment variables
    ///
    /// Environment variables:
    /// - DATABASE_URL: PostgreSQL connection string (required)
    /// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
    /// - DATABASE_MIGRATIONS_PATH: Migrations directory
    ///   (default: "infrastructure/persistence/migrations")
    pub fn from_env() -> anyhow::Result<Self> {
        let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        Self::from_vars(
            db_url,
            env::var("DATABASE_MAX_CONNECTIONS").ok(),
            env::var("DATABASE_MIGRATIONS_PATH").ok(),
        )
    }

    fn from_vars(
        db_url: String,
        max_connections: Option<String>,
        migrations_path: Option<String>,
    ) -> anyhow::Result<Self> {
        let max_connections = match max_connections {
            Some(value) => value
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DatabaseConfig::DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            connection: DatabaseConfig::new(db_url).with_max_connections(max_connections),
            migrations_path: migrations_path.unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string()),
        })
    }
}

/// Connect to the product store and apply pending migrations
///
/// # Errors
/// Returns error if the connection fails or a migration fails
pub async fn init_database(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let database = Database::connect(&settings.connection).await?;
    database.run_migrations(&settings.migrations_path).await?;
    Ok(database)
}
