//! MySQL pool for the user directory

use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::ConnectOptions;
use tracing::log::LevelFilter;

use sg_shared::DatabaseConfig;

use crate::cache::redis_client::mask_url;
use crate::InfrastructureError;

/// Shared handle to the directory's connection pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Open the pool described by `config`
    ///
    /// Statements are logged at debug; anything slower than
    /// `config.slow_query_threshold` milliseconds is logged at warn.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            url = %mask_url(&config.url),
            max_connections = config.max_connections,
            "Opening user directory pool"
        );

        let options = Self::connect_options(config)?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "User directory pool failed to open"))?;

        Ok(Self { pool })
    }

    fn connect_options(config: &DatabaseConfig) -> Result<MySqlConnectOptions, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        Ok(options
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(config.slow_query_threshold)))
    }

    /// Wrap an already opened pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Bring the `users` schema up to date
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("User directory schema is up to date");
        Ok(())
    }

    /// `SELECT 1` round trip
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(one == 1)
    }
}
