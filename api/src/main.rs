use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sg_api::{create_app, AppState};
use sg_core::services::{auth::AuthService, token::CredentialConfig};
use sg_infra::{DatabasePool, MySqlUserDirectory, RedisClient, RedisSessionStore};
use sg_shared::{AppConfig, Environment, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    dotenvy::from_filename("app.env").ok();
    // Per-environment overrides, e.g. `.env.production`
    dotenvy::from_filename(Environment::from_env().env_file()).ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    tracing::info!(environment = %config.environment, "Starting SessionGate API Server");

    if config.auth.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            bail!("ACCESS_SECRET and REFRESH_SECRET must be set in production");
        }
        tracing::warn!("Using built-in development signing secrets");
    }

    let credentials = CredentialConfig::from_settings(&config.auth.jwt, &config.cache, &config.database)
        .context("invalid credential configuration")?;

    let redis = RedisClient::new(&config.cache)
        .await
        .context("failed to connect to the session store")?;
    let mut store = RedisSessionStore::new(redis.clone());
    if let Some(prefix) = &config.cache.key_prefix {
        store = store.with_key_prefix(prefix.clone());
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the user directory")?;
    database.run_migrations().await.context("failed to apply migrations")?;
    let directory = MySqlUserDirectory::new(database.get_pool().clone());

    let auth_service = AuthService::new(credentials, Arc::new(directory), Arc::new(store))
        .context("failed to build the auth service")?;

    let state = web::Data::new(
        AppState::new(Arc::new(auth_service))
            .with_probe(Arc::new(redis))
            .with_probe(Arc::new(database)),
    );

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let max_payload = config.server.max_payload_size;
    let mut server = HttpServer::new(move || {
        create_app(state.clone(), &cors).app_data(web::JsonConfig::default().limit(max_payload))
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over `LOG_LEVEL`
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
    }
    .context("failed to initialize tracing subscriber")
}
