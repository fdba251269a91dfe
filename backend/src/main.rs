//! Registry entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use linkbio::inbound::http::health::HealthState;
use linkbio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig;
use server::{ServerConfig, ServerSettings, create_server};

async fn connect_database(settings: &ServerSettings, url: &str) -> color_eyre::Result<DbPool> {
    let applied = run_pending_migrations(url.to_owned())
        .await
        .wrap_err("apply database migrations")?;
    info!(applied, "database migrations complete");
    DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .map_err(|err| eyre!(err.into_message()))
        .wrap_err("build database pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("load server settings")?;
    let identity_header = settings
        .identity_header()
        .map_err(|raw| eyre!("invalid identity header name: {raw}"))?;
    let mut config = ServerConfig::new(settings.bind_addr(), identity_header);
    if let Some(url) = settings.database_url() {
        let pool = connect_database(&settings, url).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %settings.bind_addr(), "starting registry server");
    create_server(health_state, config)?
        .await
        .wrap_err("serve HTTP")
}
