//! Migo API entry point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use migo_api::inbound::http::health::HealthState;
use migo_api::middleware::BasicAuth;
use migo_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use migo_api::settings::AppSettings;
use server::{ServerConfig, create_server};

async fn apply_migrations(database_url: &str) -> Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database schema up to date");
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let auth = BasicAuth::from_parts(
        settings.auth_username.clone(),
        settings.auth_password.clone(),
    );

    let mut config = ServerConfig::new(bind_addr).with_auth(auth);
    if let Some(url) = settings.database_url() {
        if settings.run_migrations {
            apply_migrations(url).await?;
        }
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    } else if settings.run_migrations {
        warn!("run_migrations ignored: no database URL configured");
    }

    info!(bind_addr = %config.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await?;
    Ok(())
}
