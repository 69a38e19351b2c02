//! Registration form entry-point: reads configuration, wires PostgreSQL
//! persistence into the HTTP adapter, and serves until shutdown.

mod server;

use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use signup::outbound::persistence::DbConfig;

use server::{ServerConfig, build_registration_command, create_server};

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

    let env = DefaultEnv::new();
    let db = DbConfig::from_env(&env);
    let config = ServerConfig::from_env(&env)?;

    let server = create_server(config, build_registration_command(db))?;
    server.await?;
    Ok(())
}
