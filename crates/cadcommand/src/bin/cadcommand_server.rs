//! Runs the CAD command HTTP server.
//!
//! Configuration is read from the file named by `CADCOMMAND_CONFIG`, or
//! `config.json` in the working directory. Log filtering follows `RUST_LOG`.

use std::path::PathBuf;

use cadcommand::backend::default_backend;
use cadcommand::config::{load_config, CONFIG_ENV_VAR};
use cadcommand::server::Server;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let config = load_config(config_path.as_deref());
    tracing::info!(
        "starting {} v{} for {:?}",
        config.server.name,
        config.server.version,
        config.cad.kind
    );

    let backend = default_backend(&config.cad);
    let mut server = Server::start(config, backend).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown()?;
    Ok(())
}
