//! Server entry-point: selects the security evaluator and serves the
//! security meta endpoints.
//!
//! Response decoration needs an application's own projections, collections
//! and handlers, so [`hypermedia::domain::ResponsePipeline`] is wired by the
//! embedding service rather than here.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hypermedia::settings::ServerSettings;
use server::{ServerConfig, build_security, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let security = build_security(&settings)?;

    info!(%bind_addr, "starting server");
    create_server(ServerConfig::new(bind_addr, security))?.await
}
