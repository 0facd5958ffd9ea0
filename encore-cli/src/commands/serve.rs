//! Serve command for running the encore API server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use encore_core::{FileKvStore, SpotifyProvider};
use encore_server::{AppState, EncoreServer, ServerConfig};

use super::load_engine_config;

/// Default port for the encore server
pub const DEFAULT_PORT: u16 = 7602;
/// Default host for the encore server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Path to the JSON store file
    #[arg(long, default_value = "encore-store.json")]
    pub store: PathBuf,

    /// Path to the engine config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let engine_config = load_engine_config(args.config.as_deref())?;
    if engine_config.tracked_media.is_empty() {
        tracing::warn!("no tracked media configured; no plays will qualify");
    }

    let kv = Arc::new(FileKvStore::load(&args.store).await?);
    let provider = Arc::new(SpotifyProvider::new());
    let state = Arc::new(AppState::new(kv, provider, engine_config));

    let config = ServerConfig::new(args.host.clone(), args.port);
    info!("Starting encore server on {}:{}", config.host, config.port);

    let server = EncoreServer::new(config, state);
    server.run().await.map_err(Into::into)
}
