//! pantry server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `PANTRY_*`
//! environment variables, opens the SQLite store (creating the table if
//! needed), and serves the JSON API and the front-end over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use pantry_server::ServerConfig;
use pantry_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Pantry grocery inventory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .context("failed to load configuration")?;
  let store_cfg = server_cfg.store_config();

  // Schema creation happens here; without a table there is nothing to serve.
  let store = SqliteStore::open(&store_cfg)
    .await
    .with_context(|| format!("failed to open store at {:?}", store_cfg.path))?;
  tracing::info!(path = %store_cfg.path.display(), "database initialized and table is ready");

  if !server_cfg.static_dir.is_dir() {
    tracing::warn!(
      dir = %server_cfg.static_dir.display(),
      "static directory does not exist; only the API will be served"
    );
  }

  let app = pantry_server::router(Arc::new(store), &server_cfg.static_dir);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
