//! snack-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! document store, and serves the JSON API under `/api`.

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use clap::Parser;
use snack_api::{ApiState, api_router};
use snack_core::store::{ReviewStore, SpotStore};
use snack_store_sqlite::SqliteDocumentStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Snacktacular spot and review server")]
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
  let server_cfg = ServerConfig::load(&cli.config)?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(dir) = store_path.parent()
    && !dir.as_os_str().is_empty()
  {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }

  let store = SqliteDocumentStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  let state = ApiState {
    spots:   SpotStore::new(store.clone())
      .with_timeout(server_cfg.timeout())
      .with_coordinate_decode(server_cfg.coordinate_decode()),
    reviews: ReviewStore::new(store).with_timeout(server_cfg.timeout()),
  };

  let app = Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!(store = %store_path.display(), "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
