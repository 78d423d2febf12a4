//! tapright-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, seeds the bundled catalog, and serves the JSON
//! API under `/api`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tapright_core::{
  catalog::{default_cards, default_pois},
  engine::Engine,
  store::RewardStore as _,
};
use tapright_server::{ServerConfig, expand_tilde};
use tapright_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "TapRight recommendation server")]
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
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.seed_catalog {
    let report = store
      .seed_catalog(&default_pois(), &default_cards())
      .await
      .context("failed to seed catalog")?;
    tracing::info!(
      pois = report.pois_inserted,
      cards = report.cards_inserted,
      "catalog seeded"
    );
  }

  let engine_cfg = server_cfg
    .engine_config()
    .context("invalid engine configuration")?;
  let engine = Arc::new(Engine::new(Arc::new(store), engine_cfg));

  let app = tapright_server::app(engine, &server_cfg);

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
