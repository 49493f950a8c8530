//! contacts-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the contacts API over HTTP.
//!
//! # Regenerating the API docs
//!
//! ```
//! cargo run -p contacts-server -- docs --output openapi.json
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use contacts_server::{ServerConfig, app, write_docs};
use contacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Contacts API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the API (the default).
  Serve,
  /// Write the OpenAPI document and exit.
  Docs {
    #[arg(short, long, default_value = "openapi.json")]
    output: PathBuf,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Docs { output } => {
      write_docs(&server_cfg.docs_host, &output)?;
      tracing::info!("wrote API docs to {}", output.display());
      Ok(())
    }
    Command::Serve => serve(server_cfg).await,
  }
}

async fn serve(server_cfg: ServerConfig) -> anyhow::Result<()> {
  let store_path = server_cfg.resolved_store_path();

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = app(Arc::new(store), &server_cfg)?;
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
