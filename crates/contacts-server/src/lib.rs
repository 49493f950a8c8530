//! Process wiring for the contacts server: configuration, router assembly
//! and OpenAPI document output.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use contacts_api::{ApiConfig, api_router, openapi};
use contacts_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CONTACTS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                   String,
  #[serde(default = "default_port")]
  pub port:                   u16,
  #[serde(default = "default_store_path")]
  pub store_path:             PathBuf,
  /// Attach store errors to 500 responses.
  #[serde(default = "default_expose_internal_errors")]
  pub expose_internal_errors: bool,
  /// Host advertised in the OpenAPI document's `servers` list.
  #[serde(default = "default_docs_host")]
  pub docs_host:              String,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("contacts.db") }
fn default_expose_internal_errors() -> bool { ApiConfig::default().expose_internal_errors }
fn default_docs_host() -> String { openapi::DEFAULT_HOST.to_owned() }

impl ServerConfig {
  /// Load from `path` (optional) layered under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CONTACTS"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig { expose_internal_errors: self.expose_internal_errors }
  }

  /// `store_path` with a leading `~` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: `/contacts`, `/api-docs`, and request tracing.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> anyhow::Result<Router>
where
  S: ContactStore + 'static,
{
  let doc = openapi::generate(&config.docs_host);
  let docs = openapi::docs_router(&doc).context("failed to render API docs")?;

  Ok(
    api_router(store, config.api_config())
      .merge(docs)
      .layer(TraceLayer::new_for_http()),
  )
}

/// Write the OpenAPI document for `host` to `output`.
pub fn write_docs(host: &str, output: &Path) -> anyhow::Result<()> {
  let rendered = openapi::generate(host)
    .to_pretty_json()
    .context("failed to render API docs")?;
  std::fs::write(output, rendered)
    .with_context(|| format!("failed to write {}", output.display()))?;
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
