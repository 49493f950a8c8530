//! JSON REST API for the contacts service.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`], plus the
//! OpenAPI document describing it (see [`openapi`]). TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = contacts_api::api_router(store.clone(), ApiConfig::default())
//!   .merge(contacts_api::openapi::docs_router(&doc)?);
//! ```

pub mod contacts;
pub mod error;
pub mod openapi;

use std::sync::Arc;

use axum::{Router, routing::get};
use contacts_core::store::ContactStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Behaviour switches for the API layer.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Attach the underlying store error to 500 responses.
  #[serde(default = "default_expose_internal_errors")]
  pub expose_internal_errors: bool,
}

fn default_expose_internal_errors() -> bool { true }

impl Default for ApiConfig {
  fn default() -> Self {
    Self { expose_internal_errors: default_expose_internal_errors() }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ApiConfig>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), config: Arc::clone(&self.config) }
  }
}

impl<S: ContactStore> ApiState<S> {
  /// Log a store failure and turn it into a 500, redacting the cause if
  /// configured to.
  pub(crate) fn store_error(&self, message: &'static str, err: S::Error) -> ApiError {
    tracing::error!(error = %err, "{message}");
    ApiError::Store {
      message,
      cause: self.config.expose_internal_errors.then(|| err.to_string()),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the `/contacts` router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, config: ApiConfig) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .with_state(ApiState { store, config: Arc::new(config) })
}
