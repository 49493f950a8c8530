//! Error type for `contacts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A row holds a value that does not decode into a domain type.
  #[error("corrupt row: {0}")]
  Decode(#[from] contacts_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
