//! Error types for `contacts-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid contact id: {0:?}")]
  InvalidId(String),

  #[error("missing required fields: {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("field {0} must be a string, number or boolean")]
  UnsupportedValue(&'static str),

  #[error("invalid birthday: {0:?}")]
  InvalidBirthday(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
