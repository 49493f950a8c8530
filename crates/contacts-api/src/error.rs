//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure renders as `{"message": ..., "error"?: ...}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const INVALID_ID: &str = "Invalid ID";
pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_BIRTHDAY: &str = "Invalid birthday";
pub const NOT_FOUND: &str = "Contact not found";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Malformed input, rejected before the store is touched.
  #[error("bad request: {message}")]
  BadRequest {
    message: &'static str,
    detail:  Option<String>,
  },

  /// Well-formed id with no matching record.
  #[error("not found: {0}")]
  NotFound(&'static str),

  /// The store failed. `cause` is `None` when internal errors are redacted.
  #[error("store error: {message}")]
  Store {
    message: &'static str,
    cause:   Option<String>,
  },
}

impl ApiError {
  pub fn bad_request(message: &'static str) -> Self {
    Self::BadRequest { message, detail: None }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<contacts_core::Error> for ApiError {
  fn from(e: contacts_core::Error) -> Self {
    use contacts_core::Error as Core;
    match e {
      Core::InvalidId(_) => Self::bad_request(INVALID_ID),
      Core::MissingFields(_) => Self::bad_request(FIELDS_REQUIRED),
      Core::InvalidBirthday(_) => Self::bad_request(INVALID_BIRTHDAY),
      Core::UnsupportedValue(_) => Self::BadRequest {
        message: INVALID_BODY,
        detail:  Some(e.to_string()),
      },
    }
  }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  #[schema(value_type = String, example = "Contact not found")]
  pub message: &'static str,
  /// Underlying cause, when there is one and it may be shown.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self {
      ApiError::BadRequest { message, detail } => {
        ErrorBody { message, error: detail }
      }
      ApiError::NotFound(message) => ErrorBody { message, error: None },
      ApiError::Store { message, cause } => {
        ErrorBody { message, error: cause }
      }
    };
    (status, Json(body)).into_response()
  }
}
