//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Success | Notes |
//! |----------|------------------|---------|-------|
//! | `GET`    | `/contacts`      | 200     | All contacts, insertion order |
//! | `GET`    | `/contacts/:id`  | 200     | 400 on malformed id, 404 if absent |
//! | `POST`   | `/contacts`      | 201     | Body: [`ContactBody`]; returns `{"id": ...}` |
//! | `PUT`    | `/contacts/:id`  | 204     | Body: [`ContactBody`]; replaces all fields |
//! | `DELETE` | `/contacts/:id`  | 204     | 404 if absent |
//!
//! Each handler validates first and then makes exactly one store call.

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State, rejection::PathRejection},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use contacts_core::{
  Contact, ContactBody, ContactFields, ContactId, store::ContactStore,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
  ApiState,
  error::{ApiError, INVALID_BODY, INVALID_ID, NOT_FOUND},
};

// ─── Shared validation ────────────────────────────────────────────────────────

/// A path segment that does not decode to UTF-8 is as malformed as one that
/// is not hex.
fn parse_id(
  raw: Result<Path<String>, PathRejection>,
) -> Result<ContactId, ApiError> {
  let Path(raw) = raw.map_err(|_| ApiError::bad_request(INVALID_ID))?;
  Ok(raw.parse()?)
}

fn is_json(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(';').next())
    .map(str::trim)
    .is_some_and(|mime| {
      mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
    })
}

/// An empty body, or one not declared as JSON, is read as `{}` and so fails
/// the missing-field check. Only a non-empty JSON body that does not parse
/// is an invalid body.
fn parse_body(
  headers: &HeaderMap,
  body: &Bytes,
) -> Result<ContactFields, ApiError> {
  if !is_json(headers) || body.trim_ascii().is_empty() {
    return Ok(ContactBody::default().validate()?);
  }
  let body: ContactBody =
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest {
      message: INVALID_BODY,
      detail:  Some(e.to_string()),
    })?;
  Ok(body.validate()?)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = state
    .store
    .find_all()
    .await
    .map_err(|e| state.store_error("Error fetching contacts", e))?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(id)?;
  let contact = state
    .store
    .find_by_id(id)
    .await
    .map_err(|e| state.store_error("Error searching for contact", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Response body of `POST /contacts`. The stored fields are not echoed.
#[derive(Debug, Serialize, ToSchema)]
pub struct Created {
  #[schema(value_type = String, example = "507f1f77bcf86cd799439011")]
  pub id: ContactId,
}

/// `POST /contacts` — returns 201 + `{"id": "<new id>"}`.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let fields = parse_body(&headers, &body)?;
  let id = state
    .store
    .insert(fields)
    .await
    .map_err(|e| state.store_error("Error creating contact", e))?;
  tracing::debug!(%id, "contact created");
  Ok((StatusCode::CREATED, Json(Created { id })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id` — the id is checked before the body.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<String>, PathRejection>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(id)?;
  let fields = parse_body(&headers, &body)?;
  state
    .store
    .find_by_id_and_replace(id, fields)
    .await
    .map_err(|e| state.store_error("Error updating contact", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::debug!(%id, "contact updated");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(id)?;
  state
    .store
    .find_by_id_and_delete(id)
    .await
    .map_err(|e| state.store_error("Error deleting contact", e))?
    .ok_or(ApiError::NotFound(NOT_FOUND))?;
  tracing::debug!(%id, "contact deleted");
  Ok(StatusCode::NO_CONTENT)
}
