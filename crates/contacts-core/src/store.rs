//! The `ContactStore` trait — the persistence collection behind the API.
//!
//! Implemented by storage backends (e.g. `contacts-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{Contact, ContactFields, ContactId};

/// Abstraction over a contacts collection.
///
/// Every method is a single storage operation; callers never combine two of
/// them to serve one request. Methods return `Send` futures so the trait can
/// be used from multi-threaded runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored contact, in insertion order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact and return the id the store assigned to it.
  fn insert(
    &self,
    fields: ContactFields,
  ) -> impl Future<Output = Result<ContactId, Self::Error>> + Send + '_;

  /// Overwrite all fields of an existing contact.
  ///
  /// Returns the updated record, or `None` if `id` does not exist.
  fn find_by_id_and_replace(
    &self,
    id: ContactId,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove a contact. Returns the removed record, or `None` if `id` does
  /// not exist.
  fn find_by_id_and_delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}
