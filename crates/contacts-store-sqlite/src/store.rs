//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use contacts_core::{
  Contact, ContactFields, ContactId, store::ContactStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{RawContact, encode_id},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts collection backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn find_all(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {COLUMNS} FROM contacts ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM contacts WHERE id = ?1"),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn insert(&self, fields: ContactFields) -> Result<ContactId> {
    let id = ContactId::generate();
    let id_str = encode_id(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             id, first_name, last_name, email, favorite_color, birthday
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            fields.first_name,
            fields.last_name,
            fields.email,
            fields.favorite_color,
            fields.birthday,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn find_by_id_and_replace(
    &self,
    id:     ContactId,
    fields: ContactFields,
  ) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    // RETURNING keeps the existence check and the write in one statement.
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE contacts
                 SET first_name = ?2, last_name = ?3, email = ?4,
                     favorite_color = ?5, birthday = ?6
               WHERE id = ?1
               RETURNING {COLUMNS}"
            ),
            rusqlite::params![
              id_str,
              fields.first_name,
              fields.last_name,
              fields.email,
              fields.favorite_color,
              fields.birthday,
            ],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find_by_id_and_delete(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("DELETE FROM contacts WHERE id = ?1 RETURNING {COLUMNS}"),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
