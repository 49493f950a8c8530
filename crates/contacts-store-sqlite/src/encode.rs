//! Conversion between domain types and the plain-text SQLite columns.
//!
//! Ids are stored as lowercase hex, so lookups with an uppercase id from a
//! request still hit the same row.

use contacts_core::{Contact, ContactFields, ContactId};

use crate::Result;

pub fn encode_id(id: ContactId) -> String { id.to_hex() }

/// A contact row exactly as read from SQLite.
pub struct RawContact {
  pub id:             String,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub favorite_color: String,
  pub birthday:       String,
}

impl RawContact {
  /// Read a row selected with [`COLUMNS`](crate::schema::COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      first_name:     row.get(1)?,
      last_name:      row.get(2)?,
      email:          row.get(3)?,
      favorite_color: row.get(4)?,
      birthday:       row.get(5)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:     self.id.parse()?,
      fields: ContactFields {
        first_name:     self.first_name,
        last_name:      self.last_name,
        email:          self.email,
        favorite_color: self.favorite_color,
        birthday:       self.birthday,
      },
    })
  }
}
