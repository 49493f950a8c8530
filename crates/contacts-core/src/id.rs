//! [`ContactId`] — the 12-byte identifier assigned to every stored contact.
//!
//! Identifiers use the document-database object id layout:
//!
//! | Bytes  | Content                                  |
//! |--------|------------------------------------------|
//! | 0..4   | Unix seconds at creation, big-endian     |
//! | 4..9   | Random value fixed for the process       |
//! | 9..12  | Counter, big-endian, seeded randomly     |
//!
//! On the wire an id is always a 24-character hex string.

use std::{
  fmt,
  str::FromStr,
  sync::{
    OnceLock,
    atomic::{AtomicU32, Ordering},
  },
};

use chrono::Utc;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

/// Length of the hex rendering of a [`ContactId`].
pub const HEX_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Opaque, globally unique contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId([u8; 12]);

impl ContactId {
  /// Generate a fresh identifier from the clock, the process-unique value and
  /// the next counter value.
  pub fn generate() -> Self {
    let secs = Utc::now().timestamp() as u32;
    Self::from_parts(secs, *process_unique(), next_count())
  }

  fn from_parts(secs: u32, process: [u8; 5], count: u32) -> Self {
    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(&process);
    bytes[9..12].copy_from_slice(&(count & COUNTER_MASK).to_be_bytes()[1..]);
    Self(bytes)
  }

  pub fn bytes(&self) -> [u8; 12] { self.0 }

  /// Seconds since the Unix epoch embedded in the first four bytes.
  pub fn timestamp(&self) -> u32 {
    u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
  }

  /// Lowercase 24-character hex rendering.
  pub fn to_hex(&self) -> String { hex::encode(self.0) }

  /// `true` if `s` is exactly 24 hex characters (either case).
  pub fn is_valid(s: &str) -> bool { s.parse::<Self>().is_ok() }
}

fn process_unique() -> &'static [u8; 5] {
  PROCESS_UNIQUE.get_or_init(|| {
    let mut buf = [0u8; 5];
    OsRng.fill_bytes(&mut buf);
    buf
  })
}

fn next_count() -> u32 {
  COUNTER
    .get_or_init(|| AtomicU32::new(OsRng.next_u32() & COUNTER_MASK))
    .fetch_add(1, Ordering::Relaxed)
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if s.len() != HEX_LEN {
      return Err(Error::InvalidId(s.to_owned()));
    }
    let mut bytes = [0u8; 12];
    hex::decode_to_slice(s, &mut bytes)
      .map_err(|_| Error::InvalidId(s.to_owned()))?;
    Ok(Self(bytes))
  }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl Serialize for ContactId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for ContactId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_lower_and_upper_hex() {
    let lower: ContactId = "507f1f77bcf86cd799439011".parse().unwrap();
    let upper: ContactId = "507F1F77BCF86CD799439011".parse().unwrap();
    assert_eq!(lower, upper);
    assert_eq!(upper.to_string(), "507f1f77bcf86cd799439011");
  }

  #[test]
  fn rejects_malformed_ids() {
    for bad in [
      "",
      "not-an-id",
      "507f1f77bcf86cd79943901",
      "507f1f77bcf86cd7994390111",
      "507f1f77bcf86cd79943901g",
      "507f1f77-cf86cd799439011",
    ] {
      assert!(!ContactId::is_valid(bad), "{bad:?} should be rejected");
    }
  }

  #[test]
  fn generated_ids_are_distinct_and_well_formed() {
    let a = ContactId::generate();
    let b = ContactId::generate();
    assert_ne!(a, b);
    assert_eq!(a.to_hex().len(), HEX_LEN);
    assert!(ContactId::is_valid(&a.to_hex()));
    // Same process, so the random segment matches.
    assert_eq!(a.bytes()[4..9], b.bytes()[4..9]);
  }

  #[test]
  fn layout_places_timestamp_and_counter() {
    let id = ContactId::from_parts(0x5F5E_1000, [1, 2, 3, 4, 5], 0x0A0B_0C0D);
    assert_eq!(id.timestamp(), 0x5F5E_1000);
    assert_eq!(id.to_hex(), "5f5e100001020304050b0c0d");
  }

  #[test]
  fn serde_uses_hex_string() {
    let id: ContactId = "507f1f77bcf86cd799439011".parse().unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"507f1f77bcf86cd799439011\"");
    let back: ContactId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
    assert!(serde_json::from_str::<ContactId>("\"nope\"").is_err());
  }
}
