//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version; there is a single version today.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` is never reused, so ordering by it is insertion order.
CREATE TABLE IF NOT EXISTS contacts (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    id             TEXT NOT NULL UNIQUE,   -- 24 lowercase hex chars
    first_name     TEXT NOT NULL,
    last_name      TEXT NOT NULL,
    email          TEXT NOT NULL,
    favorite_color TEXT NOT NULL,
    birthday       TEXT NOT NULL           -- YYYY-MM-DD
);

PRAGMA user_version = 1;
";

/// Column list shared by every query that reads whole contacts.
pub const COLUMNS: &str =
  "id, first_name, last_name, email, favorite_color, birthday";
