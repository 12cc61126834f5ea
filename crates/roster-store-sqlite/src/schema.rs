//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. There is no migration framework;
//! `PRAGMA user_version` records the layout in case one is ever needed.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT so an id is never handed out twice, even after deletes.
CREATE TABLE IF NOT EXISTS contacts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    phone       TEXT    NOT NULL DEFAULT '',
    email       TEXT,
    favorite    INTEGER NOT NULL DEFAULT 0,   -- 0 | 1
    created_at  INTEGER NOT NULL              -- epoch millis, store-assigned
);

-- Not UNIQUE: manual adds may repeat a phone; only import de-duplicates.
CREATE INDEX IF NOT EXISTS contacts_phone_idx ON contacts(phone);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` that decodes into a contact row.
pub const COLUMNS: &str = "id, name, phone, email, favorite, created_at";
