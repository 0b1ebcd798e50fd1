//! SQL schema for the norris SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The length checks mirror `MAX_EXTERNAL_ID_LEN` and `MAX_URL_LEN` in
/// `norris_core::fact`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS facts (
    fact_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL CHECK (length(external_id) <= 40),
    url         TEXT NOT NULL CHECK (length(url) <= 1024),
    text        TEXT NOT NULL,
    recorded_at TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

PRAGMA user_version = 1;
";
