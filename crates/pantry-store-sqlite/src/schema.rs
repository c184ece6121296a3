//! SQL schema for the Pantry SQLite store.
//!
//! Executed whenever a store is opened. There are no migrations; the table
//! shape is fixed.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never deleted. The only UPDATE is the consume transition.
CREATE TABLE IF NOT EXISTS groceries (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT,
    tags         TEXT NOT NULL,    -- composite 'tag,subtag'
    expiry_date  TEXT,             -- YYYY-MM-DD or NULL
    image_base64 TEXT NOT NULL,
    consumed     INTEGER NOT NULL DEFAULT 0,
    consumed_at  TEXT,             -- UTC 'YYYY-MM-DD HH:MM:SS.fff'
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    CHECK ((consumed = 0) = (consumed_at IS NULL))
);

CREATE INDEX IF NOT EXISTS groceries_tags_idx ON groceries(tags, consumed);
";

