//! SQL DDL for initializing the application database.
//! SQLite-first design; one flat table per entity.

/// SQLite schema notes:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT on every entity table
/// - timestamps stored as RFC3339 TEXT
/// - `completed_dates` / `participants` are JSON arrays serialized as TEXT
/// - boolean flags stored as INTEGER 0/1
/// - `user_preferences` is keyed by email, one row per signed-in user
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS habits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NULL,
    category TEXT NULL,
    created_at TEXT NOT NULL,
    completed_dates TEXT NOT NULL DEFAULT '[]',
    is_archived INTEGER NOT NULL DEFAULT 0,
    archived_at TEXT NULL,
    is_paused INTEGER NOT NULL DEFAULT 0,
    paused_at TEXT NULL
);

CREATE TABLE IF NOT EXISTS mood_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    mood TEXT NOT NULL,
    notes TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    amount REAL NOT NULL,
    payer TEXT NOT NULL,
    participants TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    ingredients TEXT NULL,
    instructions TEXT NULL,
    prep_time INTEGER NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS user_preferences (
    email TEXT PRIMARY KEY,
    theme TEXT NULL,
    has_seen_tutorial INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_habits_is_archived ON habits(is_archived)
"#;
