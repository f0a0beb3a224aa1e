//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and pure record logic
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool-backed storage with one CRUD section per entity

pub mod models;
pub mod schema;
pub mod sqlite;

use crate::error::TrackleError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub use models::{Expense, Habit, MoodEntry, NewHabit, Recipe, UserPreferences};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, TrackerStorage};

/// Open (creating if missing) the SQLite database and run the DDL.
pub async fn connect(database_url: &str) -> Result<TrackerStorage, TrackleError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = TrackerStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}
