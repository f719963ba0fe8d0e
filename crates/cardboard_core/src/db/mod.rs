//! SQLite backing for the key-value store.
//!
//! # Responsibility
//! - Open connections that already carry the `kv_entries` schema.
//! - Report schema problems in store terms: a missing table or a file
//!   written by a newer build.
//!
//! # Invariants
//! - `PRAGMA user_version` holds the last schema step applied.
//! - Nothing reads or writes `kv_entries` before `ensure_kv_schema` passes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::ensure_kv_schema;
pub use open::{open_db, open_db_in_memory};

/// Table holding every key-value entry.
pub const KV_TABLE: &str = "kv_entries";

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or checking the key-value database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build than this one.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection was opened without the key-value schema.
    MissingKvTable,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value schema version {found} is newer than this build supports ({supported})"
            ),
            Self::MissingKvTable => write!(
                f,
                "`{KV_TABLE}` table is missing; open the database with open_db"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
