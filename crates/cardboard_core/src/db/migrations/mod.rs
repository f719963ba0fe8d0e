//! Key-value schema steps.
//!
//! Each step is one SQL file applied inside a single transaction together
//! with every other pending step. Steps are append-only and numbered from 1.

use crate::db::{DbError, DbResult, KV_TABLE};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the key-value schema up to date.
///
/// Returns how many steps ran; `0` when the file was already current.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - `DbError::MissingKvTable` when the recorded version claims the schema
///   but the table is gone.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = stored_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();
    if pending.is_empty() {
        ensure_kv_schema(conn)?;
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    ensure_kv_schema(&tx)?;
    tx.commit()?;

    info!(
        "event=kv_schema_upgrade module=db status=ok from={found} to={supported} steps={}",
        pending.len()
    );
    Ok(pending.len())
}

/// Fails with `DbError::MissingKvTable` unless `kv_entries` exists.
pub fn ensure_kv_schema(conn: &Connection) -> DbResult<()> {
    let present: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if present {
        Ok(())
    } else {
        Err(DbError::MissingKvTable)
    }
}

fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
