//! Schema bootstrap for a fresh or current database.
//!
//! # Invariants
//! - The schema version is mirrored to `PRAGMA user_version`.
//! - A blank database (`user_version = 0`) gets the whole schema in one
//!   transaction; a database already at [`SCHEMA_VERSION`] is left alone.
//! - A database stamped with any other version is rejected, never altered.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Version stamped on databases created by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the schema on a blank database and verifies it otherwise.
pub(crate) fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = user_version(conn)?;
    if found == SCHEMA_VERSION {
        return Ok(());
    }
    if found != 0 {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!(
        "event=db_schema module=db status=created version={}",
        SCHEMA_VERSION
    );
    Ok(())
}

fn user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
