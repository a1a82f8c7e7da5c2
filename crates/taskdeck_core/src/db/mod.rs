//! SQLite storage engine for taskdeck core.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection behind a [`Store`].
//! - Create the schema on first open and reject unknown schema versions.
//! - Provide CRUD, search and filter queries for every entity.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Foreign keys are enforced: child rows cascade with their task and
//!   `tasks.categoryId` is set to NULL when its category is deleted.
//! - Storage never retries and never swallows errors.
//!
//! # See also
//! - schema.sql for the persisted schema contract.

use log::info;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

mod attachments;
mod categories;
mod open;
mod preferences;
mod reminders;
pub mod schema;
mod subtasks;
mod tasks;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A persisted row cannot be mapped back to a domain record.
    InvalidData(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is not supported (expected {latest_supported})"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Owner of the one SQLite connection used by all repositories.
///
/// Repositories borrow `&Store`, so every call is serialized on this
/// connection. No transaction spans more than one `Store` method.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) a database file with the schema fully applied.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an isolated in-memory database with the schema fully applied.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Returns the applied schema version.
    pub fn schema_version(&self) -> DbResult<u32> {
        let version = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        Ok(version)
    }

    /// Deletes every row of every table, preferences included.
    pub fn clear_all(&self) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(
            "DELETE FROM reminders;
             DELETE FROM attachments;
             DELETE FROM subtasks;
             DELETE FROM tasks;
             DELETE FROM categories;
             DELETE FROM user_preferences;",
        )?;
        tx.commit()?;
        info!("event=store_clear module=db status=ok");
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Accumulates `column = expr` assignments for partial updates.
#[derive(Default)]
pub(crate) struct SetClause {
    assignments: Vec<(&'static str, &'static str)>,
    values: Vec<Value>,
}

impl SetClause {
    pub(crate) fn set(&mut self, column: &'static str, value: Value) {
        self.set_expr(column, "?", value);
    }

    /// Assigns an SQL expression with exactly one `?` placeholder.
    pub(crate) fn set_expr(&mut self, column: &'static str, expr: &'static str, value: Value) {
        self.assignments.push((column, expr));
        self.values.push(value);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Renders `UPDATE {table} SET ... WHERE id = ?` and its bind values,
    /// with `id` bound last.
    pub(crate) fn into_update(self, table: &str, id: &str) -> (String, Vec<Value>) {
        let assignments = self
            .assignments
            .iter()
            .map(|(column, expr)| format!("{column} = {expr}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut values = self.values;
        values.push(Value::Text(id.to_string()));
        (format!("UPDATE {table} SET {assignments} WHERE id = ?;"), values)
    }
}

pub(crate) fn text_value(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn optional_text_value(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text_value)
}

pub(crate) fn optional_int_value(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> DbResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DbError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

/// Parses a persisted enum column, reporting the column on failure.
pub(crate) fn parse_enum<T: std::str::FromStr>(value: &str, column: &str) -> DbResult<T> {
    value
        .parse::<T>()
        .map_err(|_| DbError::InvalidData(format!("invalid value `{value}` in {column}")))
}

pub(crate) fn row_exists(conn: &Connection, table: &str, id: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
