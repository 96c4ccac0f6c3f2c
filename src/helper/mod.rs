//! SQLite execution helper.
//!
//! Every `execute_*` method binds its values with the configured [`Binder`]
//! before the statement runs. A bind failure aborts the call without
//! touching the database.

mod sqlite;

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, Statement};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use sqlite::DATETIME_FORMAT;

use crate::binder::{BindOptions, Binder};
use crate::error::Result;
use crate::types::{ColumnValue, QueryResult, Row, Value};

/// Configuration for [`SqliteHelper`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Database file path (None for an in-memory database).
    pub path: Option<PathBuf>,
    /// Create the database file if it does not exist (default: true).
    pub create_if_missing: bool,
    /// How long to wait on a locked database, in milliseconds (default: 5000).
    pub busy_timeout_ms: u64,
    /// Parameter binding options.
    pub bind: BindOptions,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            path: None,
            create_if_missing: true,
            busy_timeout_ms: 5000,
            bind: BindOptions::default(),
        }
    }
}

impl HelperConfig {
    /// Creates a configuration for the database file at `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Creates a configuration for an in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Sets whether a missing database file is created.
    #[must_use]
    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets the busy timeout in milliseconds.
    #[must_use]
    pub fn with_busy_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Sets the binding options.
    #[must_use]
    pub fn with_bind_options(mut self, bind: BindOptions) -> Self {
        self.bind = bind;
        self
    }
}

/// Runs parameterized statements against a single SQLite connection.
pub struct SqliteHelper {
    conn: Mutex<Connection>,
    binder: Binder,
}

impl SqliteHelper {
    /// Opens a database as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &HelperConfig) -> Result<Self> {
        let mut flags = OpenFlags::default();
        if !config.create_if_missing {
            flags.remove(OpenFlags::SQLITE_OPEN_CREATE);
        }

        let conn = match &config.path {
            Some(path) => Connection::open_with_flags(path, flags)?,
            None => Connection::open_in_memory_with_flags(flags)?,
        };
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;

        debug!(path = ?config.path, "opened sqlite database");
        Ok(Self::from_connection(conn, config.bind))
    }

    /// Opens an in-memory database with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&HelperConfig::in_memory())
    }

    /// Wraps an already open connection.
    #[must_use]
    pub fn from_connection(conn: Connection, bind: BindOptions) -> Self {
        SqliteHelper {
            conn: Mutex::new(conn),
            binder: Binder::new(bind),
        }
    }

    /// Returns the binder used for every statement.
    #[must_use]
    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    /// Executes a statement that returns no rows.
    ///
    /// Returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if binding or execution fails.
    pub fn execute_non_query(&self, sql: &str, values: &[Value]) -> Result<usize> {
        let conn = self.conn.lock();
        self.non_query_on(&conn, sql, values)
    }

    /// Executes a query and returns the first column of the first row.
    ///
    /// Returns None when the query yields no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if binding or execution fails.
    pub fn execute_scalar(&self, sql: &str, values: &[Value]) -> Result<Option<ColumnValue>> {
        let conn = self.conn.lock();
        let mut stmt = self.prepare_bound(&conn, sql, values)?;
        let mut rows = stmt.raw_query();
        let value = match rows.next()? {
            Some(row) => Some(ColumnValue::from(row.get_ref(0)?)),
            None => None,
        };
        Ok(value)
    }

    /// Executes a query and collects every row.
    ///
    /// # Errors
    ///
    /// Returns an error if binding or execution fails.
    pub fn execute_query(&self, sql: &str, values: &[Value]) -> Result<QueryResult> {
        let conn = self.conn.lock();
        self.query_on(&conn, sql, values)
    }

    /// Executes a statement that returns no rows inside a transaction.
    ///
    /// The transaction is committed on success and rolled back on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if binding, execution or commit fails.
    pub fn execute_non_query_with_transaction(&self, sql: &str, values: &[Value]) -> Result<usize> {
        self.with_transaction(|conn| self.non_query_on(conn, sql, values))
    }

    /// Executes a query inside a transaction and collects every row.
    ///
    /// # Errors
    ///
    /// Returns an error if binding, execution or commit fails.
    pub fn execute_query_with_transaction(&self, sql: &str, values: &[Value]) -> Result<QueryResult> {
        self.with_transaction(|conn| self.query_on(conn, sql, values))
    }

    /// Runs a batch of semicolon-separated statements without parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        debug!(sql, "executing batch");
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }

    fn with_transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "rolling back transaction");
                if let Err(rollback_err) = tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(e)
            }
        }
    }

    fn non_query_on(&self, conn: &Connection, sql: &str, values: &[Value]) -> Result<usize> {
        let mut stmt = self.prepare_bound(conn, sql, values)?;
        Ok(stmt.raw_execute()?)
    }

    fn query_on(&self, conn: &Connection, sql: &str, values: &[Value]) -> Result<QueryResult> {
        let mut stmt = self.prepare_bound(conn, sql, values)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut result = QueryResult::new(columns);
        let mut rows = stmt.raw_query();
        while let Some(row) = rows.next()? {
            let mut out = Row::new();
            for (i, column) in result.columns.iter().enumerate() {
                out.push(column.clone(), ColumnValue::from(row.get_ref(i)?));
            }
            result.add_row(out);
        }
        Ok(result)
    }

    /// Binds `values`, then prepares `sql` and attaches the parameters.
    ///
    /// Binding is skipped entirely when `values` is empty.
    fn prepare_bound<'c>(
        &self,
        conn: &'c Connection,
        sql: &str,
        values: &[Value],
    ) -> Result<Statement<'c>> {
        let params = if values.is_empty() {
            None
        } else {
            Some(self.binder.bind(sql, values)?)
        };

        debug!(sql, values = values.len(), "executing statement");
        let mut stmt = conn.prepare(sql)?;
        if let Some(params) = params {
            params.attach_to(&mut stmt)?;
        }
        Ok(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqlBindError;

    fn helper_with_table() -> SqliteHelper {
        let helper = SqliteHelper::open_in_memory().unwrap();
        helper
            .execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT, active INTEGER)")
            .unwrap();
        helper
    }

    #[test]
    fn test_config_defaults() {
        let config = HelperConfig::default();
        assert!(config.path.is_none());
        assert!(config.create_if_missing);
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(config.bind, BindOptions::default());
    }

    #[test]
    fn test_insert_and_scalar() {
        let helper = helper_with_table();
        let changed = helper
            .execute_non_query(
                "INSERT INTO t VALUES(@id,@name,@active)",
                &[Value::from(1), Value::from("a"), Value::from(true)],
            )
            .unwrap();
        assert_eq!(changed, 1);

        let name = helper
            .execute_scalar("SELECT name FROM t WHERE id=@id", &[Value::from(1)])
            .unwrap();
        assert_eq!(name, Some(ColumnValue::Text("a".into())));
    }

    #[test]
    fn test_scalar_without_rows() {
        let helper = helper_with_table();
        let missing = helper
            .execute_scalar("SELECT name FROM t WHERE id=@id", &[Value::from(9)])
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_bind_failure_does_not_execute() {
        let helper = helper_with_table();
        let err = helper
            .execute_non_query(
                "INSERT INTO t VALUES(@id,@name,@active)",
                &[Value::from(1), Value::Null, Value::from(true)],
            )
            .unwrap_err();
        assert!(matches!(err, SqlBindError::UnsupportedParameterType { .. }));

        let count = helper.execute_scalar("SELECT count(*) FROM t", &[]).unwrap();
        assert_eq!(count, Some(ColumnValue::Integer(0)));
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let helper = helper_with_table();
        let insert = "INSERT INTO t VALUES(@id,@name,@active)";
        helper
            .execute_non_query(insert, &[Value::from(1), Value::from("a"), Value::from(false)])
            .unwrap();

        let err = helper
            .execute_non_query_with_transaction(
                insert,
                &[Value::from(1), Value::from("dup"), Value::from(false)],
            )
            .unwrap_err();
        assert!(matches!(err, SqlBindError::Sqlite(_)));

        let result = helper.execute_query("SELECT name FROM t", &[]).unwrap();
        assert_eq!(result.row_count(), 1);
    }

    #[test]
    fn test_failed_rollback_keeps_original_error() {
        let helper = helper_with_table();
        let err = helper
            .with_transaction(|conn| -> Result<()> {
                // Ending the transaction here makes the helper's rollback fail
                conn.execute_batch("ROLLBACK")?;
                Err(SqlBindError::UnknownParameter("@gone".into()))
            })
            .unwrap_err();
        assert!(matches!(err, SqlBindError::UnknownParameter(name) if name == "@gone"));
    }

    #[test]
    fn test_duplicate_column_names_are_kept() {
        let helper = helper_with_table();
        let result = helper.execute_query("SELECT 1 AS x, 2 AS x", &[]).unwrap();
        assert_eq!(result.columns, vec!["x", "x"]);

        let row = result.get_row(0).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get_index(0), Some(&ColumnValue::Integer(1)));
        assert_eq!(row.get_index(1), Some(&ColumnValue::Integer(2)));
        assert_eq!(row.get("x"), Some(&ColumnValue::Integer(1)));
    }
}
