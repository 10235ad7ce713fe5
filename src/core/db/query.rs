/// Query Result Module
///
/// This module provides the cursor handed back by `DatabaseSession::execute_query`
/// and the value formatting used to display it.

use crate::core::{Result, SessionError};
use rusqlite::types::Value;
use rusqlite::{Batch, Connection, Statement};
use std::collections::VecDeque;
use tracing::debug;

/// A single row of a query result
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Returns the value at column `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// All values of the row in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Formats every value for display
    pub fn to_strings(&self) -> Vec<String> {
        self.values.iter().map(format_value).collect()
    }
}

/// Cursor over the rows produced by a query.
///
/// The cursor is owned by whoever receives it; the session keeps no reference
/// to it. Rows are consumed front to back through `Iterator`. Calling `close`
/// (or dropping the cursor) releases the remaining rows.
///
/// Rows are not streamed: the whole result is read into memory before the
/// cursor is returned, since rusqlite rows cannot outlive their statement.
/// Bound large queries with `LIMIT`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: VecDeque<Row>,
}

impl ResultSet {
    /// Prepares and runs `sql` on `conn`, stepping through every row.
    ///
    /// The statement is finalized when this returns; errors raised while
    /// stepping are reported here rather than on iteration.
    pub(crate) fn fetch(conn: &Connection, sql: &str) -> Result<Self> {
        let mut stmt = prepare_single(conn, sql)?;
        if stmt.column_count() == 0 {
            return Err(SessionError::Query("statement does not return a result set".to_string()));
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    values.push(row.get::<_, Value>(i)?);
                }
                Ok(Row { values })
            })?
            .collect::<std::result::Result<VecDeque<_>, _>>()?;

        Ok(ResultSet { columns, rows })
    }

    /// Column names in result order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Finds a column by name, ignoring ASCII case
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Number of rows not yet consumed
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// Releases the cursor
    pub fn close(self) {
        debug!("Closing result set with {} unread rows", self.rows.len());
    }
}

impl Iterator for ResultSet {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows.len(), Some(self.rows.len()))
    }
}

/// Prepares `sql`, which must hold exactly one statement.
///
/// `Connection::prepare` silently ignores anything after the first statement;
/// here a second statement is an error and nothing is executed. Trailing
/// whitespace, semicolons and comments are fine.
pub(crate) fn prepare_single<'conn>(conn: &'conn Connection, sql: &str) -> Result<Statement<'conn>> {
    let mut batch = Batch::new(conn, sql);
    let stmt = batch
        .next()?
        .ok_or_else(|| SessionError::Query("no statement to execute".to_string()))?;

    match batch.next() {
        Ok(None) => Ok(stmt),
        _ => Err(SessionError::Query("multiple statements provided".to_string())),
    }
}

/// Formats a SQLite value for display
///
/// # Arguments
///
/// * `value` - Database value to format
///
/// # Returns
///
/// A string representation of the value suitable for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(t) => t.clone(),
        Value::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}
