/// Session Management Module
///
/// This module provides `DatabaseSession`, a wrapper around a single SQLite
/// connection that reports its lifecycle through optional notification sinks.

use super::events::{SessionEvent, Sinks};
use super::query::{prepare_single, ResultSet};
use super::target::ConnectionTarget;
use crate::config::DbConfig;
use crate::core::{Result, SessionError};
use rusqlite::Connection;
use std::fmt;
use tracing::{debug, error, info, warn};

pub const CONNECTED_MESSAGE: &str = "Connection established successfully.";

/// Represents session connection states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No connection handle is held
    Disconnected,
    /// A connection handle is held
    Connected,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Disconnected
    }
}

/// A single database connection and its lifecycle.
///
/// Every operation returns a `Result` and, in addition, fires the matching
/// sink. Database failures never panic; a caller that neither inspects the
/// result nor registers an error sink will not notice them.
///
/// The session is not synchronized. Callers sharing one across threads must
/// serialize access themselves.
pub struct DatabaseSession {
    connection_string: String,
    timeout: i32,
    connection: Option<Connection>,
    sinks: Sinks,
}

impl DatabaseSession {
    /// Creates a disconnected session
    ///
    /// # Arguments
    ///
    /// * `connection_string` - e.g. `jdbc:sqlite:app.db`, `sqlite::memory:` or a plain file path
    /// * `timeout` - Seconds; a positive value becomes the SQLite busy timeout on connect
    pub fn new(connection_string: impl Into<String>, timeout: i32) -> Self {
        DatabaseSession {
            connection_string: connection_string.into(),
            timeout,
            connection: None,
            sinks: Sinks::default(),
        }
    }

    /// Creates a disconnected session from stored configuration
    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(config.connection_string.clone(), config.timeout)
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn timeout(&self) -> i32 {
        self.timeout
    }

    pub fn state(&self) -> SessionState {
        if self.connection.is_some() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == SessionState::Connected
    }

    /// Sets the sink notified after a successful `connect`
    pub fn set_on_connected<F>(&mut self, sink: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.sinks.set(SessionEvent::Connected, Some(Box::new(sink)));
    }

    /// Sets the sink notified after a successful query or update
    pub fn set_on_query_executed<F>(&mut self, sink: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.sinks.set(SessionEvent::QueryExecuted, Some(Box::new(sink)));
    }

    /// Sets the sink notified on any failure
    pub fn set_on_error<F>(&mut self, sink: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.sinks.set(SessionEvent::Error, Some(Box::new(sink)));
    }

    /// Removes the sink for `event`; that event is no longer reported
    pub fn clear_sink(&mut self, event: SessionEvent) {
        self.sinks.set(event, None);
    }

    /// Opens a connection using the stored connection string
    ///
    /// On failure the error sink receives `Error connecting: <detail>` and
    /// any previously held handle is left as it was. Connecting while already
    /// connected replaces (and thereby closes) the old handle.
    pub fn connect(&mut self) -> Result<()> {
        let opened = ConnectionTarget::parse(&self.connection_string)
            .and_then(|target| target.open(self.timeout));

        match opened {
            Ok(conn) => {
                if self.connection.replace(conn).is_some() {
                    warn!("connect() called on a connected session; previous connection dropped");
                }
                info!("Connected to {}", self.connection_string);
                self.sinks.emit(SessionEvent::Connected, CONNECTED_MESSAGE);
                Ok(())
            }
            Err(e) => {
                debug!("Connection to {} failed: {}", self.connection_string, e);
                self.sinks
                    .emit(SessionEvent::Error, &format!("Error connecting: {}", e.detail()));
                Err(e)
            }
        }
    }

    /// Runs a query and hands the resulting cursor to the caller
    ///
    /// # Returns
    ///
    /// The `ResultSet`, which the caller owns. The query-executed sink receives
    /// `Query executed: <query>`.
    ///
    /// # Errors
    ///
    /// `SessionError::NotConnected` without a connection (no sink fires).
    /// `SessionError::Query` when `query` is not exactly one row-returning
    /// statement; nothing is executed. Otherwise the driver error. Both are
    /// also reported as `Query error: <detail>`.
    pub fn execute_query(&mut self, query: &str) -> Result<ResultSet> {
        let conn = self.connection.as_ref().ok_or_else(|| {
            error!("execute_query called without an active connection");
            SessionError::NotConnected
        })?;

        match ResultSet::fetch(conn, query) {
            Ok(rs) => {
                self.sinks
                    .emit(SessionEvent::QueryExecuted, &format!("Query executed: {}", query));
                Ok(rs)
            }
            Err(e) => {
                self.sinks
                    .emit(SessionEvent::Error, &format!("Query error: {}", e.detail()));
                Err(e)
            }
        }
    }

    /// Runs a mutating statement and returns the number of affected rows
    ///
    /// `query` must be a single statement; several statements are rejected
    /// before any of them runs.
    ///
    /// The statement is finalized before returning, on success and failure
    /// alike. A finalize failure is reported as `Failed to close statement: <detail>`
    /// and does not change the returned count. Use `unwrap_or_default()` for
    /// "0 rows on failure".
    pub fn execute_update(&mut self, query: &str) -> Result<usize> {
        let conn = self.connection.as_ref().ok_or_else(|| {
            error!("execute_update called without an active connection");
            SessionError::NotConnected
        })?;

        let mut stmt = match prepare_single(conn, query) {
            Ok(stmt) => stmt,
            Err(e) => {
                self.sinks
                    .emit(SessionEvent::Error, &format!("Query error: {}", e.detail()));
                return Err(e);
            }
        };

        let outcome = stmt.execute([]).map_err(SessionError::from);
        match &outcome {
            Ok(rows) => self.sinks.emit(
                SessionEvent::QueryExecuted,
                &format!("Query executed: {} ({} rows affected)", query, rows),
            ),
            Err(e) => self
                .sinks
                .emit(SessionEvent::Error, &format!("Query error: {}", e.detail())),
        }

        if let Err(e) = stmt.finalize() {
            error!("Failed to close statement: {}", e);
            self.sinks
                .emit(SessionEvent::Error, &format!("Failed to close statement: {}", e));
        }

        outcome
    }

    /// Closes the connection, if one is held
    ///
    /// Success is only logged. If SQLite refuses to close, the handle is kept
    /// and the error sink receives `Failed to close connection: <detail>`.
    pub fn disconnect(&mut self) -> Result<()> {
        let Some(conn) = self.connection.take() else {
            debug!("disconnect() without an open connection");
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("Connection closed.");
                Ok(())
            }
            Err((conn, e)) => {
                self.connection = Some(conn);
                self.sinks
                    .emit(SessionEvent::Error, &format!("Failed to close connection: {}", e));
                Err(e.into())
            }
        }
    }
}

impl fmt::Debug for DatabaseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSession")
            .field("connection_string", &self.connection_string)
            .field("timeout", &self.timeout)
            .field("state", &self.state())
            .field("sinks", &self.sinks)
            .finish()
    }
}
