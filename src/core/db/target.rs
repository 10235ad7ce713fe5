/// Connection String Module
///
/// Resolves a driver-manager style connection string into something
/// rusqlite can open.

use crate::core::{Result, SessionError};
use rusqlite::Connection;
use std::time::Duration;
use tracing::debug;

const JDBC_SQLITE_PREFIX: &str = "jdbc:sqlite:";
const SQLITE_PREFIX: &str = "sqlite:";
const MEMORY_TARGET: &str = ":memory:";
const MAX_BUSY_MILLIS: u64 = i32::MAX as u64;

/// Where a connection string points
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionTarget {
    /// A private in-memory database
    Memory,
    /// A database file path or `file:` URI
    File(String),
}

impl ConnectionTarget {
    /// Parses a connection string.
    ///
    /// `jdbc:sqlite:` and `sqlite:` prefixes are optional. Strings naming any
    /// other driver (`jdbc:postgresql:...`, `mysql://...`) are rejected with
    /// `SessionError::NoSuitableDriver`.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let target = if let Some(rest) = connection_string.strip_prefix(JDBC_SQLITE_PREFIX) {
            rest
        } else if let Some(rest) = connection_string.strip_prefix(SQLITE_PREFIX) {
            rest.strip_prefix("//").unwrap_or(rest)
        } else if connection_string.starts_with("jdbc:") || connection_string.contains("://") {
            return Err(SessionError::NoSuitableDriver(connection_string.to_string()));
        } else {
            connection_string
        };

        if target.is_empty() || target == MEMORY_TARGET {
            Ok(ConnectionTarget::Memory)
        } else {
            Ok(ConnectionTarget::File(target.to_string()))
        }
    }

    /// Opens a new connection to this target.
    ///
    /// A positive `timeout` (seconds) becomes the SQLite busy timeout,
    /// capped at `i32::MAX` milliseconds, the most SQLite accepts.
    pub fn open(&self, timeout: i32) -> Result<Connection> {
        let conn = match self {
            ConnectionTarget::Memory => Connection::open_in_memory()?,
            ConnectionTarget::File(path) => Connection::open(path)?,
        };

        if timeout > 0 {
            let millis = (timeout as u64).saturating_mul(1000).min(MAX_BUSY_MILLIS);
            conn.busy_timeout(Duration::from_millis(millis))?;
        }
        debug!("Opened {:?} (timeout {}s)", self, timeout);

        Ok(conn)
    }
}
