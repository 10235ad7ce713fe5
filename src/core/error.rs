/// Session Error Module
///
/// This module defines the error type shared by the configuration store and
/// the database session. Every session operation returns one of these while
/// also reporting the failure through the registered error sink.
use thiserror::Error;

/// Error type for configuration and database session operations.
///
/// This enum covers:
/// - Driver failures (connection, statement preparation, execution, close)
/// - SQL text that is not exactly one statement of the expected kind
/// - Connection strings no available driver understands
/// - Use of a session that has no open connection
/// - Configuration file I/O and JSON parsing
#[derive(Error, Debug)]
pub enum SessionError {
    /// Errors reported by SQLite
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The connection string names a driver other than SQLite
    #[error("No suitable driver found for {0}")]
    NoSuitableDriver(String),

    /// SQL text the session refuses to run (empty, several statements, or
    /// a non-query passed to `execute_query`)
    #[error("Query error: {0}")]
    Query(String),

    /// A query or update was attempted before a successful connect
    #[error("No active connection")]
    NotConnected,

    /// Configuration content errors (missing or ill-typed keys)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing and serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    /// The underlying failure text, without the category prefix.
    ///
    /// Sink messages embed this so they read like the driver's own message.
    pub fn detail(&self) -> String {
        match self {
            SessionError::Database(e) => e.to_string(),
            SessionError::Io(e) => e.to_string(),
            SessionError::Json(e) => e.to_string(),
            SessionError::Config(msg) | SessionError::Query(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Type alias for Result to use SessionError as the error type.
pub type Result<T> = std::result::Result<T, SessionError>;
