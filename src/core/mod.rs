/// Core Module
///
/// Shared infrastructure for the session wrapper: the database session itself
/// and the error type used across the crate.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, SessionError};
