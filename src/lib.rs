// Core infrastructure modules
pub mod core;

// Configuration persistence
pub mod config;

#[cfg(test)]
mod test_utils;

pub use crate::config::{ConfigStore, DbConfig, StoredConfig, CONFIG_FILE};
pub use crate::core::db::{DatabaseSession, ResultSet, Row, SessionEvent, SessionState};
pub use crate::core::{Result, SessionError};
