use crate::core::{Result, SessionError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Default configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "db_config.json";

const CONNECTION_STRING_KEY: &str = "connectionString";
const TIMEOUT_KEY: &str = "timeout";

/// Connection settings as written to disk.
///
/// Serializes as `{"connectionString": ..., "timeout": ...}` in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbConfig {
    pub connection_string: String,
    /// Seconds. Not validated.
    pub timeout: i32,
}

/// The JSON object read back from a configuration file.
///
/// No schema is enforced on load; accessors return `None` for keys that are
/// missing or hold the wrong JSON type.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredConfig {
    values: Map<String, Value>,
}

impl StoredConfig {
    pub fn connection_string(&self) -> Option<&str> {
        self.values.get(CONNECTION_STRING_KEY).and_then(Value::as_str)
    }

    pub fn timeout(&self) -> Option<i64> {
        self.values.get(TIMEOUT_KEY).and_then(Value::as_i64)
    }

    /// Raw access to any key of the stored object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Converts to a typed `DbConfig`, failing if either key is missing or ill-typed
    pub fn into_config(self) -> Result<DbConfig> {
        let connection_string = self
            .connection_string()
            .ok_or_else(|| SessionError::Config(format!("missing string `{}`", CONNECTION_STRING_KEY)))?
            .to_string();
        let timeout = self
            .timeout()
            .and_then(|t| i32::try_from(t).ok())
            .ok_or_else(|| SessionError::Config(format!("missing integer `{}`", TIMEOUT_KEY)))?;

        Ok(DbConfig {
            connection_string,
            timeout,
        })
    }
}

/// Reads and writes connection settings in a single JSON file.
///
/// Each save overwrites the file wholesale; each load re-parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore::new(CONFIG_FILE)
    }
}

impl ConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves the connection settings, logging (not returning) any failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dbsession::ConfigStore;
    ///
    /// ConfigStore::default().save_config("jdbc:sqlite:app.db", 30);
    /// ```
    pub fn save_config(&self, connection_string: &str, timeout: i32) {
        let config = DbConfig {
            connection_string: connection_string.to_string(),
            timeout,
        };
        if let Err(e) = self.try_save(&config) {
            error!("Failed to save configuration to {:?}: {}", self.path, e);
        }
    }

    /// Writes `config` as 4-space indented JSON, replacing the file
    pub fn try_save(&self, config: &DbConfig) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        config.serialize(&mut ser)?;

        fs::write(&self.path, buf)?;
        debug!("Saved configuration to {:?}", self.path);
        Ok(())
    }

    /// Loads the stored settings.
    ///
    /// Returns `None` when the file is missing, unreadable, not JSON, or not a
    /// JSON object.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dbsession::ConfigStore;
    ///
    /// if let Some(config) = ConfigStore::default().load_config() {
    ///     println!("{:?}", config.connection_string());
    /// }
    /// ```
    pub fn load_config(&self) -> Option<StoredConfig> {
        match self.try_load() {
            Ok(config) => Some(config),
            Err(e) => {
                debug!("No configuration loaded from {:?}: {}", self.path, e);
                None
            }
        }
    }

    /// Loads the stored settings, reporting why a load failed
    pub fn try_load(&self) -> Result<StoredConfig> {
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(values) => Ok(StoredConfig { values }),
            other => Err(SessionError::Config(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Saves to `db_config.json` in the working directory
pub fn save_config(connection_string: &str, timeout: i32) {
    ConfigStore::default().save_config(connection_string, timeout)
}

/// Loads from `db_config.json` in the working directory
pub fn load_config() -> Option<StoredConfig> {
    ConfigStore::default().load_config()
}
