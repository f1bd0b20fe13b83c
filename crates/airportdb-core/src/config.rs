// crates/airportdb-core/src/config.rs

//! # Store configuration
//!
//! Connection parameters are resolved once at process start and handed to the
//! store constructor. Layering (later wins):
//!
//! 1. [`StoreConfig::default`]
//! 2. a JSON secrets file ([`Secrets`])
//! 3. explicit overrides from the caller (CLI flags / environment)

use crate::error::{AirportError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_DBNAME: &str = "airports";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a store needs to open a connection.
#[derive(Clone, PartialEq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// Upper bound on establishing a connection.
    pub connect_timeout: Duration,
    /// Upper bound on the statements of one operation.
    pub statement_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            dbname: DEFAULT_DBNAME.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("connect_timeout", &self.connect_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

impl StoreConfig {
    /// Defaults overlaid with a secrets file.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::default().with_secrets(Secrets::from_path(path)?))
    }

    /// Overlays every field the secrets file sets.
    pub fn with_secrets(mut self, secrets: Secrets) -> Self {
        if let Some(v) = secrets.db_host {
            self.host = v;
        }
        if let Some(v) = secrets.db_port {
            self.port = v;
        }
        if let Some(v) = secrets.db_user {
            self.user = v;
        }
        if let Some(v) = secrets.db_password {
            self.password = v;
        }
        if let Some(v) = secrets.db_name {
            self.dbname = v;
        }
        if let Some(v) = secrets.connect_timeout_secs {
            self.connect_timeout = Duration::from_secs(v);
        }
        if let Some(v) = secrets.statement_timeout_secs {
            self.statement_timeout = Duration::from_secs(v);
        }
        self
    }

    /// Rejects settings no connection could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AirportError::invalid("database host is empty"));
        }
        if self.dbname.trim().is_empty() {
            return Err(AirportError::invalid("database name is empty"));
        }
        if self.connect_timeout.is_zero() || self.statement_timeout.is_zero() {
            return Err(AirportError::invalid("timeouts must be greater than zero"));
        }
        Ok(())
    }
}

/// Shape of the externally managed secrets file.
///
/// ```json
/// { "db_host": "db.internal", "db_port": 5432, "db_user": "flights",
///   "db_password": "...", "db_name": "openflights" }
/// ```
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Secrets {
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub statement_timeout_secs: Option<u64>,
}

impl Secrets {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AirportError::invalid(format!(
                "secrets file {} unreadable: {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
