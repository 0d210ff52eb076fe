//! Vertica connection credentials.
//!
//! Supports configuration via environment variables:
//! - `VMAT_HOST`: Vertica server hostname
//! - `VMAT_DATABASE`: Database name
//! - `VMAT_SCHEMA`: Default schema
//! - `VMAT_USER` / `VMAT_PASSWORD`: Login
//! - `VMAT_PORT`: Port (optional, defaults to 5433)
//! - `VMAT_TIMEOUT`: Connection timeout in seconds (optional, defaults to 3600)
//! - `VMAT_WITH_MATERIALIZATION`: Enable WITH clause materialization for
//!   every session (optional, defaults to false)

use std::env;

use serde::{Deserialize, Serialize};

/// Default Vertica client port.
pub const DEFAULT_PORT: u16 = 5433;

/// Default connection timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

const ENABLE_WITH_MATERIALIZATION: &str =
    "ALTER SESSION SET PARAMETER EnableWithClauseMaterialization=1";

/// Error type for credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Credentials for one Vertica target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticaCredentials {
    pub host: String,
    pub database: String,
    pub schema: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connection timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Enable WITH clause materialization for every session.
    #[serde(default, alias = "withMaterialization")]
    pub with_materialization: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl VerticaCredentials {
    /// Create credentials with default port, timeout and session options.
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            database: database.into(),
            schema: schema.into(),
            username: username.into(),
            password: password.into(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT_SECS,
            with_materialization: false,
        }
    }

    /// Load credentials from environment variables.
    pub fn from_env() -> Result<Self, CredentialsError> {
        let required = |name: &str| {
            env::var(name).map_err(|_| CredentialsError::MissingEnvVar(name.to_string()))
        };

        let mut creds = Self::new(
            required("VMAT_HOST")?,
            required("VMAT_DATABASE")?,
            required("VMAT_SCHEMA")?,
            required("VMAT_USER")?,
            required("VMAT_PASSWORD")?,
        );

        if let Ok(port) = env::var("VMAT_PORT") {
            creds.port = port
                .parse()
                .map_err(|_| CredentialsError::InvalidConfig(format!("VMAT_PORT: '{}'", port)))?;
        }

        if let Ok(timeout) = env::var("VMAT_TIMEOUT") {
            creds.timeout = timeout.parse().map_err(|_| {
                CredentialsError::InvalidConfig(format!("VMAT_TIMEOUT: '{}'", timeout))
            })?;
        }

        if let Ok(flag) = env::var("VMAT_WITH_MATERIALIZATION") {
            creds.with_materialization = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(CredentialsError::InvalidConfig(format!(
                        "VMAT_WITH_MATERIALIZATION: '{}'",
                        other
                    )))
                }
            };
        }

        Ok(creds)
    }

    /// Adapter type name.
    pub fn adapter_type(&self) -> &'static str {
        "vertica"
    }

    /// Keys shown when describing a connection. Never includes the password.
    pub fn connection_keys(&self) -> &'static [&'static str] {
        &["host", "port", "database", "username", "schema"]
    }

    /// Session label reported to Vertica.
    pub fn session_label(&self) -> String {
        format!("dbt_{}", self.username)
    }

    /// Driver connection parameters, in the order a client expects them.
    pub fn connection_info(&self) -> Vec<(&'static str, String)> {
        vec![
            ("host", self.host.clone()),
            ("port", self.port.to_string()),
            ("user", self.username.clone()),
            ("password", self.password.clone()),
            ("database", self.database.clone()),
            ("connection_timeout", self.timeout.to_string()),
            ("connection_load_balance", "true".to_string()),
            ("session_label", self.session_label()),
        ]
    }

    /// Connection parameters with the password masked.
    pub fn redacted_info(&self) -> Vec<(&'static str, String)> {
        self.connection_info()
            .into_iter()
            .map(|(k, v)| if k == "password" { (k, "****".to_string()) } else { (k, v) })
            .collect()
    }

    /// Values for [`connection_keys`](Self::connection_keys), in order.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        self.connection_keys()
            .iter()
            .map(|&key| {
                let value = match key {
                    "host" => self.host.clone(),
                    "port" => self.port.to_string(),
                    "database" => self.database.clone(),
                    "username" => self.username.clone(),
                    "schema" => self.schema.clone(),
                    _ => String::new(),
                };
                (key, value)
            })
            .collect()
    }

    /// Statements to run right after a session opens.
    ///
    /// A failure running these should be logged and ignored.
    pub fn session_setup_statements(&self) -> Vec<String> {
        if self.with_materialization {
            vec![ENABLE_WITH_MATERIALIZATION.to_string()]
        } else {
            Vec::new()
        }
    }
}
