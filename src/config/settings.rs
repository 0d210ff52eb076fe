//! TOML-based configuration for vmat.
//!
//! Supports a config file (vmat.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [profiles.dev]
//! host = "localhost"
//! database = "analytics"
//! schema = "public"
//! username = "dbadmin"
//! password = "${VERTICA_PASSWORD}"
//!
//! [profiles.prod]
//! host = "vertica.prod.internal"
//! database = "analytics"
//! schema = "marts"
//! username = "loader"
//! password = "$PROD_PASSWORD"
//! with_materialization = true
//!
//! [defaults]
//! profile = "dev"
//!
//! [defaults.table]
//! ksafe = 1
//!
//! [defaults.quoting]
//! database = false
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::credentials::{
    CredentialsError, VerticaCredentials, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
};
use crate::model::table::TableConfig;
use crate::sql::relation::{QuotePolicy, Relation, RelationError};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid credentials: {0}")]
    Credentials(#[from] CredentialsError),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named Vertica targets.
    pub profiles: BTreeMap<String, ProfileSettings>,

    /// Project-wide defaults.
    pub defaults: DefaultSettings,
}

/// One Vertica target as written in the config file.
///
/// String fields support `${VAR}` / `$VAR` expansion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileSettings {
    pub host: String,
    pub database: String,
    pub schema: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default, alias = "withMaterialization")]
    pub with_materialization: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ProfileSettings {
    /// Expand environment variables and produce credentials.
    pub fn resolve(&self) -> Result<VerticaCredentials, SettingsError> {
        Ok(VerticaCredentials {
            host: expand_env_vars(&self.host)?,
            database: expand_env_vars(&self.database)?,
            schema: expand_env_vars(&self.schema)?,
            username: expand_env_vars(&self.username)?,
            password: expand_env_vars(&self.password)?,
            port: self.port,
            timeout: self.timeout,
            with_materialization: self.with_materialization,
        })
    }
}

/// Project-wide defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Profile used when none is named.
    pub profile: Option<String>,

    /// Base table config; model configs are layered on top.
    pub table: TableConfig,

    /// Quoting applied to relation names.
    pub quoting: QuotePolicy,
}

impl Settings {
    /// Parse settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings = Self::parse(&content)?;
        tracing::info!(path = %path.display(), profiles = settings.profiles.len(), "loaded settings");
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `VMAT_CONFIG`
    /// 2. `./vmat.toml`
    /// 3. `~/.config/vmat/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("VMAT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("vmat.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("vmat").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        tracing::debug!("no settings file found, using defaults");
        Ok(Settings::default())
    }

    /// Get a profile by name.
    pub fn get_profile(&self, name: &str) -> Result<&ProfileSettings, SettingsError> {
        self.profiles
            .get(name)
            .ok_or_else(|| SettingsError::ProfileNotFound(name.to_string()))
    }

    /// Get the default profile.
    ///
    /// Uses `defaults.profile` if set, else a profile named `default`, else
    /// the first profile by name. `Ok(None)` if no profiles exist.
    pub fn default_profile(&self) -> Result<Option<(&str, &ProfileSettings)>, SettingsError> {
        if let Some(ref name) = self.defaults.profile {
            let profile = self.get_profile(name)?;
            return Ok(Some((name.as_str(), profile)));
        }

        if let Some(profile) = self.profiles.get("default") {
            return Ok(Some(("default", profile)));
        }

        Ok(self.profiles.iter().next().map(|(k, v)| (k.as_str(), v)))
    }

    /// Resolve credentials for a named profile, or the default one.
    ///
    /// With no profile named and none configured, falls back to
    /// [`VerticaCredentials::from_env`] and reports the name `env`.
    pub fn credentials(
        &self,
        profile: Option<&str>,
    ) -> Result<(String, VerticaCredentials), SettingsError> {
        let (name, profile) = match profile {
            Some(name) => (name, self.get_profile(name)?),
            None => match self.default_profile()? {
                Some(found) => found,
                None => {
                    tracing::debug!("no profiles configured, reading credentials from environment");
                    return Ok(("env".to_string(), VerticaCredentials::from_env()?));
                }
            },
        };
        Ok((name.to_string(), profile.resolve()?))
    }

    /// Layer a model's table config over the project defaults.
    pub fn table_config_for(&self, model: &TableConfig) -> TableConfig {
        TableConfig::merge(&self.defaults.table, model)
    }

    /// Parse a relation name and apply `defaults.quoting`.
    pub fn relation(&self, name: &str) -> Result<Relation, RelationError> {
        Relation::parse(name).map(|rel| rel.quote_policy(self.defaults.quoting))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.next_if_eq(&'{').is_some() {
            let mut name = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                name.push(ch);
            }
            name
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
