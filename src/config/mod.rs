//! Configuration module for vmat.
//!
//! Handles Vertica credentials, environment variables, and settings.

mod credentials;
mod settings;

pub use credentials::{CredentialsError, VerticaCredentials, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
pub use settings::{expand_env_vars, DefaultSettings, ProfileSettings, Settings, SettingsError};
