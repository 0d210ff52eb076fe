//! Tests for settings files and profile resolution.

use std::env;
use std::fs;

use vmat::config::{Settings, SettingsError, VerticaCredentials};

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = env::temp_dir().join(format!("vmat_{}_{}.toml", name, std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

const SETTINGS: &str = r#"
[profiles.dev]
host = "localhost"
database = "analytics"
schema = "public"
username = "dbadmin"
password = "${VMAT_SETTINGS_TEST_PASSWORD}"

[profiles.prod]
host = "vertica.prod.internal"
database = "analytics"
schema = "marts"
username = "loader"
password = "plain"
port = 5434
timeout = 60
with_materialization = true

[defaults]
profile = "prod"

[defaults.table]
ksafe = 1
"#;

#[test]
fn test_from_file_and_default_profile() {
    let path = write_temp("default_profile", SETTINGS);
    let settings = Settings::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(settings.profiles.len(), 2);
    assert_eq!(settings.defaults.table.ksafe, Some(1));

    let (name, profile) = settings.default_profile().unwrap().unwrap();
    assert_eq!(name, "prod");

    let creds = profile.resolve().unwrap();
    assert_eq!(creds.port, 5434);
    assert_eq!(creds.timeout, 60);
    assert_eq!(creds.session_label(), "dbt_loader");
    assert_eq!(
        creds.session_setup_statements(),
        vec!["ALTER SESSION SET PARAMETER EnableWithClauseMaterialization=1".to_string()]
    );
}

#[test]
fn test_profile_env_expansion() {
    let settings = Settings::parse(SETTINGS).unwrap();
    let dev = settings.get_profile("dev").unwrap();

    assert!(matches!(dev.resolve(), Err(SettingsError::MissingEnvVar(_))));

    env::set_var("VMAT_SETTINGS_TEST_PASSWORD", "from-env");
    let creds = dev.resolve().unwrap();
    env::remove_var("VMAT_SETTINGS_TEST_PASSWORD");

    assert_eq!(creds.password, "from-env");
    assert_eq!(creds.port, 5433);
    assert_eq!(creds.timeout, 3600);
    assert!(creds.session_setup_statements().is_empty());
}

#[test]
fn test_missing_profile_and_file() {
    let settings = Settings::parse(SETTINGS).unwrap();
    assert!(matches!(
        settings.get_profile("staging"),
        Err(SettingsError::ProfileNotFound(ref p)) if p == "staging"
    ));

    let missing = env::temp_dir().join("vmat_definitely_missing_settings.toml");
    assert!(matches!(
        Settings::from_file(&missing),
        Err(SettingsError::FileNotFound(_))
    ));
}

#[test]
fn test_parse_error() {
    assert!(matches!(
        Settings::parse("[profiles.dev]\nhost = "),
        Err(SettingsError::ParseError(_))
    ));
}

#[test]
fn test_credentials_describe() {
    let creds = VerticaCredentials::new("h", "d", "s", "u", "p");
    let keys: Vec<_> = creds.describe().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, creds.connection_keys().to_vec());
    assert!(!keys.contains(&"password"));
}

#[test]
fn test_credentials_fall_back_to_environment() {
    let settings = Settings::default();

    env::remove_var("VMAT_HOST");
    assert!(matches!(
        settings.credentials(None),
        Err(SettingsError::Credentials(_))
    ));

    for (key, value) in [
        ("VMAT_HOST", "vertica.env"),
        ("VMAT_DATABASE", "analytics"),
        ("VMAT_SCHEMA", "public"),
        ("VMAT_USER", "etl"),
        ("VMAT_PASSWORD", "pw"),
    ] {
        env::set_var(key, value);
    }
    let (name, creds) = settings.credentials(None).unwrap();
    assert_eq!(name, "env");
    assert_eq!(creds.host, "vertica.env");
    assert_eq!(creds.session_label(), "dbt_etl");

    // A configured default profile takes precedence over the environment
    let settings = Settings::parse(SETTINGS).unwrap();
    let (name, creds) = settings.credentials(None).unwrap();
    assert_eq!(name, "prod");
    assert_eq!(creds.host, "vertica.prod.internal");

    for key in ["VMAT_HOST", "VMAT_DATABASE", "VMAT_SCHEMA", "VMAT_USER", "VMAT_PASSWORD"] {
        env::remove_var(key);
    }
}
