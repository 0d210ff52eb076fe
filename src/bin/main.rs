//! vmat CLI - Render Vertica table materializations
//!
//! Usage:
//!   vmat render <relation> (--query <sql> | --query-file <path>) [--config <file>] [--temporary] [--strict]
//!   vmat check --config <file>
//!   vmat session [--profile <name>]
//!
//! Examples:
//!   vmat render analytics.public.events --query-file models/events.sql --config models/events.toml
//!   vmat render scratch --query "select 1 as x" --temporary
//!   vmat session --profile prod

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use vmat::compile::{compile_table_with, CompileOptions};
use vmat::config::Settings;
use vmat::model::TableConfig;
use vmat::sql::Dialect;

#[derive(Parser)]
#[command(name = "vmat")]
#[command(about = "vmat - Vertica CREATE TABLE AS generation for table materializations")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to $VMAT_CONFIG, ./vmat.toml, then the user config dir)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the CREATE TABLE AS statement for a model
    Render {
        /// Target relation: identifier, schema.identifier or database.schema.identifier
        relation: String,

        /// Inner SELECT query
        #[arg(short, long, conflicts_with = "query_file", required_unless_present = "query_file")]
        query: Option<String>,

        /// File holding the inner SELECT query
        #[arg(short = 'f', long)]
        query_file: Option<PathBuf>,

        /// Model table config (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Create a session-scoped temporary table
        #[arg(long)]
        temporary: bool,

        /// Fail on configs that would render invalid SQL
        #[arg(long)]
        strict: bool,

        /// SQL dialect to generate
        #[arg(short, long, default_value = "vertica")]
        dialect: DialectArg,
    },

    /// Report suspicious options in a model table config
    Check {
        /// Model table config (.toml or .json)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Show connection parameters and session setup for a profile
    Session {
        /// Profile name (defaults to the configured default profile, then VMAT_* variables)
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Vertica,
    Ansi,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Vertica => Dialect::Vertica,
            DialectArg::Ansi => Dialect::Ansi,
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            relation,
            query,
            query_file,
            config,
            temporary,
            strict,
            dialect,
        } => cmd_render(
            cli.settings.as_deref(),
            &relation,
            query,
            query_file,
            config,
            temporary,
            strict,
            dialect,
        ),
        Commands::Check { config } => cmd_check(&config),
        Commands::Session { profile } => cmd_session(cli.settings.as_deref(), profile),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only SQL.
fn init_logging() {
    let log_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_writer(std::io::stderr)
        .init();
}

type CliResult<T = ExitCode> = Result<T, Box<dyn std::error::Error>>;

fn load_settings(path: Option<&Path>) -> Result<Settings, vmat::config::SettingsError> {
    match path {
        Some(p) => Settings::from_file(p),
        None => Settings::load(),
    }
}

fn load_table_config(path: &Path) -> CliResult<TableConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        TableConfig::from_json_str(&content)?
    } else {
        TableConfig::from_toml_str(&content)?
    };
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn cmd_render(
    settings_path: Option<&Path>,
    relation: &str,
    query: Option<String>,
    query_file: Option<PathBuf>,
    config: Option<PathBuf>,
    temporary: bool,
    strict: bool,
    dialect: DialectArg,
) -> CliResult {
    let settings = load_settings(settings_path)?;
    let relation = settings.relation(relation)?;

    let query = match (query, query_file) {
        (Some(q), _) => q,
        (None, Some(path)) => fs::read_to_string(&path)
            .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))?,
        (None, None) => return Err("either --query or --query-file is required".into()),
    };

    let model = match config {
        Some(path) => load_table_config(&path)?,
        None => TableConfig::default(),
    };
    let mut table_config = settings.table_config_for(&model);
    if temporary {
        table_config.temporary = Some(true);
    }

    let mut options = CompileOptions::default().with_dialect(dialect.into());
    if strict {
        options = options.strict();
    }

    // Config warnings are logged by compile_table_with
    let output = compile_table_with(&table_config, &relation, query.trim(), options)?;
    println!("{}", output.sql);
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(config: &Path) -> CliResult {
    let table_config = load_table_config(config)?;

    let warnings = table_config.warnings();
    if warnings.is_empty() {
        println!("OK: {} has no warnings", config.display());
    } else {
        println!("{}:", config.display());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    match table_config.validate() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Validation error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_session(settings_path: Option<&Path>, profile: Option<String>) -> CliResult {
    let settings = load_settings(settings_path)?;
    let (name, creds) = settings.credentials(profile.as_deref())?;

    println!("Profile: {} ({})", name, creds.adapter_type());
    println!();
    println!("Connection:");
    for (key, value) in creds.redacted_info() {
        println!("  {}: {}", key, value);
    }

    let setup = creds.session_setup_statements();
    println!();
    if setup.is_empty() {
        println!("Session setup: none");
    } else {
        println!("Session setup:");
        for stmt in setup {
            println!("  {}", stmt);
        }
    }

    Ok(ExitCode::SUCCESS)
}
