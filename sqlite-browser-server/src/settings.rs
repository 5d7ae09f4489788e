//! Command line and configuration loading
//!
//! Precedence, lowest first: built-in defaults, the TOML file given with
//! `--config`, `SQLITE_BROWSER_*` environment variables, command line flags.

use std::path::PathBuf;

use clap::Parser;
use config::{Environment, File, FileFormat};
use sqlite_browser::{KnownDatabase, ViewerConfig};

/// Prefix for configuration environment variables, e.g. `SQLITE_BROWSER_PORT`
pub const ENVIRONMENT_PREFIX: &str = "SQLITE_BROWSER";

/// Read-only web browser for SQLite database files
#[derive(Parser, Debug)]
#[command(name = "sqlite-browser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Base log level, used when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,

    /// Known database as LABEL=PATH (or just PATH), may be repeated
    #[arg(short, long = "database", value_parser = parse_known_database)]
    pub databases: Vec<KnownDatabase>,
}

/// Parse `LABEL=PATH`, falling back to the path itself as the label
fn parse_known_database(value: &str) -> Result<KnownDatabase, String> {
    let (label, path) = match value.split_once('=') {
        Some((label, path)) => (label.trim(), path.trim()),
        None => (value.trim(), value.trim()),
    };

    if label.is_empty() || path.is_empty() {
        return Err(format!("expected LABEL=PATH, got '{}'", value));
    }

    Ok(KnownDatabase {
        label: label.to_string(),
        path: path.to_string(),
    })
}

/// Build the viewer configuration from every source
pub fn load(cli: &Cli, environment: Environment) -> Result<ViewerConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = &cli.config {
        builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
    }

    let settings = builder
        .add_source(environment)
        .set_override_option("host", cli.host.clone())?
        .set_override_option("port", cli.port.map(i64::from))?
        .set_override_option("log_level", cli.log_level.clone())?
        .build()?;

    let mut viewer_config: ViewerConfig = settings.try_deserialize()?;
    viewer_config.databases.extend(cli.databases.iter().cloned());

    Ok(viewer_config)
}
