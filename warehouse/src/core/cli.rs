use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::constants::{ENV_AS_OF, ENV_CONFIG, ENV_DATABASE, ENV_NO_REPORT, ENV_REPORT};

#[derive(Parser, Debug)]
#[command(name = "salesdw")]
#[command(version, about = "Dimensional warehouse builder for sales data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse database
    #[arg(long, short = 'd', global = true, env = ENV_DATABASE)]
    pub database: Option<PathBuf>,

    /// Build date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true, env = ENV_AS_OF)]
    pub as_of: Option<NaiveDate>,

    /// Where to write the build report JSON
    #[arg(long, global = true, env = ENV_REPORT)]
    pub report: Option<PathBuf>,

    /// Do not write the build report file
    #[arg(long, global = true, env = ENV_NO_REPORT)]
    pub no_report: bool,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Build the warehouse in one transaction (default command)
    Build,
    /// Create or upgrade the database schema without building
    Migrate,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
    pub report: Option<PathBuf>,
    pub no_report: bool,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            database: cli.database,
            as_of: cli.as_of,
            report: cli.report,
            no_report: cli.no_report,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (cli.into(), command)
}
