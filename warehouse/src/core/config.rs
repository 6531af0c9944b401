use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, SQLITE_BUSY_TIMEOUT_SECS, SQLITE_MAX_CONNECTIONS,
};
use super::storage::{default_database_path, default_report_path, resolve_data_dir};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// SQLite database file; `~` and relative paths are expanded
    pub path: Option<String>,
    pub busy_timeout_secs: Option<u64>,
    pub max_connections: Option<u32>,
}

/// Build configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BuildFileConfig {
    /// Fixed build date; today when absent
    pub as_of: Option<NaiveDate>,
    pub report_path: Option<String>,
    pub write_report: Option<bool>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub database: Option<DatabaseFileConfig>,
    pub build: Option<BuildFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Unknown top-level keys, sorted
    fn unknown_fields(&self) -> Vec<&str> {
        match &self.extra {
            serde_json::Value::Object(map) => {
                let mut keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
                keys.sort_unstable();
                keys
            }
            _ => Vec::new(),
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        let keys = self.unknown_fields();
        if !keys.is_empty() {
            tracing::warn!(
                fields = %keys.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(database) = other.database {
            let current = self
                .database
                .get_or_insert_with(DatabaseFileConfig::default);
            if database.path.is_some() {
                tracing::trace!(path = ?database.path, "Merging database.path");
                current.path = database.path;
            }
            if database.busy_timeout_secs.is_some() {
                current.busy_timeout_secs = database.busy_timeout_secs;
            }
            if database.max_connections.is_some() {
                current.max_connections = database.max_connections;
            }
        }

        if let Some(build) = other.build {
            let current = self.build.get_or_insert_with(BuildFileConfig::default);
            if build.as_of.is_some() {
                tracing::trace!(as_of = ?build.as_of, "Merging build.as_of");
                current.as_of = build.as_of;
            }
            if build.report_path.is_some() {
                current.report_path = build.report_path;
            }
            if build.write_report.is_some() {
                current.write_report = build.write_report;
            }
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// SQLite connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub busy_timeout_secs: u64,
    pub max_connections: u32,
}

/// Warehouse build settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// `None` means the local date at build time
    pub as_of: Option<NaiveDate>,
    pub report_path: PathBuf,
    pub write_report: bool,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database: DatabaseConfig,
    pub build: BuildConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.salesdw/salesdw.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Self::layer(cli, file_config, resolve_data_dir())
    }

    /// Layer defaults, merged file config and CLI/env overrides
    fn layer(cli: &CliConfig, file_config: FileConfig, data_dir: PathBuf) -> Result<Self> {
        let file_database = file_config.database.unwrap_or_default();
        let file_build = file_config.build.unwrap_or_default();

        let database_path = cli
            .database
            .as_ref()
            .map(|p| expand_path(&p.to_string_lossy()))
            .or_else(|| file_database.path.as_deref().map(expand_path))
            .unwrap_or_else(|| default_database_path(&data_dir));

        let max_connections = file_database
            .max_connections
            .unwrap_or(SQLITE_MAX_CONNECTIONS);
        if max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }

        let database = DatabaseConfig {
            path: database_path,
            busy_timeout_secs: file_database
                .busy_timeout_secs
                .unwrap_or(SQLITE_BUSY_TIMEOUT_SECS),
            max_connections,
        };

        let report_path = cli
            .report
            .as_ref()
            .map(|p| expand_path(&p.to_string_lossy()))
            .or_else(|| file_build.report_path.as_deref().map(expand_path))
            .unwrap_or_else(|| default_report_path(&data_dir));

        // --no-report always wins over the file setting
        let write_report = !cli.no_report && file_build.write_report.unwrap_or(true);

        let build = BuildConfig {
            as_of: cli.as_of.or(file_build.as_of),
            report_path,
            write_report,
        };

        tracing::debug!(
            database = %database.path.display(),
            as_of = ?build.as_of,
            write_report = build.write_report,
            "Configuration resolved"
        );

        Ok(Self {
            data_dir,
            database,
            build,
        })
    }
}

fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
