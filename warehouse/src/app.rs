//! Core application

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::SqliteService;
use crate::domain::warehouse::{BuildOptions, BuildReport, WarehouseBuilder};
use crate::utils::file::write_json_pretty;

pub struct CoreApp {
    pub config: AppConfig,
    pub database: SqliteService,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let app = Self::init(config).await?;

        let result = match command {
            Some(Commands::Migrate) => app.migrate().await,
            Some(Commands::Build) | None => app.build().await.map(|_| ()),
        };

        app.database.close().await;
        result
    }

    async fn init(config: AppConfig) -> Result<Self> {
        let database = SqliteService::init(&config.database)
            .await
            .with_context(|| {
                format!(
                    "Failed to open warehouse database: {}",
                    config.database.path.display()
                )
            })?;

        Ok(Self { config, database })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Schema is brought up to date by `init`; report where it stands
    async fn migrate(&self) -> Result<()> {
        let version = self.database.schema_version().await?;
        tracing::info!(
            path = %self.config.database.path.display(),
            version = ?version,
            "Schema up to date"
        );
        Ok(())
    }

    /// Run one warehouse build and persist its report
    pub async fn build(&self) -> Result<BuildReport> {
        let options = self
            .config
            .build
            .as_of
            .map(BuildOptions::new)
            .unwrap_or_else(BuildOptions::today);

        let report = WarehouseBuilder::new(options)
            .run(&self.database)
            .await
            .context("Warehouse build failed")?;

        if self.config.build.write_report {
            let path = &self.config.build.report_path;
            write_json_pretty(path, &report).await?;
            tracing::info!(path = %path.display(), "Build report written");
        } else {
            tracing::debug!("Build report file disabled");
        }

        for (step, rows) in report
            .dimensions_built
            .iter()
            .chain(&report.fact_tables_built)
            .chain(&report.aggregates_built)
        {
            tracing::info!(step = %step, rows, "Step complete");
        }
        for step in &report.skipped_steps {
            tracing::warn!(step = %step, "Step skipped");
        }

        Ok(report)
    }
}
