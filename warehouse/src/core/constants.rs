// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "SalesDW";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "salesdw";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".salesdw";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "salesdw.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SALESDW_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SALESDW_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "SALESDW_DATA_DIR";

/// Environment variable for the warehouse database path
pub const ENV_DATABASE: &str = "SALESDW_DATABASE";

/// Environment variable for the build date (`YYYY-MM-DD`)
pub const ENV_AS_OF: &str = "SALESDW_AS_OF";

/// Environment variable for the build report path
pub const ENV_REPORT: &str = "SALESDW_REPORT";

/// Environment variable to disable writing the build report
pub const ENV_NO_REPORT: &str = "SALESDW_NO_REPORT";

// =============================================================================
// SQLite Database
// =============================================================================

/// Data subdirectory holding the database
pub const SQLITE_SUBDIR: &str = "sqlite";

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "salesdw.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 2;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Build Report
// =============================================================================

/// Data subdirectory holding build reports
pub const REPORTS_SUBDIR: &str = "reports";

/// Build report filename
pub const REPORT_FILENAME: &str = "warehouse_build_report.json";
