//! Platform-aware data directory resolution
//!
//! ## Platform Paths
//!
//! | Type | Windows | macOS | Linux |
//! |------|---------|-------|-------|
//! | Data | `%APPDATA%\SalesDW\` | `~/Library/Application Support/SalesDW/` | `$XDG_DATA_HOME/salesdw/` |

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::constants::{
    APP_DOT_FOLDER, APP_NAME, ENV_DATA_DIR, REPORT_FILENAME, REPORTS_SUBDIR, SQLITE_DB_FILENAME,
    SQLITE_SUBDIR,
};
use crate::utils::file::expand_path;

/// Resolve data directory from env var or platform default
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR)
        && !dir.trim().is_empty()
    {
        return expand_path(&dir);
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        return proj_dirs.data_dir().to_path_buf();
    }

    // Fallback to local .salesdw
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.join(APP_DOT_FOLDER)
}

/// Default database location under `data_dir`
pub fn default_database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SQLITE_SUBDIR).join(SQLITE_DB_FILENAME)
}

/// Default report location under `data_dir`
pub fn default_report_path(data_dir: &Path) -> PathBuf {
    data_dir.join(REPORTS_SUBDIR).join(REPORT_FILENAME)
}
