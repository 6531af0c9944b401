//! File and path helpers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Expand a user-supplied path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory; relative paths are
/// joined onto the current directory. No canonicalization is done, so the
/// target need not exist.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path))
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories
pub async fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let body = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/var/lib/salesdw"), PathBuf::from("/var/lib/salesdw"));
    }

    #[test]
    fn test_expand_path_relative_becomes_absolute() {
        let result = expand_path("./warehouse.db");
        assert!(result.is_absolute());
        assert!(result.ends_with("warehouse.db"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.salesdw");
        assert!(result.is_absolute());
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".salesdw"));
    }

    #[test]
    fn test_expand_path_trims_whitespace() {
        assert_eq!(expand_path("  /data/dw  "), PathBuf::from("/data/dw"));
    }

    #[tokio::test]
    async fn test_write_json_pretty_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.json");

        write_json_pretty(&path, &serde_json::json!({"fact_sales": 3}))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["fact_sales"], 3);
        assert!(content.contains('\n'));
    }
}
