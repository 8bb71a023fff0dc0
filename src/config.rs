//! Environment-driven settings shared by the binary.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` before anything reads them.

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_PATH: &str = "Customer Churn.csv";
pub const DEFAULT_REPORT_DIR: &str = ".";
const DEFAULT_LOG_FILE: &str = "logs/churn_insights.log";

/// Where the JSON log file rolls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: PathBuf,
    pub file_name: String,
}

impl LogConfig {
    /// Reads `LOG_FILE_PATH`, falling back to `logs/churn_insights.log`.
    pub fn from_env() -> Self {
        let path = std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Self::from_path(&path)
    }

    pub fn from_path(path: &str) -> Self {
        let path = Path::new(path);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("logs"),
        };
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("churn_insights.log")
            .to_string();
        Self { dir, file_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_splits_path() {
        let config = LogConfig::from_path("/var/log/churn/app.log");
        assert_eq!(config.dir, PathBuf::from("/var/log/churn"));
        assert_eq!(config.file_name, "app.log");
    }

    #[test]
    fn test_log_config_bare_file_name() {
        let config = LogConfig::from_path("app.log");
        assert_eq!(config.dir, PathBuf::from("logs"));
        assert_eq!(config.file_name, "app.log");
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::from_path(DEFAULT_LOG_FILE);
        assert_eq!(config.dir, PathBuf::from("logs"));
        assert_eq!(config.file_name, "churn_insights.log");
    }
}
