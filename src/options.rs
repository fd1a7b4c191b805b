//! Logger configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::Level;

fn default_project_name() -> String {
    "app".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

/// Settings consumed once when a logger is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Name used for the log file, `<project_name>.log` (default: "app")
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Directory the log file lives in, created if missing (default: "./logs")
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Minimum level written to the file (default: info)
    #[serde(default)]
    pub level: Level,

    /// Attach the caller's `file:line` to every record (default: false)
    #[serde(default)]
    pub add_source: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            log_dir: default_log_dir(),
            level: Level::default(),
            add_source: false,
        }
    }
}

impl Options {
    /// Create options for a project with every other setting at its default
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Set the directory the log file is created in
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Set the minimum level written
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Attach the caller's location to every record
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// Replace blank project name or directory with the defaults
    pub fn with_defaults(mut self) -> Self {
        if self.project_name.trim().is_empty() {
            self.project_name = default_project_name();
        }
        if self.log_dir.as_os_str().is_empty() {
            self.log_dir = default_log_dir();
        }
        self
    }

    /// Path of the log file these options select
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}.log", self.project_name))
    }

    /// Parse options from TOML, filling unset keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Options = toml::from_str(content).context("Failed to parse logger options")?;
        Ok(options.with_defaults())
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read logger options from {}", path.display()))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.project_name, "app");
        assert_eq!(options.log_dir, PathBuf::from("./logs"));
        assert_eq!(options.level, Level::Info);
        assert!(!options.add_source);
        assert_eq!(options.log_path(), PathBuf::from("./logs/app.log"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let options = Options {
            project_name: String::new(),
            log_dir: PathBuf::new(),
            level: Level::Debug,
            add_source: true,
        }
        .with_defaults();

        assert_eq!(options.project_name, "app");
        assert_eq!(options.log_dir, PathBuf::from("./logs"));
        assert_eq!(options.level, Level::Debug);
        assert!(options.add_source);
    }

    #[test]
    fn test_builder() {
        let options = Options::new("t1")
            .with_log_dir("/tmp/x")
            .with_level(Level::Warn)
            .with_add_source(true);
        assert_eq!(options.log_path(), PathBuf::from("/tmp/x/t1.log"));
        assert_eq!(options.level, Level::Warn);
        assert!(options.add_source);
    }

    #[test]
    fn test_from_toml() {
        let options = Options::from_toml_str(
            r#"
            project_name = "billing"
            level = "debug"
            add_source = true
            "#,
        )
        .unwrap();

        assert_eq!(options.project_name, "billing");
        assert_eq!(options.log_dir, PathBuf::from("./logs"));
        assert_eq!(options.level, Level::Debug);
        assert!(options.add_source);

        let upper = Options::from_toml_str(r#"level = "INFO""#).unwrap();
        assert_eq!(upper.level, Level::Info);
        let mixed = Options::from_toml_str(r#"level = "Warn""#).unwrap();
        assert_eq!(mixed.level, Level::Warn);
    }

    #[test]
    fn test_from_toml_rejects_unknown_level() {
        assert!(Options::from_toml_str(r#"level = "loud""#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "project_name = \"svc\"\nlog_dir = \"/var/log/svc\"\n").unwrap();

        let options = Options::load(&path).unwrap();
        assert_eq!(options.log_path(), PathBuf::from("/var/log/svc/svc.log"));
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = Options::load(Path::new("/nonexistent/logging.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read logger options"));
    }

    #[test]
    fn test_options_serialization() {
        let options = Options::new("rt").with_level(Level::Error);
        let toml_str = toml::to_string(&options).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(options, parsed);
    }
}
