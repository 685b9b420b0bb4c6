// Configuration for the logging facade

use std::path::{Path, PathBuf};

use consulate_common::{ENV_LOG_FILE, ENV_LOG_LEVEL, ENV_LOG_ROTATION, LogError, Result};
use serde::{Deserialize, Serialize};

use crate::file_sink::LogRotation;
use crate::severity::Severity;

/// Logging facade configuration.
///
/// Unlike most settings, an invalid level is an error everywhere it can be
/// supplied: it is never replaced by the default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum severity that reaches any sink (default: warning)
    pub level: Severity,
    /// Built-in file sink location; no file sink when absent
    pub file: Option<PathBuf>,
    /// Rotation policy for the file sink (default: never)
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Severity::Warning,
            file: None,
            rotation: LogRotation::Never,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Create from environment variables.
    ///
    /// Reads `CONSULATE_LOG_LEVEL`, `CONSULATE_LOG_FILE` and
    /// `CONSULATE_LOG_ROTATION`. Unset variables, and an empty file or
    /// rotation, keep their defaults; a level must always be valid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.level = Severity::parse(&level)?;
        }

        if let Some(file) = lookup(ENV_LOG_FILE).filter(|f| !f.trim().is_empty()) {
            config.file = Some(PathBuf::from(file));
        }

        if let Some(rotation) = lookup(ENV_LOG_ROTATION).filter(|r| !r.trim().is_empty()) {
            config.rotation = rotation.parse()?;
        }

        Ok(config)
    }

    /// Parse a TOML document.
    ///
    /// ```
    /// use consulate_log::{LoggingConfig, Severity};
    ///
    /// let config = LoggingConfig::from_toml_str(r#"
    ///     level = "INFO"
    ///     file = "var/logs/agent.log"
    /// "#).unwrap();
    /// assert_eq!(config.level, Severity::Info);
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self> {
        toml::from_str(document).map_err(|e| LogError::Config(e.to_string()))
    }

    /// Load a TOML document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Severity::Warning);
        assert!(config.file.is_none());
        assert_eq!(config.rotation, LogRotation::Never);
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::default()
            .with_level(Severity::Debug)
            .with_file("/tmp/consulate.log")
            .with_rotation(LogRotation::Daily);

        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/consulate.log")));
        assert_eq!(config.rotation, LogRotation::Daily);
    }

    #[test]
    fn test_from_lookup() {
        let config = LoggingConfig::from_lookup(lookup(&[
            (ENV_LOG_LEVEL, " warn "),
            (ENV_LOG_FILE, "/var/log/consulate.log"),
            (ENV_LOG_ROTATION, "HOURLY"),
        ]))
        .unwrap();

        assert_eq!(config.level, Severity::Warning);
        assert_eq!(config.file, Some(PathBuf::from("/var/log/consulate.log")));
        assert_eq!(config.rotation, LogRotation::Hourly);
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = LoggingConfig::from_lookup(lookup(&[
            (ENV_LOG_FILE, "  "),
            (ENV_LOG_ROTATION, ""),
        ]))
        .unwrap();
        assert_eq!(config, LoggingConfig::default());

        let err = LoggingConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "")])).unwrap_err();
        assert!(err.is_invalid_input());
        let err =
            LoggingConfig::from_lookup(lookup(&[(ENV_LOG_ROTATION, "weekly")])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_lookup_rejects_invalid_level() {
        let err = LoggingConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_toml() {
        let config = LoggingConfig::from_toml_str(
            r#"
            level = "Critical"
            file = "logs/consulate.log"
            rotation = "daily"
            "#,
        )
        .unwrap();

        assert_eq!(config.level, Severity::Critical);
        assert_eq!(config.file, Some(PathBuf::from("logs/consulate.log")));
        assert_eq!(config.rotation, LogRotation::Daily);

        let config = LoggingConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_non_string_level() {
        let err = LoggingConfig::from_toml_str("level = 3").unwrap_err();
        assert!(matches!(err, LogError::Config(_)));
        assert!(err.to_string().contains("log level must be a string"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_level_and_fields() {
        let err = LoggingConfig::from_toml_str("level = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("\"loud\" seen"));

        assert!(LoggingConfig::from_toml_str("colour = true").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "level = \"debug\"\n").unwrap();

        let config = LoggingConfig::load(&path).unwrap();
        assert_eq!(config.level, Severity::Debug);

        let err = LoggingConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
    }
}
