//! Triage configuration.
//!
//! Output and logging preferences for the CLI.
//! Config file: ~/.config/triage/config.toml (see `default_config_path`)

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "triage";
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the config location
pub const CONFIG_ENV: &str = "TRIAGE_CONFIG";

/// Color display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    /// Default output of one-shot `evaluate` is JSON
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Entries shown by the history view, 0 = all
    #[serde(default)]
    pub max_display: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl TriageConfig {
    /// Parse a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TriageError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Load the file if present, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Config location: $TRIAGE_CONFIG, else $XDG_CONFIG_HOME/triage/config.toml,
/// else ~/.config/triage/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join(CONFIG_DIR).join(CONFIG_FILE));
        }
    }

    dirs::home_dir().map(|home| home.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TriageConfig::default();
        assert_eq!(config.output.color, ColorMode::Auto);
        assert!(!config.output.json);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.history.max_display, 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TriageConfig::parse("[output]\ncolor = \"never\"\n").unwrap();
        assert_eq!(config.output.color, ColorMode::Never);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[output]\ncolor = \"always\"\njson = true\n\n[log]\nlevel = \"debug\"\n\n[history]\nmax_display = 5"
        )
        .unwrap();

        let config = TriageConfig::load(file.path()).unwrap();
        assert_eq!(config.output.color, ColorMode::Always);
        assert!(config.output.json);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.history.max_display, 5);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TriageConfig::parse("[output\ncolor = ").unwrap_err();
        assert_eq!(err.exit_code(), 78);

        let err = TriageConfig::parse("[output]\ncolor = \"sepia\"").unwrap_err();
        assert!(matches!(err, TriageError::Toml(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("config.toml");
        let config = TriageConfig::load_or_default(Some(&absent)).unwrap();
        assert_eq!(config.output.color, ColorMode::Auto);
        assert!(TriageConfig::load(&absent).is_err());
    }
}
