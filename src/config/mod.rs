//! Config module - Ignore rules and the configuration file they come from.
//!
//! The configuration file is YAML:
//!
//! ```yaml
//! ignore_fields:
//!   - id
//!   - metadata.creationTimestamp
//! ignore_patterns:
//!   - ".*Timestamp$"
//! ```

mod rules;

pub use rules::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name looked up in the home and current directories.
pub const CONFIG_FILE_NAME: &str = ".gcdiff.yaml";

/// ConfigError represents a failure to load or compile the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid ignore pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Config is the on-disk form of the ignore rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Exact field paths to ignore, e.g. `metadata.creationTimestamp`.
    #[serde(default)]
    pub ignore_fields: Vec<String>,

    /// Regular expressions matched against the full field path.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl Config {
    /// The built-in configuration.
    pub fn defaults() -> Self {
        Config {
            ignore_fields: DEFAULT_IGNORE_FIELDS.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Loads the configuration from `path`.
    ///
    /// No path, a missing file, or a file declaring no rules at all yields
    /// the defaults. Any other read or parse failure is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::defaults());
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::defaults());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses configuration text, falling back to the defaults when it
    /// declares no rules.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let blank = content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if blank {
            return Ok(Self::defaults());
        }

        // An explicit `~` or `null` document parses as None.
        let config: Option<Config> = serde_yaml::from_str(content)?;
        match config {
            Some(config) if !config.is_empty() => Ok(config),
            _ => Ok(Self::defaults()),
        }
    }

    /// Returns the first existing default config file: the home directory
    /// first, then the current directory.
    pub fn discover() -> Option<PathBuf> {
        dirs::home_dir()
            .into_iter()
            .chain(std::env::current_dir().ok())
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|p| p.is_file())
    }

    pub fn is_empty(&self) -> bool {
        self.ignore_fields.is_empty() && self.ignore_patterns.is_empty()
    }

    /// Compiles the configuration into a rule set.
    pub fn rules(&self) -> Result<RuleSet, ConfigError> {
        RuleSet::new(
            self.ignore_fields.iter().cloned(),
            self.ignore_patterns.iter().cloned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("gcdiff.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        for field in ["id", "selfLink", "creationTimestamp", "fingerprint"] {
            assert!(config.ignore_fields.iter().any(|f| f == field), "missing {}", field);
        }
        assert_eq!(config.ignore_patterns, vec![".*Timestamp$", ".*Fingerprint$"]);
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(Config::load(None).unwrap(), Config::defaults());
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config::load(Some(Path::new("/path/that/does/not/exist.yaml"))).unwrap();
        assert_eq!(config, Config::defaults());
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "ignore_fields:\n  - customField1\n  - customField2\nignore_patterns:\n  - \".*Custom$\"\n",
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ignore_fields, vec!["customField1", "customField2"]);
        assert_eq!(config.ignore_patterns, vec![".*Custom$"]);

        let rules = config.rules().unwrap();
        assert!(rules.should_ignore("customField1"));
        assert!(rules.should_ignore("spec.someCustom"));
        assert!(!rules.should_ignore("id"));
    }

    #[test]
    fn test_load_fields_only() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "ignore_fields: [labels]\n");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ignore_fields, vec!["labels"]);
        assert!(config.ignore_patterns.is_empty());
    }

    #[test]
    fn test_load_empty_lists_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "ignore_fields: []\nignore_patterns: []\n");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::defaults());
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::defaults());

        let path = write_config(&dir, "# nothing configured yet\n");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::defaults());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "ignore_fields: [unterminated\n");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_wrong_shape_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "ignore_fields: id\n");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_surfaces_from_rules() {
        let config = Config {
            ignore_fields: vec![],
            ignore_patterns: vec!["[".to_string()],
        };
        assert!(matches!(config.rules(), Err(ConfigError::Pattern { .. })));
    }
}
