// File: src/config.rs
// Purpose: Pattern syntax and pool settings from a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pattern::Delimiters;
use crate::pool::PoolConfig;

/// Matcher configuration
///
/// ```toml
/// [syntax]
/// open = "<"
/// close = ">"
///
/// [pools]
/// max_tokens_capacity = 256
/// max_params_capacity = 16
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub syntax: SyntaxConfig,

    #[serde(default)]
    pub pools: PoolConfig,
}

/// Placeholder delimiters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyntaxConfig {
    /// Opens a placeholder (default: '{')
    #[serde(default = "default_open")]
    pub open: char,

    /// Closes a placeholder (default: '}')
    #[serde(default = "default_close")]
    pub close: char,
}

fn default_open() -> char {
    '{'
}

fn default_close() -> char {
    '}'
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from TOML text; blank text means defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = toml::from_str(content).context("Invalid pattern configuration")?;
        Ok(config)
    }

    pub fn delimiters(&self) -> Delimiters {
        Delimiters::new(self.syntax.open, self.syntax.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.delimiters(), Delimiters::default());
        assert_eq!(config.pools.max_tokens_capacity, 128);
        assert_eq!(config.pools.max_params_capacity, 32);
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::from_toml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let toml = r#"
            [syntax]
            open = "<"

            [pools]
            max_params_capacity = 8
        "#;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.delimiters(), Delimiters::new('<', '}'));
        assert_eq!(config.pools.max_tokens_capacity, 128);
        assert_eq!(config.pools.max_params_capacity, 8);
    }

    #[test]
    fn test_invalid_delimiter_is_an_error() {
        let toml = r#"
            [syntax]
            open = "<<"
        "#;
        assert!(Config::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config::load("definitely/not/here/pattern.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[syntax]\nopen = \"«\"\nclose = \"»\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.delimiters(), Delimiters::new('«', '»'));
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pools]\nmax_tokens_capacity = \"lots\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
