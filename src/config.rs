use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MetricsError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source discovery and parsing configuration
    pub parsing: ParsingConfig,

    /// Report output settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Languages to support
    pub languages: Vec<String>,

    /// Honour .gitignore / .ignore files while walking
    pub respect_gitignore: bool,

    /// Follow symbolic links while walking
    pub follow_links: bool,

    /// Classify nested member types as well as top-level ones
    pub include_nested_types: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Counter lines, role listings and the endpoint table
    #[default]
    Text,
    /// The whole report as pretty-printed JSON
    Json,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            languages: vec!["java".to_string()],
            respect_gitignore: false,
            follow_links: false,
            include_nested_types: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MetricsError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Err(MetricsError::Config(format!(
                        "config file {} does not exist",
                        p.as_ref().display()
                    )))
                }
            }
            None => {
                let candidates = ["archmetrics.toml", ".archmetrics.toml"];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_scan_java_only() {
        let config = Config::default();
        assert_eq!(config.parsing.languages, vec!["java".to_string()]);
        assert!(!config.parsing.respect_gitignore);
        assert!(!config.parsing.include_nested_types);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.parsing.languages, vec!["java".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parsing\nlanguages = 3").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, MetricsError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load_or_default(Some(&missing)).is_err());
    }
}
