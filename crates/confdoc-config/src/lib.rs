//! Configuration loading for confdoc.
//! Reads confdoc.toml from the current directory or the path in the CONFDOC_CONFIG env var.
//! Every section is optional; an absent file means defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use confdoc_common::{ConfdocError, Result};
use confdoc_metrics::MetricsSettings;

pub const CONFIG_ENV_VAR: &str = "CONFDOC_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "confdoc.toml";
/// Log filter used when neither `RUST_LOG` nor `[logging] filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "confdoc=info,warn";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Accept input wrapped in a markdown code fence.
    #[serde(default = "bool_true")]
    pub strip_markdown_fence: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { strip_markdown_fence: bool_true() }
    }
}

fn bool_true() -> bool { true }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfdocError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfdocError::Config(format!(
                "unknown output format `{}` (expected markdown or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

fn default_log_filter() -> String { DEFAULT_LOG_FILTER.to_string() }


impl Config {
    /// Load configuration from confdoc.toml.
    /// Checks CONFDOC_CONFIG env var first, then current directory.
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_path(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_path(DEFAULT_CONFIG_FILE),
            Err(_) => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfdocError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check metric constants: positive divisors and weights summing to 1.0.
    pub fn validate(&self) -> Result<()> {
        let m = &self.metrics;
        let divisors = [
            ("words_per_minute", m.words_per_minute),
            ("word_count_scale", m.word_count_scale),
            ("sentence_length_scale", m.sentence_length_scale),
            ("abstract_ratio_scale", m.abstract_ratio_scale),
        ];
        for (name, value) in divisors {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfdocError::Config(format!(
                    "metrics.{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !m.weights.validate() {
            return Err(ConfdocError::Config(format!(
                "metrics.weights must be non-negative and sum to 1.0, got {:?}",
                m.weights.as_array()
            )));
        }
        Ok(())
    }
}
