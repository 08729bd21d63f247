//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const OUTPUT: &str = "text";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn output() -> OutputFormat {
        OutputFormat::Text
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Release snapshot (YAML) describing the distribution
    #[arg(short, long, global = true, env = "DISTWALK_SNAPSHOT")]
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, global = true, env = "DISTWALK_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, global = true, env = "DISTWALK_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "DISTWALK_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, global = true, env = "DISTWALK_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Result format (text, json)
    #[arg(short, long, global = true, env = "DISTWALK_OUTPUT", default_value = defaults::OUTPUT)]
    #[serde(default = "default_fns::output")]
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            output: default_fns::output(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, resolving `auto` color against the log stream
    pub fn to_logger_config(&self) -> LoggerConfig {
        let color = match self.color {
            ColorIntent::Always => true,
            ColorIntent::Never => false,
            ColorIntent::Auto => match self.log_output {
                LogOutput::Stderr => std::io::stderr().is_terminal(),
                LogOutput::Stdout => std::io::stdout().is_terminal(),
            },
        };

        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.snapshot.is_some() {
            self.snapshot = other.snapshot;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }
        if !matches!(other.output, OutputFormat::Text) {
            self.output = other.output;
        }

        self
    }

    /// Snapshot path, required by every query command
    pub fn snapshot_path(&self) -> Result<&Path, ConfigError> {
        let path = self
            .snapshot
            .as_deref()
            .ok_or_else(|| ConfigError::ValidationFailed {
                reason: "no release snapshot given (use --snapshot or DISTWALK_SNAPSHOT)"
                    .to_string(),
            })?;

        if !path.is_file() {
            return Err(ConfigError::SnapshotNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(path)
    }

    /// Validate the final configuration
    pub fn validate(&self, needs_snapshot: bool) -> Result<(), ConfigError> {
        if needs_snapshot {
            self.snapshot_path()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
