//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/daybook/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [files]
//! events = "events.txt"
//! output = "output.txt"
//!
//! [display]
//! time_format = "h24"
//! max_name_length = 30
//!
//! [logging]
//! format = "compact"   # or "pretty", "json"
//! ```
//!
//! Command-line flags override file values.

use std::path::{Path, PathBuf};

use daybook_core::tracing::{TracingConfig, TracingOutputFormat};
use daybook_core::{FormatOptions, TimeFormat};
use serde::{Deserialize, Serialize};

/// Configuration for the daybook client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Event file locations.
    #[serde(default)]
    pub files: FileSettings,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How diagnostics are written to stderr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub format: TracingOutputFormat,
}

/// Where events are loaded from and saved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// File read at startup.
    pub events: PathBuf,

    /// File written on quit.
    pub output: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            events: PathBuf::from("events.txt"),
            output: PathBuf::from("output.txt"),
        }
    }
}

/// Display settings for the menu views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// 24-hour or 12-hour clock.
    pub time_format: TimeFormat,

    /// Maximum event name length (truncated with ellipsis).
    pub max_name_length: Option<usize>,
}

impl DisplaySettings {
    /// Converts to renderer options.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            time_format: self.time_format,
            max_name_length: self.max_name_length,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Applies command-line overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        events: Option<PathBuf>,
        output: Option<PathBuf>,
        debug: bool,
    ) {
        if let Some(events) = events {
            self.files.events = events;
        }
        if let Some(output) = output {
            self.files.output = output;
        }
        self.debug |= debug;
    }

    /// Builds the tracing setup for this configuration.
    pub fn tracing_config(&self) -> TracingConfig {
        let base = if self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::default()
        };
        base.with_format(self.logging.format)
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.events.as_os_str().is_empty() {
            return Err("files.events must not be empty".to_string());
        }
        if self.files.output.as_os_str().is_empty() {
            return Err("files.output must not be empty".to_string());
        }
        if self.display.max_name_length == Some(0) {
            return Err("display.max_name_length must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook")
    }
}
