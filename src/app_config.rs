use anyhow::{Context, Result};
use log::{debug, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::lyric_processor::FormatOptions;
use crate::time_tag::MAX_PARSEABLE_DECIMAL_PLACES;

/// Application configuration module
/// This module handles loading, validating and saving the settings used
/// when lyric files are rewritten.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// How lyric text is written back
    #[serde(default)]
    pub format: FormatOptions,

    /// Edits applied between parsing and formatting
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Processing options applied to each document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    // @field: Drop every time tag, keeping the text
    #[serde(default)]
    pub strip_tags: bool,

    // @field: Drop lines whose text is blank
    #[serde(default)]
    pub remove_empty: bool,

    // @field: Inserted between stem and extension of output files
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    // @field: Extension of lyric files
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            strip_tags: false,
            remove_empty: false,
            output_suffix: default_output_suffix(),
            extension: default_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log crate
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_output_suffix() -> String {
    "formatted".to_string()
}

fn default_extension() -> String {
    "lrc".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written tags must still parse as time tags
        if self.format.decimal_places > MAX_PARSEABLE_DECIMAL_PLACES {
            return Err(ConfigError::DecimalPlacesTooHigh {
                value: self.format.decimal_places,
                max: MAX_PARSEABLE_DECIMAL_PLACES,
            });
        }

        if self.format.line_ending.is_empty() {
            return Err(ConfigError::EmptyLineEnding);
        }

        if self.processing.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::EmptyExtension);
        }

        Ok(())
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the configuration if the file exists, otherwise use the defaults.
    /// Nothing is written.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        debug!("Config file not found at '{}', using defaults.", path.display());
        Ok(Config::default())
    }

    /// Load the configuration, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
