use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::SplitError;
use crate::numbering::{NumberingScheme, MAX_NUMBERING_INCREMENT, MAX_NUMBERING_WIDTH};
use crate::sanitizer::Delimiter;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Flat master document
    #[serde(default = "default_master_file")]
    pub master_file: String,

    /// Root directory of the split tree
    #[serde(default = "default_split_dir")]
    pub split_dir: String,

    /// Marker characters
    #[serde(default)]
    pub markers: MarkerConfig,

    /// On-disk naming of the split tree
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Reject orphan scene/beat markers instead of dropping them
    #[serde(default)]
    pub strict: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Line prefixes recognised in the master document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarkerConfig {
    // @field: Act marker, doubled for scenes
    #[serde(default = "default_act_marker")]
    pub act: char,

    // @field: Beat marker
    #[serde(default = "default_beat_marker")]
    pub beat: char,

    // @field: Opening sequence of the trailing comment line
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl MarkerConfig {
    // @returns: Scene marker (act marker twice)
    pub fn scene_marker(&self) -> String {
        let mut marker = String::with_capacity(2);
        marker.push(self.act);
        marker.push(self.act);
        marker
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            act: default_act_marker(),
            beat: default_beat_marker(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

/// Directory and file naming of the split tree
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Beat file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Separator between words (and after the numeric prefix)
    #[serde(default)]
    pub delimiter: Delimiter,

    /// Numeric prefix scheme
    #[serde(default)]
    pub numbering: NumberingScheme,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            delimiter: Delimiter::default(),
            numbering: NumberingScheme::default(),
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

fn default_master_file() -> String {
    "master.fountain".to_string()
}

fn default_split_dir() -> String {
    "split_files".to_string()
}

fn default_act_marker() -> char {
    '#'
}

fn default_beat_marker() -> char {
    '.'
}

fn default_comment_prefix() -> String {
    "/*".to_string()
}

fn default_extension() -> String {
    "fountain".to_string()
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), SplitError> {
        let invalid = |message: String| Err(SplitError::InvalidConfig(message));

        let markers = &self.markers;
        if markers.act.is_whitespace() || markers.beat.is_whitespace() {
            return invalid("Marker characters must not be whitespace".to_string());
        }

        if markers.act == markers.beat {
            return invalid(format!(
                "Act and beat markers must differ (both are '{}')",
                markers.act
            ));
        }

        if markers.comment_prefix.trim().is_empty() {
            return invalid("Comment prefix must not be empty".to_string());
        }

        let extension = &self.layout.extension;
        if extension.is_empty()
            || extension.contains('.')
            || extension.contains('/')
            || extension.contains('\\')
        {
            return invalid(format!("Invalid beat file extension: {:?}", extension));
        }

        let numbering = &self.layout.numbering;
        if numbering.width == 0 || numbering.width > MAX_NUMBERING_WIDTH {
            return invalid(format!(
                "Numbering width must be between 1 and {}",
                MAX_NUMBERING_WIDTH
            ));
        }
        if numbering.increment == 0 || numbering.increment > MAX_NUMBERING_INCREMENT {
            return invalid(format!(
                "Numbering increment must be between 1 and {}",
                MAX_NUMBERING_INCREMENT
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            master_file: default_master_file(),
            split_dir: default_split_dir(),
            markers: MarkerConfig::default(),
            layout: LayoutConfig::default(),
            strict: false,
            log_level: LogLevel::default(),
        }
    }
}
