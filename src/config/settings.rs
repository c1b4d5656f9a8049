//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::gost::sheet::Margins;
use crate::layout::LayoutMetrics;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Directory scheme plan files are written into.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Layout metric overrides.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }

    /// Returns the configured layout metrics.
    #[must_use]
    pub const fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            box_width: self.layout.box_width,
            box_height: self.layout.box_height,
            horizontal_spacing: self.layout.horizontal_spacing,
            vertical_spacing: self.layout.vertical_spacing,
            level_spacing: self.layout.level_spacing,
        }
    }

    /// Returns the configured sheet margins.
    #[must_use]
    pub const fn margins(&self) -> Margins {
        Margins::uniform(self.layout.margin)
    }
}

/// Layout metric configuration, all in millimetres.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Width of every component box.
    #[serde(default = "default_box_width")]
    pub box_width: f64,

    /// Height of every component box.
    #[serde(default = "default_box_height")]
    pub box_height: f64,

    /// Gap between sibling boxes and subtrees.
    #[serde(default = "default_horizontal_spacing")]
    pub horizontal_spacing: f64,

    /// Gap between stacked boxes in the vertical strategy.
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f64,

    /// Row pitch per hierarchy level in the tree strategy.
    #[serde(default = "default_level_spacing")]
    pub level_spacing: f64,

    /// Uniform sheet margin reserved for the frame and title block.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl LayoutConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("box_width", self.box_width),
            ("box_height", self.box_height),
            ("level_spacing", self.level_spacing),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::invalid(format!(
                    "layout.{name} {value} must be positive"
                )));
            }
        }
        for (name, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("margin", self.margin),
        ] {
            if value < 0.0 {
                return Err(ConfigError::invalid(format!(
                    "layout.{name} {value} must not be negative"
                )));
            }
        }
        // The narrowest supported sheet side is portrait A4 at 210 mm.
        if self.margin * 2.0 >= 210.0 {
            return Err(ConfigError::invalid(format!(
                "layout.margin {} leaves no usable area on an A4 sheet",
                self.margin
            )));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: default_box_width(),
            box_height: default_box_height(),
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
            level_spacing: default_level_spacing(),
            margin: default_margin(),
        }
    }
}

fn default_box_width() -> f64 {
    LayoutMetrics::DEFAULT.box_width
}

fn default_box_height() -> f64 {
    LayoutMetrics::DEFAULT.box_height
}

fn default_horizontal_spacing() -> f64 {
    LayoutMetrics::DEFAULT.horizontal_spacing
}

fn default_vertical_spacing() -> f64 {
    LayoutMetrics::DEFAULT.vertical_spacing
}

fn default_level_spacing() -> f64 {
    LayoutMetrics::DEFAULT.level_spacing
}

fn default_margin() -> f64 {
    40.0
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
