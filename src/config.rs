//! Chart Configuration
//! Canvas layout, styling constants and column names, optionally read from JSON.

use crate::charts::{Canvas, Margin};
use crate::data::ColumnNames;
use crate::stats::quartiles::WHISKER_FACTOR;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Layout and style shared by both charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub point_radius: f64,
    /// Box fill as `#rrggbb`.
    pub box_fill: String,
    pub band_padding: f64,
    /// Added below the minimum and above the maximum of each numeric domain.
    pub domain_padding: f64,
    pub whisker_factor: f64,
    pub legend_row_height: f64,
    pub legend_swatch_size: f64,
    pub x_title: String,
    pub y_title: String,
    pub columns: ColumnNames,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
            margin: Margin {
                top: 30.0,
                right: 50.0,
                bottom: 60.0,
                left: 70.0,
            },
            point_radius: 5.0,
            box_fill: "#69b3a2".to_string(),
            band_padding: 0.1,
            domain_padding: 0.5,
            whisker_factor: WHISKER_FACTOR,
            legend_row_height: 25.0,
            legend_swatch_size: 18.0,
            x_title: "Petal Length".to_string(),
            y_title: "Petal Width".to_string(),
            columns: ColumnNames::default(),
        }
    }
}

impl ChartConfig {
    /// Read and validate a JSON config file. Missing keys take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: ChartConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = self.canvas();
        if !(canvas.plot_width() > 0.0 && canvas.plot_height() > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "margins leave no plotting area in a {}x{} canvas",
                self.width, self.height
            )));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ConfigError::Invalid(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        for (name, value) in [
            ("point_radius", self.point_radius),
            ("domain_padding", self.domain_padding),
            ("whisker_factor", self.whisker_factor),
            ("legend_row_height", self.legend_row_height),
            ("legend_swatch_size", self.legend_swatch_size),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        self.box_fill_color()?;
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
            margin: self.margin,
        }
    }

    pub fn box_fill_color(&self) -> Result<RGBColor, ConfigError> {
        parse_hex_color(&self.box_fill)
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(text: &str) -> Result<RGBColor, ConfigError> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    let invalid = || ConfigError::Invalid(format!("'{text}' is not a #rrggbb color"));
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_page_layout() {
        let config = ChartConfig::default();
        config.validate().unwrap();
        let canvas = config.canvas();
        assert_eq!(canvas.plot_width(), 580.0);
        assert_eq!(canvas.plot_height(), 410.0);
        assert_eq!(config.box_fill_color().unwrap(), RGBColor(0x69, 0xb3, 0xa2));
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ff7f0e").unwrap(), RGBColor(255, 127, 14));
        assert_eq!(parse_hex_color("000000").unwrap(), RGBColor(0, 0, 0));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "width": 800, "columns": {{ "label": "Class" }} }}"#
        )
        .unwrap();
        let config = ChartConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 500.0);
        assert_eq!(config.columns.label, "Class");
        assert_eq!(config.columns.length, "PetalLength");
    }

    #[test]
    fn rejects_bad_layout() {
        let config = ChartConfig {
            width: 100.0,
            ..ChartConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ChartConfig {
            band_padding: 1.0,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ChartConfig {
            box_fill: "teal".into(),
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
