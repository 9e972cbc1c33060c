//! Indicator configuration — the user-facing parameters, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Floor for the recomputation interval.
pub const MIN_UPDATE_FREQUENCY_MS: u64 = 50;

/// Visual style of the stop-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
}

/// User-configurable indicator parameters.
///
/// Every field has a default, so an empty (or missing) config file is valid.
/// Out-of-range values are clamped by [`IndicatorConfig::validate`], never
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Recomputation interval in milliseconds (minimum 50).
    pub update_frequency_ms: u64,

    /// Named line color ("red", "yellow", "cyan", ...). Unknown names fall
    /// back to red at render time.
    pub line_color: String,

    /// Line width, 1-5.
    pub line_width: u8,

    /// Line style.
    pub line_style: LineStyle,

    /// Whether to draw the price label next to the line.
    pub show_label: bool,

    /// Text prepended to the formatted price in the label.
    pub label_prefix: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            update_frequency_ms: 100,
            line_color: "red".into(),
            line_width: 2,
            line_style: LineStyle::Solid,
            show_label: true,
            label_prefix: "STOP-OUT: ".into(),
        }
    }
}

impl IndicatorConfig {
    /// Clamp out-of-range values into their legal ranges.
    pub fn validate(mut self) -> Self {
        self.update_frequency_ms = self.update_frequency_ms.max(MIN_UPDATE_FREQUENCY_MS);
        self.line_width = self.line_width.clamp(1, 5);
        self
    }

    /// Load from a TOML file. A missing file yields defaults; unparseable
    /// content is an error. The result is always validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        let config: Self = toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })?;
        Ok(config.validate())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_parameters() {
        let config = IndicatorConfig::default();
        assert_eq!(config.update_frequency_ms, 100);
        assert_eq!(config.line_color, "red");
        assert_eq!(config.line_width, 2);
        assert_eq!(config.line_style, LineStyle::Solid);
        assert!(config.show_label);
        assert_eq!(config.label_prefix, "STOP-OUT: ");
    }

    #[test]
    fn validate_clamps_update_frequency() {
        let config =
            IndicatorConfig { update_frequency_ms: 10, ..IndicatorConfig::default() }.validate();
        assert_eq!(config.update_frequency_ms, MIN_UPDATE_FREQUENCY_MS);
    }

    #[test]
    fn validate_clamps_line_width() {
        let wide = IndicatorConfig { line_width: 9, ..IndicatorConfig::default() }.validate();
        assert_eq!(wide.line_width, 5);
        let thin = IndicatorConfig { line_width: 0, ..IndicatorConfig::default() }.validate();
        assert_eq!(thin.line_width, 1);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = IndicatorConfig::load(Path::new("/nonexistent/stopline.toml")).unwrap();
        assert_eq!(loaded, IndicatorConfig::default());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopline.toml");
        std::fs::write(&path, "line_color = \"yellow\"\nupdate_frequency_ms = 250\n").unwrap();

        let loaded = IndicatorConfig::load(&path).unwrap();
        assert_eq!(loaded.line_color, "yellow");
        assert_eq!(loaded.update_frequency_ms, 250);
        assert_eq!(loaded.line_width, 2); // default
    }

    #[test]
    fn loaded_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopline.toml");
        std::fs::write(&path, "update_frequency_ms = 5\nline_width = 12\n").unwrap();

        let loaded = IndicatorConfig::load(&path).unwrap();
        assert_eq!(loaded.update_frequency_ms, MIN_UPDATE_FREQUENCY_MS);
        assert_eq!(loaded.line_width, 5);
    }

    #[test]
    fn corrupt_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopline.toml");
        std::fs::write(&path, "not valid toml {{{").unwrap();
        assert!(IndicatorConfig::load(&path).is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = IndicatorConfig {
            line_style: LineStyle::Dash,
            label_prefix: "SO: ".into(),
            ..IndicatorConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        let back: IndicatorConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
