//! Dashboard configuration file support.
//!
//! Settings are read from a TOML file. Every section and key is optional and
//! falls back to a built-in default.
//!
//! ```toml
//! [data]
//! source = "data/day.csv"
//!
//! [window]
//! width = 1280.0
//! height = 900.0
//!
//! [charts]
//! width = 900
//! height = 450
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Public copy of the daily bike-sharing dataset.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/prisca101/bike_analysis/main/dashboard/day.csv";

const APP_DIR: &str = "bikeshare-dashboard";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// CSV path or http(s) URL
    #[serde(default = "default_source")]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
}

/// Pixel size of each rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl ChartSettings {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    900.0
}

fn default_chart_width() -> u32 {
    900
}

fn default_chart_height() -> u32 {
    450
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

impl DashboardConfig {
    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `explicit` if given, else the per-user config file if it exists,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "using user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/bikeshare-dashboard/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.data.source, DEFAULT_SOURCE);
        assert_eq!(config.charts.size(), (900, 450));
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let file = write_config("[data]\nsource = \"data/day.csv\"\n\n[charts]\nwidth = 640\n");
        let config = DashboardConfig::from_file(file.path()).unwrap();

        assert_eq!(config.data.source, "data/day.csv");
        assert_eq!(config.charts.size(), (640, 450));
        assert_eq!(config.window, WindowSettings::default());
    }

    #[test]
    fn test_empty_file() {
        let file = write_config("");
        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let file = write_config("[charts]\nwidth = \"wide\"\n");
        assert!(matches!(
            DashboardConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file() {
        let result = DashboardConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
