//! Application configuration and theme preference.
//!
//! T010: Implement Config loading from TOML
//! T014: Detect system theme when no preference is stored

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Stored string form (`light` / `dark`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Detect the system theme; used when no preference is stored yet.
    pub fn from_system() -> Theme {
        match dark_light::detect() {
            dark_light::Mode::Dark => Theme::Dark,
            dark_light::Mode::Light | dark_light::Mode::Default => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Map-surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSettings {
    /// Tile layer to show (`osm`, `carto`, `satellite`)
    pub tile_layer: String,
    /// Routing service endpoint the surface uses to compute paths
    pub router_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tile_layer: "osm".to_string(),
            router_url: "https://router.project-osrm.org/route/v1".to_string(),
        }
    }
}

/// Editor behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Line color for routes whose definition carries none
    pub default_color: String,
    /// Path line weight in pixels
    pub line_weight: u32,
    /// Press-and-hold duration before a marker delete fires, in milliseconds
    pub hold_ms: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_color: "blue".to_string(),
            line_weight: 5,
            hold_ms: 300,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Map-surface settings
    pub map: MapSettings,
    /// Editor settings
    pub editor: EditorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            map: MapSettings::default(),
            editor: EditorSettings::default(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "routesketch", "RouteSketch")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Get the route database path.
pub fn get_store_path() -> PathBuf {
    get_data_dir().join("routes.db")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.editor.default_color, "blue");
        assert_eq!(config.editor.line_weight, 5);
        assert_eq!(config.editor.hold_ms, 300);
        assert_eq!(config.map.tile_layer, "osm");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.editor.default_color = "crimson".to_string();
        config.editor.hold_ms = 450;
        let toml_text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&toml_text).unwrap();
        assert_eq!(back.editor.default_color, "crimson");
        assert_eq!(back.editor.hold_ms, 450);
        assert_eq!(back.map.router_url, config.map.router_url);
    }

    #[test]
    fn test_theme_parse_and_display() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("solarized".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
