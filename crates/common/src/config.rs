//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base directory; tile crops land in `<data_dir>/cameras/`.
    pub data_dir: PathBuf,

    /// Tile detection tuning.
    pub detection: DetectionConfig,

    /// Window lookup and screen capture settings.
    pub capture: CaptureConfig,

    /// Crop command relay settings.
    pub relay: RelayConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Tile detector parameters. Fixed for the lifetime of a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Keep every intermediate image (mask, edges, screenshots) on disk.
    pub debug: bool,

    /// Passes of 5x5 erosion applied to the separator mask.
    pub erosion_iterations: u32,

    /// Hysteresis low threshold for edge extraction.
    pub edge_low_threshold: f32,

    /// Hysteresis high threshold for edge extraction.
    pub edge_high_threshold: f32,

    /// Candidates at least `image_width - width_margin` wide are treated as
    /// the outer window border.
    pub width_margin: u32,

    /// Accepted tiles closer than this (in both x and y) to the previously
    /// accepted tile are duplicates.
    pub dedup_distance: u32,

    /// Pixels trimmed from every side of a tile before it is stored.
    pub tile_inset: u32,

    /// How far below the dominant area a candidate may fall and still count.
    pub area_tolerance: u64,
}

/// How a requested title is matched against visible windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    #[default]
    Exact,
    Prefix,
    Substring,
}

/// Screen capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Wait after foregrounding a window so the compositor can redraw it.
    pub settle_delay_ms: u64,

    /// Title match policy for window lookup.
    pub match_policy: MatchPolicy,
}

/// Where crop commands are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,

    /// Added to every vertical coordinate sent to the compositor.
    pub y_offset: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "callmap=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            detection: DetectionConfig::default(),
            capture: CaptureConfig::default(),
            relay: RelayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            debug: false,
            erosion_iterations: 0,
            edge_low_threshold: 30.0,
            edge_high_threshold: 200.0,
            width_margin: 150,
            dedup_distance: 1,
            tile_inset: 10,
            area_tolerance: 0,
        }
    }
}

impl DetectionConfig {
    /// Defaults with debug artifact retention switched on.
    pub fn debug() -> Self {
        Self {
            debug: true,
            ..Self::default()
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
            match_policy: MatchPolicy::Exact,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 48387,
            // wmctrl geometry excludes the title bar the compositor captures
            y_offset: if cfg!(target_os = "linux") { 40 } else { 0 },
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("callmap").join("config.json")
}

/// Default data directory.
fn default_data_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("callmap")
}
