//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clock::DEFAULT_ASSUMED_FRAME_RATE;
use crate::error::{VidcoordError, VidcoordResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Click capture and marker rendering settings.
    pub annotator: AnnotatorDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How recorded clicks are projected back into display space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerProjection {
    /// Scale each axis independently against the whole display box.
    #[default]
    Stretched,
    /// Place markers through the current letterboxed content rectangle.
    Letterboxed,
}

/// Click capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorDefaults {
    /// Frame rate used to estimate frame indices from playback time.
    pub assumed_frame_rate: f64,

    /// Use the display box size as intrinsic size when neither the media
    /// nor the host supplied one.
    pub allow_display_fallback: bool,

    /// Marker projection mode.
    pub projection: MarkerProjection,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "vidcoord_annotator=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AnnotatorDefaults {
    fn default() -> Self {
        Self {
            assumed_frame_rate: DEFAULT_ASSUMED_FRAME_RATE,
            allow_display_fallback: false,
            projection: MarkerProjection::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AnnotatorDefaults {
    /// Reject settings that would make frame estimation meaningless.
    pub fn validate(&self) -> VidcoordResult<()> {
        if !self.assumed_frame_rate.is_finite() || self.assumed_frame_rate <= 0.0 {
            return Err(VidcoordError::config(format!(
                "assumed_frame_rate must be a positive number, got {}",
                self.assumed_frame_rate
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &std::path::Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                    Ok(config) => match config.annotator.validate() {
                        Ok(()) => return config,
                        Err(e) => {
                            tracing::warn!("Ignoring invalid config at {:?}: {}", config_path, e);
                        }
                    },
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
    pub fn save(&self) -> VidcoordResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &std::path::Path) -> VidcoordResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("vidcoord").join("config.json")
}
