//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CutframeError, CutframeResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Defaults for the timeline and overlay algorithms.
    pub processing: ProcessingDefaults,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cutframe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

/// Tunables for remapping, smoothing, and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingDefaults {
    /// Frame rate used to resample cursor motion and plan output frames.
    pub output_frame_rate: u32,

    /// Half-width of a speed ramp around a segment boundary (seconds).
    pub half_ramp_secs: f64,

    /// Source-time step between remap table samples (seconds).
    pub ramp_sample_step_secs: f64,

    /// Maximum distance between an overlay timestamp and the nearest remap
    /// entry before the item is treated as cut out (seconds).
    pub export_match_tolerance_secs: f64,

    /// Number of synthetic cursor points inserted across each cut.
    pub bridge_point_count: usize,

    /// Source-time jump between adjacent remap entries that counts as a cut.
    pub bridge_jump_threshold_secs: f64,

    /// Zoom level used for generated zoom regions.
    pub zoom_level: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for ProcessingDefaults {
    fn default() -> Self {
        Self {
            output_frame_rate: 60,
            half_ramp_secs: 0.5,
            ramp_sample_step_secs: 1.0 / 60.0,
            export_match_tolerance_secs: 1.0,
            bridge_point_count: 12,
            bridge_jump_threshold_secs: 0.1,
            zoom_level: 2.0,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    ///
    /// A missing file is silent; an unreadable or malformed one is warned.
    pub fn load_from(config_path: &Path) -> Self {
        let (config, problem) = Self::read_from(config_path);
        if let Some(e) = problem {
            tracing::warn!(path = %config_path.display(), error = %e, "Invalid config, using defaults");
        }
        config
    }

    /// Read config from the standard location without logging.
    ///
    /// See [`AppConfig::read_from`].
    pub fn read() -> (Self, Option<CutframeError>) {
        Self::read_from(&config_file_path())
    }

    /// Read config from an explicit path without logging.
    ///
    /// Always yields a usable config. When the file exists but cannot be
    /// read or parsed the defaults come back together with the error, so
    /// the caller can report it once a subscriber is installed.
    pub fn read_from(config_path: &Path) -> (Self, Option<CutframeError>) {
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (Self::default(), None),
            Err(e) => return (Self::default(), Some(e.into())),
        };

        match serde_json::from_str(&content) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e.into())),
        }
    }

    /// Reject values the algorithms cannot work with.
    pub fn validate(&self) -> CutframeResult<()> {
        let p = &self.processing;
        if p.output_frame_rate == 0 {
            return Err(CutframeError::config("output_frame_rate must be positive"));
        }
        if !(p.ramp_sample_step_secs > 0.0) {
            return Err(CutframeError::config(format!(
                "ramp_sample_step_secs must be positive, got {}",
                p.ramp_sample_step_secs
            )));
        }
        for (name, value) in [
            ("half_ramp_secs", p.half_ramp_secs),
            ("export_match_tolerance_secs", p.export_match_tolerance_secs),
            ("bridge_jump_threshold_secs", p.bridge_jump_threshold_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CutframeError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(p.zoom_level >= 1.0) {
            return Err(CutframeError::config(format!(
                "zoom_level must be at least 1.0, got {}",
                p.zoom_level
            )));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location: `$XDG_CONFIG_HOME/cutframe/config.json`,
/// or `~/.config/cutframe/config.json`.
pub fn config_file_path() -> PathBuf {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join(".config"),
    };
    base.join("cutframe").join("config.json")
}
