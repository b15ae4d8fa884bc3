//! Raw cursor telemetry as written by the recorder.
//!
//! The recorder persists a versioned JSON document next to the screen
//! recording. Event coordinates are in capture-device space: bottom-left
//! origin, offset by the capture origin on the display.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2D, Size2D};

/// Newest telemetry format version this crate understands.
pub const CURSOR_METADATA_VERSION: u32 = 1;

/// Kind of a raw cursor event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorEventType {
    Move,
    Click,
    Release,
    Scroll,
    KeyDown,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Other,
}

/// A single raw event from the recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorEvent {
    /// Seconds since recording start.
    pub timestamp: f64,

    /// Capture-device X.
    pub x: f64,

    /// Capture-device Y (bottom-left origin).
    pub y: f64,

    #[serde(rename = "type")]
    pub event_type: CursorEventType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<MouseButton>,
}

impl CursorEvent {
    pub fn new(timestamp: f64, x: f64, y: f64, event_type: CursorEventType) -> Self {
        Self {
            timestamp,
            x,
            y,
            event_type,
            button: None,
        }
    }

    pub fn moved(timestamp: f64, x: f64, y: f64) -> Self {
        Self::new(timestamp, x, y, CursorEventType::Move)
    }

    pub fn click(timestamp: f64, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            button: Some(button),
            ..Self::new(timestamp, x, y, CursorEventType::Click)
        }
    }

    pub fn key_down(timestamp: f64, x: f64, y: f64) -> Self {
        Self::new(timestamp, x, y, CursorEventType::KeyDown)
    }

    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.x.is_finite() && self.y.is_finite()
    }
}

/// Decoded recorder telemetry for one recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorMetadata {
    /// Format version for forward compatibility.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Recording frame rate.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Captured source size in pixels.
    pub source_size: Size2D,

    /// Top-left of the capture region on the display. Defaults to `(0, 0)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_origin: Option<Point2D>,

    /// Full display height. Defaults to `source_height + capture_origin.y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_height: Option<f64>,

    /// Display backing scale factor. Defaults to `1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_scale_factor: Option<f64>,

    #[serde(default)]
    pub events: Vec<CursorEvent>,
}

fn default_version() -> u32 {
    CURSOR_METADATA_VERSION
}

fn default_frame_rate() -> u32 {
    60
}

/// Errors decoding recorder telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to parse cursor metadata: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported cursor metadata version {found} (newest supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl CursorMetadata {
    pub fn new(source_size: Size2D, events: Vec<CursorEvent>) -> Self {
        Self {
            version: CURSOR_METADATA_VERSION,
            frame_rate: default_frame_rate(),
            source_size,
            capture_origin: None,
            display_height: None,
            backing_scale_factor: None,
            events,
        }
    }

    /// Decode and version-check a telemetry document.
    pub fn from_json(json: &str) -> Result<Self, TelemetryError> {
        let metadata: CursorMetadata = serde_json::from_str(json)?;
        if metadata.version > CURSOR_METADATA_VERSION {
            return Err(TelemetryError::UnsupportedVersion {
                found: metadata.version,
                supported: CURSOR_METADATA_VERSION,
            });
        }
        Ok(metadata)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn capture_origin_or_default(&self) -> Point2D {
        self.capture_origin.unwrap_or(Point2D::ZERO)
    }

    /// Display height used to flip Y into a top-left origin.
    pub fn effective_display_height(&self) -> f64 {
        self.display_height
            .filter(|h| h.is_finite())
            .unwrap_or(self.source_size.height + self.capture_origin_or_default().y)
    }

    pub fn effective_backing_scale(&self) -> f64 {
        self.backing_scale_factor
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(1.0)
    }
}
