//! Cursor overlay types and user-facing cursor settings.

use serde::{Deserialize, Serialize};

use crate::event::MouseButton;
use crate::geometry::Point2D;
use crate::zoom::ZoomSensitivity;

/// Base edge length of the synthetic cursor styles, in pixels at size 1.0.
pub const CURSOR_BASE_SIZE: f64 = 24.0;

/// A raw cursor position in overlay space, before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSample {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
}

impl CursorSample {
    pub fn new(timestamp: f64, x: f64, y: f64) -> Self {
        Self { timestamp, x, y }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.x.is_finite() && self.y.is_finite()
    }
}

impl From<CursorSample> for SmoothedCursorPoint {
    fn from(sample: CursorSample) -> Self {
        SmoothedCursorPoint::new(sample.timestamp, sample.x, sample.y)
    }
}

/// A resampled cursor position in overlay space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedCursorPoint {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
}

impl SmoothedCursorPoint {
    pub fn new(timestamp: f64, x: f64, y: f64) -> Self {
        Self { timestamp, x, y }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// A mouse click in overlay space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorClick {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    pub button: MouseButton,
}

impl CursorClick {
    pub fn new(timestamp: f64, x: f64, y: f64, button: MouseButton) -> Self {
        Self {
            timestamp,
            x,
            y,
            button,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Cursor position sampled at a key press, used for zoom clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyInteraction {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
}

impl KeyInteraction {
    pub fn new(timestamp: f64, x: f64, y: f64) -> Self {
        Self { timestamp, x, y }
    }
}

/// Platform cursor shapes that can be re-rendered over the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemCursor {
    Arrow,
    Pointer,
    Crosshair,
}

impl SystemCursor {
    /// Hotspot the platform reports for this shape at 1x, in pixels.
    pub fn platform_hotspot(&self) -> Point2D {
        match self {
            SystemCursor::Arrow => Point2D::new(4.0, 4.0),
            SystemCursor::Pointer => Point2D::new(7.0, 1.0),
            SystemCursor::Crosshair => Point2D::new(8.0, 8.0),
        }
    }
}

/// How the cursor is drawn in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shape", rename_all = "snake_case")]
pub enum CursorStyle {
    /// Synthetic filled circle with a centre dot.
    CircleDot,
    /// A platform cursor image.
    System(SystemCursor),
}

impl Default for CursorStyle {
    fn default() -> Self {
        CursorStyle::System(SystemCursor::Arrow)
    }
}

/// Visual style of the click effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickEffectStyle {
    None,
    /// Filled circle that expands and fades.
    #[default]
    Ripple,
    /// Outline ring that expands and fades.
    Ring,
}

/// Click effect parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickEffect {
    pub style: ClickEffectStyle,

    /// Animation length in seconds.
    pub duration_secs: f64,

    /// Radius at the end of the animation, in source pixels.
    pub max_radius: f64,

    /// Effect color as hex string (for example `#ffffff`).
    pub color: String,

    /// Opacity at the start of the animation `[0.0, 1.0]`.
    pub opacity: f64,
}

impl Default for ClickEffect {
    fn default() -> Self {
        Self {
            style: ClickEffectStyle::Ripple,
            duration_secs: 0.4,
            max_radius: 28.0,
            color: "#ffffff".to_string(),
            opacity: 0.6,
        }
    }
}

/// Auto-zoom controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoZoomSettings {
    pub enabled: bool,
    pub zoom_level: f64,
    pub sensitivity: ZoomSensitivity,
}

impl Default for AutoZoomSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            zoom_level: 2.0,
            sensitivity: ZoomSensitivity::Balanced,
        }
    }
}

/// Cursor overlay settings supplied by the editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    pub style: CursorStyle,

    /// Size multiplier applied to the cursor image.
    pub size: f64,

    pub click_effect: ClickEffect,

    pub auto_zoom: AutoZoomSettings,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            style: CursorStyle::default(),
            size: 1.0,
            click_effect: ClickEffect::default(),
            auto_zoom: AutoZoomSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_style_json_shape() {
        let json = serde_json::to_string(&CursorStyle::System(SystemCursor::Pointer)).unwrap();
        assert_eq!(json, r#"{"kind":"system","shape":"pointer"}"#);

        let parsed: CursorStyle = serde_json::from_str(r#"{"kind":"circle_dot"}"#).unwrap();
        assert_eq!(parsed, CursorStyle::CircleDot);
    }

    #[test]
    fn test_settings_partial_json_fills_defaults() {
        let parsed: CursorSettings =
            serde_json::from_str(r#"{"size": 1.5, "auto_zoom": {"enabled": false}}"#).unwrap();
        assert_eq!(parsed.size, 1.5);
        assert!(!parsed.auto_zoom.enabled);
        assert_eq!(parsed.auto_zoom.zoom_level, 2.0);
        assert_eq!(parsed.click_effect.style, ClickEffectStyle::Ripple);
    }
}
