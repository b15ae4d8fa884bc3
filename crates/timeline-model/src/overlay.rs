//! The aggregate cursor/zoom overlay handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::cursor::{CursorClick, CursorSettings, SmoothedCursorPoint};
use crate::geometry::{Point2D, Size2D};
use crate::zoom::ZoomKeyframe;

/// Which timeline the overlay timestamps are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayDomain {
    /// Source-recording time, used while editing.
    Preview,
    /// Composition time of the edited output, used for export.
    Export,
}

/// Opaque reference to the cursor image the renderer should draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorImageHandle(pub String);

/// Everything the renderer needs to draw the cursor and zoom for a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorOverlayState {
    pub domain: OverlayDomain,

    /// Strictly increasing timestamps.
    pub smoothed_points: Vec<SmoothedCursorPoint>,

    pub clicks: Vec<CursorClick>,

    pub cursor_image: Option<CursorImageHandle>,

    /// Hotspot within the cursor image, in output pixels.
    pub cursor_hotspot: Point2D,

    pub source_size: Size2D,

    pub capture_origin: Point2D,

    pub settings: CursorSettings,

    /// Sorted ascending by timestamp.
    pub zoom_keyframes: Vec<ZoomKeyframe>,
}

impl CursorOverlayState {
    pub fn is_export(&self) -> bool {
        self.domain == OverlayDomain::Export
    }

    /// Latest timestamp carried by any overlay item, or `0.0` when empty.
    pub fn last_timestamp(&self) -> f64 {
        self.smoothed_points
            .iter()
            .map(|p| p.timestamp)
            .chain(self.clicks.iter().map(|c| c.timestamp))
            .chain(self.zoom_keyframes.iter().map(|k| k.timestamp))
            .fold(0.0, f64::max)
    }

    /// Whether `smoothed_points` has strictly increasing timestamps.
    pub fn points_are_ordered(&self) -> bool {
        self.smoothed_points
            .windows(2)
            .all(|w| w[1].timestamp > w[0].timestamp)
    }
}
