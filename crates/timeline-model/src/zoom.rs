//! Zoom regions and the keyframes they expand into.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// A time range (source seconds) during which the output is magnified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRegion {
    pub start_time: f64,
    pub end_time: f64,

    /// Magnification, `>= 1.0`.
    pub zoom_level: f64,

    /// Focus point in overlay space.
    pub focus_x: f64,
    pub focus_y: f64,

    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ZoomRegion {
    pub fn new(start_time: f64, end_time: f64, zoom_level: f64, focus: Point2D) -> Self {
        Self {
            start_time,
            end_time,
            zoom_level: zoom_level.max(1.0),
            focus_x: focus.x,
            focus_y: focus.y,
            is_enabled: true,
        }
    }

    pub fn focus(&self) -> Point2D {
        Point2D::new(self.focus_x, self.focus_y)
    }

    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }
}

/// A point on the zoom curve.
///
/// `easing_duration` is the length of the eased transition that *arrives*
/// at this keyframe; zero means the value is reached instantly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomKeyframe {
    pub timestamp: f64,
    pub zoom_level: f64,
    pub focus_point: Point2D,
    pub easing_duration: f64,
}

impl ZoomKeyframe {
    pub fn new(timestamp: f64, zoom_level: f64, focus_point: Point2D, easing_duration: f64) -> Self {
        Self {
            timestamp,
            zoom_level,
            focus_point,
            easing_duration,
        }
    }
}

/// How eagerly interaction bursts become zoom regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomSensitivity {
    /// Few, short zooms that only follow busy bursts.
    Subtle,
    #[default]
    Balanced,
    /// Many interactions merge into fewer, longer zooms.
    Dramatic,
}

impl ZoomSensitivity {
    /// Maximum gap between interactions of one burst (seconds).
    pub fn merge_gap_secs(&self) -> f64 {
        match self {
            ZoomSensitivity::Subtle => 1.0,
            ZoomSensitivity::Balanced => 1.5,
            ZoomSensitivity::Dramatic => 2.5,
        }
    }

    /// Interactions a burst needs before it earns a zoom region.
    pub fn min_interactions(&self) -> usize {
        match self {
            ZoomSensitivity::Subtle => 3,
            ZoomSensitivity::Balanced => 2,
            ZoomSensitivity::Dramatic => 1,
        }
    }

    /// Length of the zoom-in transition (seconds).
    pub fn zoom_in_secs(&self) -> f64 {
        match self {
            ZoomSensitivity::Subtle => 0.7,
            ZoomSensitivity::Balanced => 0.5,
            ZoomSensitivity::Dramatic => 0.35,
        }
    }

    /// Length of the zoom-out transition (seconds).
    pub fn zoom_out_secs(&self) -> f64 {
        match self {
            ZoomSensitivity::Subtle => 1.0,
            ZoomSensitivity::Balanced => 0.8,
            ZoomSensitivity::Dramatic => 0.6,
        }
    }

    /// Padding added before the first interaction of a burst.
    pub fn lead_in_secs(&self) -> f64 {
        0.3
    }

    /// Padding added after the last interaction of a burst.
    pub fn hold_out_secs(&self) -> f64 {
        match self {
            ZoomSensitivity::Subtle => 0.8,
            ZoomSensitivity::Balanced => 1.0,
            ZoomSensitivity::Dramatic => 1.5,
        }
    }
}

impl std::str::FromStr for ZoomSensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "subtle" => Ok(ZoomSensitivity::Subtle),
            "balanced" => Ok(ZoomSensitivity::Balanced),
            "dramatic" => Ok(ZoomSensitivity::Dramatic),
            other => Err(format!(
                "unknown zoom sensitivity '{other}' (expected subtle|balanced|dramatic)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitivity_ordering() {
        let levels = [
            ZoomSensitivity::Subtle,
            ZoomSensitivity::Balanced,
            ZoomSensitivity::Dramatic,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].merge_gap_secs() < pair[1].merge_gap_secs());
            assert!(pair[0].min_interactions() > pair[1].min_interactions());
        }
        assert_eq!(ZoomSensitivity::Balanced.zoom_in_secs(), 0.5);
        assert_eq!(ZoomSensitivity::Balanced.zoom_out_secs(), 0.8);
    }

    #[test]
    fn test_sensitivity_from_str() {
        assert_eq!("Dramatic".parse::<ZoomSensitivity>(), Ok(ZoomSensitivity::Dramatic));
        assert!("wild".parse::<ZoomSensitivity>().is_err());
    }

    #[test]
    fn test_region_zoom_never_below_one() {
        let region = ZoomRegion::new(1.0, 3.0, 0.5, Point2D::new(10.0, 10.0));
        assert_eq!(region.zoom_level, 1.0);
        assert_eq!(region.duration(), 2.0);
    }
}
