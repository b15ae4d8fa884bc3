//! Zoom crop and cursor placement at a query time.
//!
//! All query times are in the overlay's own domain: source time for a
//! preview overlay, composition time for an exported one.

use cutframe_processing_core::cursor_smooth::CursorSmoother;
use cutframe_timeline_model::easing::{lerp, smoothstep};
use cutframe_timeline_model::geometry::{Point2D, Rect, Size2D};
use cutframe_timeline_model::overlay::CursorOverlayState;
use cutframe_timeline_model::zoom::ZoomKeyframe;

/// Zoom levels this close to 1.0 render the full frame.
const FULL_FRAME_EPSILON: f64 = 1e-3;

/// Easing durations at or below this are instant cuts.
const INSTANT_EPSILON: f64 = 1e-6;

/// Zoom level and focus point on the keyframe curve at `t`.
///
/// Before the first keyframe the first one holds, after the last the last
/// one holds. Returns `None` when there are no keyframes.
pub fn zoom_at(keyframes: &[ZoomKeyframe], t: f64) -> Option<(f64, Point2D)> {
    let first = keyframes.first()?;
    let last = keyframes.last()?;

    let idx = keyframes.partition_point(|k| k.timestamp <= t);
    if idx == 0 {
        return Some((first.zoom_level, first.focus_point));
    }
    if idx >= keyframes.len() {
        return Some((last.zoom_level, last.focus_point));
    }

    let prev = keyframes[idx - 1];
    let next = keyframes[idx];

    if !(next.easing_duration > INSTANT_EPSILON) {
        return Some((next.zoom_level, next.focus_point));
    }

    let u = ((t - prev.timestamp) / next.easing_duration).clamp(0.0, 1.0);
    let eased = smoothstep(u);
    Some((
        lerp(prev.zoom_level, next.zoom_level, eased),
        Point2D::lerp(&prev.focus_point, &next.focus_point, eased),
    ))
}

/// Crop rectangle of `source_extent` to show at `t`, or `None` for the
/// full frame.
///
/// The crop is `source_extent.size / zoom` centered on the focus point and
/// shifted (never resized) to lie inside `source_extent`.
pub fn zoom_crop_rect(state: &CursorOverlayState, t: f64, source_extent: Rect) -> Option<Rect> {
    if source_extent.size().is_empty() {
        return None;
    }

    let (zoom, focus) = zoom_at(&state.zoom_keyframes, t)?;
    if !zoom.is_finite() || zoom - 1.0 <= FULL_FRAME_EPSILON {
        return None;
    }

    let focus = if focus.is_finite() {
        focus
    } else {
        source_extent.center()
    };

    let crop = Rect::centered(focus, source_extent.size().scaled_down(zoom));
    Some(crop.shifted_inside(&source_extent))
}

/// Interpolated cursor position (overlay space) at `t`.
pub fn cursor_position_at(state: &CursorOverlayState, t: f64) -> Option<Point2D> {
    CursorSmoother::position_at(&state.smoothed_points, t)
}

/// Cursor position in output pixels at `t`.
///
/// Maps the overlay-space position through the active crop (or the full
/// source extent) into an output of `output_size`.
pub fn cursor_screen_position(
    state: &CursorOverlayState,
    t: f64,
    source_extent: Rect,
    output_size: Size2D,
) -> Option<Point2D> {
    let position = cursor_position_at(state, t)?;
    let view = zoom_crop_rect(state, t, source_extent).unwrap_or(source_extent);
    project_to_output(position, &view, output_size)
}

/// Map a point inside `view` into an output of `output_size`.
pub(crate) fn project_to_output(point: Point2D, view: &Rect, output_size: Size2D) -> Option<Point2D> {
    if view.size().is_empty() || output_size.is_empty() {
        return None;
    }
    Some(Point2D::new(
        (point.x - view.x) * output_size.width / view.width,
        (point.y - view.y) * output_size.height / view.height,
    ))
}
