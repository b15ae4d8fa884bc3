//! Frame plan: per-frame geometry for the export compositor.
//!
//! For each output frame the plan says which source instant to decode,
//! which part of it to crop, where to draw the cursor and which click
//! effects are animating.

use serde::{Deserialize, Serialize};

use cutframe_common::clock::FrameClock;
use cutframe_common::error::{CutframeError, CutframeResult};
use cutframe_timeline_model::geometry::{Rect, Size2D};
use cutframe_timeline_model::overlay::CursorOverlayState;
use cutframe_timeline_model::segment::TimeRemapTable;

use crate::click_effects::{active_click_effects, ActiveClickEffect};
use crate::geometry::{cursor_position_at, project_to_output, zoom_crop_rect};

/// Output parameters for [`plan_frames`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlanRequest {
    /// Output frame size in pixels.
    pub output_size: Size2D,

    /// Output frame rate.
    pub fps: u32,

    /// Region of the source frame that overlay coordinates refer to.
    pub source_extent: Rect,
}

impl FramePlanRequest {
    /// Request covering the whole source frame.
    pub fn new(output_size: Size2D, fps: u32, source_size: Size2D) -> Self {
        Self {
            output_size,
            fps,
            source_extent: Rect::from_size(source_size),
        }
    }
}

/// A single frame's composition instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGeometry {
    /// Frame number.
    pub frame_index: u64,

    /// Output (composition) time in seconds.
    pub time_secs: f64,

    /// Source time to decode for this frame.
    pub source_time_secs: f64,

    /// Crop of the source frame, `None` for the full frame.
    pub crop: Option<Rect>,

    /// Cursor position in output coordinates.
    pub cursor: Option<CursorOverlay>,

    /// Click effects in output coordinates.
    pub click_effects: Vec<ActiveClickEffect>,
}

/// Cursor rendering instruction for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorOverlay {
    /// X position of the hotspot in output pixel coordinates.
    pub x: f64,
    /// Y position of the hotspot in output pixel coordinates.
    pub y: f64,
    /// Scale factor for the cursor asset.
    pub scale: f64,
    /// Whether a click animation is showing.
    pub clicking: bool,
}

/// Compute the geometry of every output frame.
///
/// The output runs for the table's total duration, or up to the last
/// overlay timestamp when the table is empty. Overlay lookups use output
/// time for an exported overlay and source time for a preview overlay.
pub fn plan_frames(
    state: &CursorOverlayState,
    table: &TimeRemapTable,
    request: &FramePlanRequest,
) -> CutframeResult<Vec<FrameGeometry>> {
    if request.fps == 0 {
        return Err(CutframeError::render("frame rate must be positive"));
    }
    if request.output_size.is_empty() {
        return Err(CutframeError::render(format!(
            "output size {}x{} is empty",
            request.output_size.width, request.output_size.height
        )));
    }
    if request.source_extent.size().is_empty() {
        return Err(CutframeError::render("source extent is empty"));
    }

    let duration_secs = table
        .total_duration()
        .unwrap_or_else(|| state.last_timestamp());
    let clock = FrameClock::new(request.fps);
    let total_frames = clock.frame_count(duration_secs);

    let size_scale = if state.settings.size.is_finite() && state.settings.size > 0.0 {
        state.settings.size
    } else {
        1.0
    };

    let mut frames = Vec::with_capacity(total_frames as usize);
    for frame_index in 0..total_frames {
        let time_secs = clock.frame_time_secs(frame_index);
        let source_time_secs = table.source_time(time_secs);
        let overlay_time = if state.is_export() {
            time_secs
        } else {
            source_time_secs
        };

        let crop = zoom_crop_rect(state, overlay_time, request.source_extent);
        let view = crop.unwrap_or(request.source_extent);

        let click_effects: Vec<ActiveClickEffect> = active_click_effects(state, overlay_time)
            .iter()
            .filter_map(|effect| effect.projected(&view, request.output_size))
            .collect();

        let cursor = cursor_position_at(state, overlay_time)
            .and_then(|p| project_to_output(p, &view, request.output_size))
            .map(|p| CursorOverlay {
                x: p.x,
                y: p.y,
                scale: size_scale * request.source_extent.width / view.width,
                clicking: !click_effects.is_empty(),
            });

        frames.push(FrameGeometry {
            frame_index,
            time_secs,
            source_time_secs,
            crop,
            cursor,
            click_effects,
        });
    }

    tracing::debug!(
        frames = frames.len(),
        fps = request.fps,
        duration_secs,
        zoomed = frames.iter().filter(|f| f.crop.is_some()).count(),
        "Planned output frames"
    );

    Ok(frames)
}
