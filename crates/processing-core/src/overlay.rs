//! Assembly of the preview-time overlay.

use cutframe_timeline_model::cursor::CursorSettings;
use cutframe_timeline_model::event::CursorMetadata;
use cutframe_timeline_model::overlay::{CursorImageHandle, CursorOverlayState, OverlayDomain};
use cutframe_timeline_model::zoom::ZoomRegion;

use crate::auto_zoom::{generate_zoom_regions, zoom_keyframes};
use crate::cursor_smooth::smooth_positions;
use crate::interactions::{cursor_hotspot, extract_interactions};

/// Build the preview-time overlay for a recording.
///
/// `zoom_regions` are the regions the editor currently holds (generated or
/// user-edited); they are expanded into keyframes with the sensitivity from
/// `settings`.
pub fn prepare(
    metadata: &CursorMetadata,
    settings: &CursorSettings,
    zoom_regions: &[ZoomRegion],
    output_frame_rate: u32,
    cursor_image: Option<CursorImageHandle>,
) -> CursorOverlayState {
    let extracted = extract_interactions(metadata);
    let smoothed_points = smooth_positions(&extracted.positions, output_frame_rate);

    let keyframes = zoom_keyframes(
        zoom_regions,
        settings.auto_zoom.sensitivity,
        extracted.source_size,
    );

    let hotspot = cursor_hotspot(
        settings.style,
        settings.size,
        metadata.effective_backing_scale(),
    );

    tracing::info!(
        points = smoothed_points.len(),
        clicks = extracted.clicks.len(),
        keyframes = keyframes.len(),
        "Prepared cursor overlay"
    );

    CursorOverlayState {
        domain: OverlayDomain::Preview,
        smoothed_points,
        clicks: extracted.clicks,
        cursor_image,
        cursor_hotspot: hotspot,
        source_size: extracted.source_size,
        capture_origin: metadata.capture_origin_or_default(),
        settings: settings.clone(),
        zoom_keyframes: keyframes,
    }
}

/// Zoom regions generated from the recording's interactions, or none when
/// auto-zoom is switched off.
pub fn auto_zoom_regions(metadata: &CursorMetadata, settings: &CursorSettings) -> Vec<ZoomRegion> {
    if !settings.auto_zoom.enabled {
        return Vec::new();
    }

    let extracted = extract_interactions(metadata);
    generate_zoom_regions(
        &extracted.clicks,
        &extracted.key_presses,
        settings.auto_zoom.sensitivity,
        settings.auto_zoom.zoom_level,
        extracted.source_size,
    )
}
