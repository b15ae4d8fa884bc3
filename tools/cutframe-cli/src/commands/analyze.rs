//! Analyze recorder telemetry: interactions, smoothed path, zoom regions.

use std::path::PathBuf;

use cutframe_processing_core::auto_zoom::{generate_zoom_regions, zoom_keyframes};
use cutframe_processing_core::cursor_smooth::smooth_positions;
use cutframe_processing_core::interactions::extract_interactions;
use cutframe_timeline_model::zoom::ZoomSensitivity;

use super::load_cursor_metadata;

pub fn run(
    path: PathBuf,
    sensitivity: ZoomSensitivity,
    zoom_level: f64,
    fps: u32,
) -> anyhow::Result<()> {
    eprintln!("Analyzing telemetry at: {}", path.display());

    let metadata = load_cursor_metadata(&path)?;
    eprintln!(
        "  Loaded {} events ({}x{} @ {}fps)",
        metadata.events.len(),
        metadata.source_size.width,
        metadata.source_size.height,
        metadata.frame_rate
    );

    let extracted = extract_interactions(&metadata);
    let smoothed = smooth_positions(&extracted.positions, fps);
    eprintln!(
        "  {} clicks, {} key presses, {} smoothed points",
        extracted.clicks.len(),
        extracted.key_presses.len(),
        smoothed.len()
    );

    let regions = generate_zoom_regions(
        &extracted.clicks,
        &extracted.key_presses,
        sensitivity,
        zoom_level,
        extracted.source_size,
    );
    let keyframes = zoom_keyframes(&regions, sensitivity, extracted.source_size);
    eprintln!(
        "  Generated {} zoom regions ({} keyframes)",
        regions.len(),
        keyframes.len()
    );

    let report = serde_json::json!({
        "sourceSize": extracted.source_size,
        "clicks": extracted.clicks.len(),
        "keyPresses": extracted.key_presses.len(),
        "smoothedPoints": smoothed.len(),
        "zoomRegions": regions,
        "zoomKeyframes": keyframes,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
