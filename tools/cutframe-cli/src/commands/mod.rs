pub mod analyze;
pub mod plan;
pub mod remap;

use std::path::Path;

use anyhow::Context;
use cutframe_common::error::CutframeError;
use cutframe_timeline_model::event::CursorMetadata;
use cutframe_timeline_model::segment::Segment;

/// Read and decode the recorder's cursor telemetry.
pub fn load_cursor_metadata(path: &Path) -> anyhow::Result<CursorMetadata> {
    if !path.exists() {
        return Err(CutframeError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cursor telemetry: {}", path.display()))?;
    let metadata = CursorMetadata::from_json(&content)
        .map_err(|e| CutframeError::telemetry(e.to_string()))
        .with_context(|| format!("Failed to decode cursor telemetry: {}", path.display()))?;
    Ok(metadata)
}

/// Read a JSON array of segments.
pub fn load_segments(path: &Path) -> anyhow::Result<Vec<Segment>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Segments file not found: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse segments: {}", path.display()))
}
