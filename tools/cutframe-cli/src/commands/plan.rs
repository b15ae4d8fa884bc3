//! Compute the per-frame export plan for a recording and its edit.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cutframe_common::config::ProcessingDefaults;
use cutframe_processing_core::export_remap::{remap_for_export_with, ExportRemapConfig};
use cutframe_processing_core::overlay::{auto_zoom_regions, prepare};
use cutframe_processing_core::remap::{build_time_remap_table_with, RemapConfig};
use cutframe_render_engine::compositor::{plan_frames, FramePlanRequest};
use cutframe_timeline_model::cursor::CursorSettings;
use cutframe_timeline_model::geometry::Size2D;

use super::{load_cursor_metadata, load_segments};

pub struct PlanArgs {
    pub cursor: PathBuf,
    pub segments: PathBuf,
    pub settings: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub defaults: ProcessingDefaults,
}

pub fn run(args: PlanArgs) -> anyhow::Result<()> {
    let metadata = load_cursor_metadata(&args.cursor)?;
    let segments = load_segments(&args.segments)?;
    let settings = load_settings(args.settings.as_deref(), &args.defaults)?;

    let regions = auto_zoom_regions(&metadata, &settings);
    let preview = prepare(&metadata, &settings, &regions, args.fps, None);

    let table = build_time_remap_table_with(&segments, &RemapConfig::from(&args.defaults));
    let export = remap_for_export_with(&preview, &table, &ExportRemapConfig::from(&args.defaults));

    let request = FramePlanRequest::new(
        Size2D::new(f64::from(args.width), f64::from(args.height)),
        args.fps,
        preview.source_size,
    );
    let frames = plan_frames(&export, &table, &request)?;

    tracing::info!(
        frames = frames.len(),
        regions = regions.len(),
        clicks = export.clicks.len(),
        "Frame plan ready"
    );

    let json = serde_json::to_string_pretty(&frames)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write frame plan: {}", path.display()))?;
            eprintln!("Wrote {} frames to {}", frames.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Cursor settings from `path`, or defaults seeded from the configured
/// processing tunables so `plan` and `analyze` zoom alike.
fn load_settings(path: Option<&Path>, defaults: &ProcessingDefaults) -> anyhow::Result<CursorSettings> {
    let Some(path) = path else {
        let mut settings = CursorSettings::default();
        settings.auto_zoom.zoom_level = defaults.zoom_level;
        return Ok(settings);
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Settings file not found: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings: {}", path.display()))
}
