//! Cutframe Processing Core
//!
//! Turns editor decisions and recorder telemetry into overlay data that is
//! synchronized with the edited output:
//! - **Remap:** build the source/composition time table from segments,
//!   easing between speeds at segment boundaries
//! - **Interactions:** convert raw telemetry into overlay-space clicks,
//!   key presses, and cursor samples
//! - **Cursor Smoothing:** resample cursor motion with a Catmull-Rom spline
//! - **Auto-Zoom:** cluster interaction bursts into zoom regions and expand
//!   regions into eased keyframes
//! - **Export Remap:** re-project overlay data into composition time and
//!   bridge cursor motion across cuts
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod auto_zoom;
pub mod cursor_smooth;
pub mod export_remap;
pub mod interactions;
pub mod overlay;
pub mod remap;

pub use auto_zoom::{clamp_focus, generate_zoom_regions, zoom_keyframes};
pub use cursor_smooth::{smooth_positions, CursorSmoother, SmoothingConfig};
pub use export_remap::{
    inject_cursor_bridges, remap_for_export, remap_for_export_with, ExportRemapConfig,
};
pub use interactions::{cursor_hotspot, extract_interactions, ExtractedInteractions};
pub use overlay::{auto_zoom_regions, prepare};
pub use remap::{build_time_remap_table, build_time_remap_table_with, RemapConfig};
