//! Cutframe Render Engine
//!
//! Geometry the external compositor needs for every output frame. Pixels
//! are never touched here; the engine only answers "what to show where".
//!
//! # Per-frame pipeline
//!
//! ```text
//! output time ──► TimeRemapTable::source_time ──► source frame to decode
//!      │
//!      ├──► zoom keyframes ──► crop rect (or full frame)
//!      │                            │
//!      ├──► smoothed cursor ────────┴──► cursor position in output pixels
//!      │
//!      └──► clicks ──► live click effects
//! ```

pub mod click_effects;
pub mod compositor;
pub mod geometry;

pub use click_effects::{active_click_effects, ActiveClickEffect};
pub use compositor::{plan_frames, CursorOverlay, FrameGeometry, FramePlanRequest};
pub use geometry::{cursor_position_at, cursor_screen_position, zoom_at, zoom_crop_rect};
