//! Cutframe Timeline Model
//!
//! Defines the data contracts shared by every Cutframe crate:
//! - **Segments & remap tables:** the mapping between source-recording time
//!   and edited output (composition) time
//! - **Telemetry:** raw cursor/keyboard events as written by the recorder
//! - **Overlay:** smoothed cursor points, clicks, zoom regions and keyframes
//!
//! Overlay coordinates use a top-left origin where one unit is one source
//! pixel. All times are fractional seconds.

pub mod cursor;
pub mod easing;
pub mod event;
pub mod geometry;
pub mod overlay;
pub mod segment;
pub mod zoom;

pub use cursor::*;
pub use easing::*;
pub use event::*;
pub use geometry::*;
pub use overlay::*;
pub use segment::*;
pub use zoom::*;
