//! Telemetry to overlay-space conversion.
//!
//! The recorder reports positions in capture-device space with a
//! bottom-left origin on the full display. Overlay space is the captured
//! region with a top-left origin:
//!
//! ```text
//! overlay_x = raw_x - origin_x
//! overlay_y = display_height - raw_y - origin_y
//! ```

use cutframe_timeline_model::cursor::{
    CursorClick, CursorSample, CursorStyle, KeyInteraction, CURSOR_BASE_SIZE,
};
use cutframe_timeline_model::event::{CursorEventType, CursorMetadata};
use cutframe_timeline_model::geometry::{Point2D, Size2D};

/// Overlay-space data pulled out of one telemetry document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedInteractions {
    /// Every event position, in recording order.
    pub positions: Vec<CursorSample>,
    pub clicks: Vec<CursorClick>,
    pub key_presses: Vec<KeyInteraction>,
    pub source_size: Size2D,
}

/// Convert recorder telemetry into overlay-space samples, clicks and key
/// presses.
///
/// Events with non-finite fields are skipped.
pub fn extract_interactions(metadata: &CursorMetadata) -> ExtractedInteractions {
    let origin = metadata.capture_origin_or_default();
    let display_height = metadata.effective_display_height();

    let mut extracted = ExtractedInteractions {
        source_size: metadata.source_size,
        ..Default::default()
    };
    let mut skipped = 0usize;

    for event in &metadata.events {
        if !event.is_finite() {
            skipped += 1;
            continue;
        }

        let x = event.x - origin.x;
        let y = display_height - event.y - origin.y;

        extracted
            .positions
            .push(CursorSample::new(event.timestamp, x, y));

        match event.event_type {
            CursorEventType::Click => extracted.clicks.push(CursorClick::new(
                event.timestamp,
                x,
                y,
                event.button.unwrap_or_default(),
            )),
            CursorEventType::KeyDown => extracted
                .key_presses
                .push(KeyInteraction::new(event.timestamp, x, y)),
            CursorEventType::Move | CursorEventType::Release | CursorEventType::Scroll => {}
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped non-finite telemetry events");
    }

    tracing::debug!(
        events = metadata.events.len(),
        clicks = extracted.clicks.len(),
        key_presses = extracted.key_presses.len(),
        "Extracted interactions"
    );

    extracted
}

/// Hotspot of the drawn cursor, in output pixels.
///
/// The synthetic circle is anchored at its centre. Platform cursors use the
/// hotspot the platform reports, scaled by the display backing scale and
/// the user's size multiplier.
pub fn cursor_hotspot(style: CursorStyle, size: f64, backing_scale: f64) -> Point2D {
    let size = if size.is_finite() && size > 0.0 {
        size
    } else {
        1.0
    };
    let backing_scale = if backing_scale.is_finite() && backing_scale > 0.0 {
        backing_scale
    } else {
        1.0
    };

    match style {
        CursorStyle::CircleDot => {
            let half = CURSOR_BASE_SIZE * size / 2.0;
            Point2D::new(half, half)
        }
        CursorStyle::System(shape) => {
            let hotspot = shape.platform_hotspot();
            let scale = backing_scale * size;
            Point2D::new(hotspot.x * scale, hotspot.y * scale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutframe_timeline_model::cursor::SystemCursor;
    use cutframe_timeline_model::event::{CursorEvent, MouseButton};

    #[test]
    fn test_flips_y_and_removes_origin() {
        let mut metadata = CursorMetadata::new(
            Size2D::new(800.0, 600.0),
            vec![CursorEvent::moved(0.0, 150.0, 900.0)],
        );
        metadata.capture_origin = Some(Point2D::new(100.0, 200.0));
        metadata.display_height = Some(1200.0);

        let extracted = extract_interactions(&metadata);
        let sample = extracted.positions[0];
        assert_eq!(sample.x, 50.0);
        assert_eq!(sample.y, 100.0);
    }

    #[test]
    fn test_default_origin_and_display_height() {
        let metadata = CursorMetadata::new(
            Size2D::new(1920.0, 1080.0),
            vec![CursorEvent::moved(0.0, 10.0, 1080.0)],
        );
        let extracted = extract_interactions(&metadata);
        assert_eq!(extracted.positions[0].position(), Point2D::new(10.0, 0.0));
    }

    #[test]
    fn test_classifies_events() {
        let mut events = vec![
            CursorEvent::moved(0.0, 0.0, 0.0),
            CursorEvent::click(0.5, 10.0, 10.0, MouseButton::Right),
            CursorEvent::new(0.6, 10.0, 10.0, CursorEventType::Release),
            CursorEvent::key_down(0.9, 20.0, 20.0),
            CursorEvent::new(1.0, 20.0, 20.0, CursorEventType::Scroll),
        ];
        // A click without a button counts as left.
        events.push(CursorEvent::new(1.2, 30.0, 30.0, CursorEventType::Click));

        let metadata = CursorMetadata::new(Size2D::new(100.0, 100.0), events);
        let extracted = extract_interactions(&metadata);

        assert_eq!(extracted.source_size, Size2D::new(100.0, 100.0));
        assert_eq!(extracted.positions.len(), 6);
        assert_eq!(extracted.clicks.len(), 2);
        assert_eq!(extracted.clicks[0].button, MouseButton::Right);
        assert_eq!(extracted.clicks[1].button, MouseButton::Left);
        assert_eq!(extracted.key_presses.len(), 1);
        assert_eq!(extracted.key_presses[0].timestamp, 0.9);
    }

    #[test]
    fn test_skips_non_finite_events() {
        let metadata = CursorMetadata::new(
            Size2D::new(100.0, 100.0),
            vec![
                CursorEvent::moved(f64::NAN, 0.0, 0.0),
                CursorEvent::click(0.1, f64::INFINITY, 0.0, MouseButton::Left),
                CursorEvent::moved(0.2, 1.0, 1.0),
            ],
        );
        let extracted = extract_interactions(&metadata);
        assert_eq!(extracted.positions.len(), 1);
        assert!(extracted.clicks.is_empty());
    }

    #[test]
    fn test_hotspot_for_styles() {
        assert_eq!(
            cursor_hotspot(CursorStyle::CircleDot, 2.0, 2.0),
            Point2D::new(24.0, 24.0)
        );
        assert_eq!(
            cursor_hotspot(CursorStyle::System(SystemCursor::Pointer), 1.5, 2.0),
            Point2D::new(21.0, 3.0)
        );
        assert_eq!(
            cursor_hotspot(CursorStyle::System(SystemCursor::Arrow), f64::NAN, -1.0),
            Point2D::new(4.0, 4.0)
        );
    }
}
