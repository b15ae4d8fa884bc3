//! Auto-zoom analysis.
//!
//! Finds bursts of user interaction (clicks and key presses) and turns each
//! into a zoom region that magnifies the area the user was working in.
//!
//! # Algorithm
//!
//! 1. **Merge** clicks and key presses into one time-ordered stream.
//! 2. **Cluster** consecutive interactions whose gap is at most the
//!    sensitivity's merge gap.
//! 3. **Filter** bursts with fewer interactions than the sensitivity asks for.
//! 4. **Centroid** of each burst becomes the focus, clamped so the crop box
//!    stays inside the source.
//! 5. **Pad** the burst span with a lead-in and a hold-out.
//!
//! [`zoom_keyframes`] expands regions into the eased keyframe curve the
//! renderer samples.

use cutframe_timeline_model::cursor::{CursorClick, KeyInteraction};
use cutframe_timeline_model::geometry::{Point2D, Size2D};
use cutframe_timeline_model::zoom::{ZoomKeyframe, ZoomRegion, ZoomSensitivity};

/// One click or key press in overlay space.
#[derive(Debug, Clone, Copy)]
struct Interaction {
    timestamp: f64,
    x: f64,
    y: f64,
}

/// A run of interactions close together in time.
#[derive(Debug, Clone)]
struct InteractionBurst {
    start: f64,
    end: f64,
    positions: Vec<(f64, f64)>,
}

/// Cluster interaction bursts into zoom regions (source time).
///
/// Keyboard-only bursts are valid. Regions come back sorted and
/// non-overlapping.
pub fn generate_zoom_regions(
    clicks: &[CursorClick],
    key_presses: &[KeyInteraction],
    sensitivity: ZoomSensitivity,
    zoom_level: f64,
    source_size: Size2D,
) -> Vec<ZoomRegion> {
    let zoom_level = sanitize_zoom(zoom_level);

    let mut interactions: Vec<Interaction> = clicks
        .iter()
        .map(|c| Interaction {
            timestamp: c.timestamp,
            x: c.x,
            y: c.y,
        })
        .chain(key_presses.iter().map(|k| Interaction {
            timestamp: k.timestamp,
            x: k.x,
            y: k.y,
        }))
        .filter(|i| i.timestamp.is_finite() && i.x.is_finite() && i.y.is_finite())
        .collect();
    interactions.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let bursts = cluster_bursts(&interactions, sensitivity.merge_gap_secs());
    let burst_count = bursts.len();

    let mut regions: Vec<ZoomRegion> = Vec::new();
    for burst in bursts {
        if burst.positions.len() < sensitivity.min_interactions() {
            continue;
        }

        let (cx, cy) = compute_centroid(&burst.positions);
        let focus = clamp_focus(Point2D::new(cx, cy), zoom_level, source_size);

        let mut start = (burst.start - sensitivity.lead_in_secs()).max(0.0);
        let end = burst.end + sensitivity.hold_out_secs();
        if let Some(prev) = regions.last() {
            start = start.max(prev.end_time);
        }
        if end <= start {
            continue;
        }

        regions.push(ZoomRegion::new(start, end, zoom_level, focus));
    }

    tracing::debug!(
        interactions = interactions.len(),
        bursts = burst_count,
        regions = regions.len(),
        ?sensitivity,
        "Generated zoom regions"
    );

    regions
}

/// Expand enabled regions into zoom keyframes.
///
/// Every region contributes five keyframes: full frame at `0`, full frame
/// held until the zoom-in begins, peak zoom at the region start, peak held
/// until the zoom-out begins, and full frame at the region end. Runs from
/// several regions are concatenated and sorted by timestamp.
pub fn zoom_keyframes(
    regions: &[ZoomRegion],
    sensitivity: ZoomSensitivity,
    source_size: Size2D,
) -> Vec<ZoomKeyframe> {
    let zoom_in = sensitivity.zoom_in_secs();
    let zoom_out = sensitivity.zoom_out_secs();

    let mut keyframes = Vec::with_capacity(regions.len() * 5);
    for region in regions {
        if !region.is_enabled
            || !region.start_time.is_finite()
            || !region.end_time.is_finite()
            || region.end_time <= region.start_time
        {
            continue;
        }

        let zoom = sanitize_zoom(region.zoom_level);
        let focus = clamp_focus(region.focus(), zoom, source_size);

        let start = region.start_time.max(0.0);
        let end = region.end_time.max(start);
        let hold_in = (start - zoom_in).max(0.0);
        let hold_out = (end - zoom_out).max(start);

        keyframes.extend([
            ZoomKeyframe::new(0.0, 1.0, focus, 0.0),
            ZoomKeyframe::new(hold_in, 1.0, focus, 0.0),
            ZoomKeyframe::new(start, zoom, focus, start - hold_in),
            ZoomKeyframe::new(hold_out, zoom, focus, 0.0),
            ZoomKeyframe::new(end, 1.0, focus, end - hold_out),
        ]);
    }

    // Stable, so each region's run keeps its internal order on ties.
    keyframes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    keyframes
}

/// Clamp `focus` so a crop of `source_size / zoom_level` centered on it
/// stays inside the source.
pub fn clamp_focus(focus: Point2D, zoom_level: f64, source_size: Size2D) -> Point2D {
    if source_size.is_empty() {
        return focus;
    }

    let crop = source_size.scaled_down(sanitize_zoom(zoom_level));
    let half_w = crop.width / 2.0;
    let half_h = crop.height / 2.0;

    let x = if focus.x.is_finite() {
        focus.x
    } else {
        source_size.width / 2.0
    };
    let y = if focus.y.is_finite() {
        focus.y
    } else {
        source_size.height / 2.0
    };

    Point2D::new(
        x.clamp(half_w, source_size.width - half_w),
        y.clamp(half_h, source_size.height - half_h),
    )
}

/// Group a time-sorted interaction stream into bursts.
fn cluster_bursts(interactions: &[Interaction], merge_gap_secs: f64) -> Vec<InteractionBurst> {
    let Some(first) = interactions.first() else {
        return Vec::new();
    };

    let mut bursts = Vec::new();
    let mut current = InteractionBurst {
        start: first.timestamp,
        end: first.timestamp,
        positions: vec![(first.x, first.y)],
    };

    for interaction in interactions.iter().skip(1) {
        if interaction.timestamp - current.end <= merge_gap_secs {
            current.end = interaction.timestamp;
            current.positions.push((interaction.x, interaction.y));
            continue;
        }

        let next = InteractionBurst {
            start: interaction.timestamp,
            end: interaction.timestamp,
            positions: vec![(interaction.x, interaction.y)],
        };
        bursts.push(std::mem::replace(&mut current, next));
    }

    bursts.push(current);
    bursts
}

/// Compute the centroid (average position) of a set of points.
fn compute_centroid(positions: &[(f64, f64)]) -> (f64, f64) {
    let n = positions.len().max(1) as f64;
    let sum_x: f64 = positions.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = positions.iter().map(|(_, y)| y).sum();
    (sum_x / n, sum_y / n)
}

fn sanitize_zoom(zoom_level: f64) -> f64 {
    if zoom_level.is_finite() {
        zoom_level.max(1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutframe_timeline_model::event::MouseButton;

    const SOURCE: Size2D = Size2D {
        width: 1920.0,
        height: 1080.0,
    };

    fn click(t: f64, x: f64, y: f64) -> CursorClick {
        CursorClick::new(t, x, y, MouseButton::Left)
    }

    #[test]
    fn test_no_interactions_no_regions() {
        let regions = generate_zoom_regions(&[], &[], ZoomSensitivity::Balanced, 2.0, SOURCE);
        assert!(regions.is_empty());
    }

    #[test]
    fn test_burst_becomes_padded_region() {
        let clicks = vec![click(5.0, 900.0, 500.0), click(5.8, 1000.0, 600.0)];
        let regions = generate_zoom_regions(&clicks, &[], ZoomSensitivity::Balanced, 2.0, SOURCE);

        assert_eq!(regions.len(), 1);
        let region = &regions[0];
        assert!((region.start_time - 4.7).abs() < 1e-9);
        assert!((region.end_time - 6.8).abs() < 1e-9);
        assert_eq!(region.zoom_level, 2.0);
        assert_eq!(region.focus(), Point2D::new(950.0, 550.0));
    }

    #[test]
    fn test_gap_splits_bursts() {
        let clicks = vec![
            click(1.0, 500.0, 500.0),
            click(1.5, 500.0, 500.0),
            click(10.0, 600.0, 600.0),
            click(10.4, 600.0, 600.0),
        ];
        let regions = generate_zoom_regions(&clicks, &[], ZoomSensitivity::Balanced, 2.0, SOURCE);
        assert_eq!(regions.len(), 2);
        assert!(regions[0].end_time <= regions[1].start_time);
    }

    #[test]
    fn test_sensitivity_controls_minimum_burst() {
        let clicks = vec![click(3.0, 500.0, 500.0)];
        let dramatic =
            generate_zoom_regions(&clicks, &[], ZoomSensitivity::Dramatic, 2.0, SOURCE);
        let balanced =
            generate_zoom_regions(&clicks, &[], ZoomSensitivity::Balanced, 2.0, SOURCE);
        assert_eq!(dramatic.len(), 1);
        assert!(balanced.is_empty());
    }

    #[test]
    fn test_dramatic_merges_wider_gaps() {
        let clicks = vec![
            click(1.0, 500.0, 500.0),
            click(3.0, 500.0, 500.0),
            click(5.0, 500.0, 500.0),
        ];
        let dramatic =
            generate_zoom_regions(&clicks, &[], ZoomSensitivity::Dramatic, 2.0, SOURCE);
        let subtle = generate_zoom_regions(&clicks, &[], ZoomSensitivity::Subtle, 2.0, SOURCE);
        assert_eq!(dramatic.len(), 1);
        assert!(subtle.is_empty());
    }

    #[test]
    fn test_keyboard_only_burst_is_supported() {
        let keys = vec![
            KeyInteraction::new(2.0, 300.0, 300.0),
            KeyInteraction::new(2.2, 310.0, 300.0),
            KeyInteraction::new(2.4, 320.0, 300.0),
        ];
        let regions = generate_zoom_regions(&[], &keys, ZoomSensitivity::Subtle, 2.0, SOURCE);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].focus(), Point2D::new(310.0, 300.0));
    }

    #[test]
    fn test_focus_clamped_to_keep_crop_inside() {
        let clicks = vec![click(1.0, 5.0, 1075.0), click(1.1, 5.0, 1075.0)];
        let regions = generate_zoom_regions(&clicks, &[], ZoomSensitivity::Balanced, 2.0, SOURCE);
        assert_eq!(regions[0].focus(), Point2D::new(480.0, 810.0));
    }

    #[test]
    fn test_region_start_never_negative() {
        let clicks = vec![click(0.1, 500.0, 500.0), click(0.2, 500.0, 500.0)];
        let regions = generate_zoom_regions(&clicks, &[], ZoomSensitivity::Balanced, 2.0, SOURCE);
        assert_eq!(regions[0].start_time, 0.0);
    }

    #[test]
    fn test_single_region_yields_five_keyframes() {
        let region = ZoomRegion::new(4.0, 8.0, 2.0, Point2D::new(960.0, 540.0));
        let keyframes = zoom_keyframes(&[region], ZoomSensitivity::Balanced, SOURCE);

        assert_eq!(keyframes.len(), 5);
        assert_eq!(keyframes[0].zoom_level, 1.0);
        assert_eq!(keyframes[4].zoom_level, 1.0);
        assert!(keyframes.windows(2).all(|w| w[1].timestamp >= w[0].timestamp));

        let expected = [0.0, 3.5, 4.0, 7.2, 8.0];
        for (keyframe, t) in keyframes.iter().zip(expected) {
            assert!((keyframe.timestamp - t).abs() < 1e-9);
        }
        assert!((keyframes[2].easing_duration - 0.5).abs() < 1e-9);
        assert!((keyframes[4].easing_duration - 0.8).abs() < 1e-9);
        assert_eq!(keyframes[2].zoom_level, 2.0);
    }

    #[test]
    fn test_disabled_regions_contribute_nothing() {
        let mut region = ZoomRegion::new(4.0, 8.0, 2.0, Point2D::new(960.0, 540.0));
        region.is_enabled = false;
        assert!(zoom_keyframes(&[region], ZoomSensitivity::Balanced, SOURCE).is_empty());
        assert!(zoom_keyframes(&[], ZoomSensitivity::Balanced, SOURCE).is_empty());
    }

    #[test]
    fn test_region_near_zero_clamps_hold_in() {
        let region = ZoomRegion::new(0.2, 3.0, 2.0, Point2D::new(960.0, 540.0));
        let keyframes = zoom_keyframes(&[region], ZoomSensitivity::Balanced, SOURCE);
        assert_eq!(keyframes[1].timestamp, 0.0);
        assert!((keyframes[2].easing_duration - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_regions_sorted() {
        let regions = vec![
            ZoomRegion::new(10.0, 12.0, 2.0, Point2D::new(960.0, 540.0)),
            ZoomRegion::new(2.0, 4.0, 3.0, Point2D::new(100.0, 100.0)),
        ];
        let keyframes = zoom_keyframes(&regions, ZoomSensitivity::Dramatic, SOURCE);
        assert_eq!(keyframes.len(), 10);
        assert!(keyframes.windows(2).all(|w| w[1].timestamp >= w[0].timestamp));
        // Focus of the 3x region was pulled inside the source.
        assert!(keyframes
            .iter()
            .any(|k| k.focus_point == Point2D::new(320.0, 180.0)));
    }

    #[test]
    fn test_clamp_focus_empty_source_is_passthrough() {
        let focus = Point2D::new(-5.0, 9000.0);
        assert_eq!(clamp_focus(focus, 2.0, Size2D::default()), focus);
    }

    #[test]
    fn test_clamp_focus_non_finite_source_is_passthrough() {
        let focus = Point2D::new(50.0, 50.0);
        assert_eq!(clamp_focus(focus, 2.0, Size2D::new(f64::INFINITY, 100.0)), focus);
        assert_eq!(clamp_focus(focus, 2.0, Size2D::new(100.0, f64::NAN)), focus);
    }
}
