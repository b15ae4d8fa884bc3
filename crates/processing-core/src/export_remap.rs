//! Re-projection of overlay data into composition time.
//!
//! A preview overlay is timed against the source recording. Export needs
//! the same data timed against the edited output, so every smoothed point,
//! click and zoom keyframe is pushed through the remap table:
//!
//! - an item whose source time has a table entry within the match
//!   tolerance moves to the interpolated composition time
//! - an item with no entry nearby sits inside a cut range and is dropped
//!
//! Cuts make the cursor jump. [`inject_cursor_bridges`] fills each jump
//! with a short eased glide so the exported cursor never teleports.

use cutframe_common::config::ProcessingDefaults;
use cutframe_timeline_model::cursor::SmoothedCursorPoint;
use cutframe_timeline_model::easing::smoothstep;
use cutframe_timeline_model::geometry::Point2D;
use cutframe_timeline_model::overlay::{CursorOverlayState, OverlayDomain};
use cutframe_timeline_model::segment::TimeRemapTable;

/// Tunables for [`remap_for_export_with`].
#[derive(Debug, Clone)]
pub struct ExportRemapConfig {
    /// Maximum distance from an item's source time to the nearest table
    /// entry before the item counts as cut out (seconds).
    pub match_tolerance_secs: f64,

    /// Synthetic points inserted across each cut.
    pub bridge_point_count: usize,

    /// Source-time jump between adjacent table entries that counts as a cut.
    pub jump_threshold_secs: f64,
}

impl Default for ExportRemapConfig {
    fn default() -> Self {
        Self {
            match_tolerance_secs: 1.0,
            bridge_point_count: 12,
            jump_threshold_secs: 0.1,
        }
    }
}

impl From<&ProcessingDefaults> for ExportRemapConfig {
    fn from(defaults: &ProcessingDefaults) -> Self {
        Self {
            match_tolerance_secs: defaults.export_match_tolerance_secs,
            bridge_point_count: defaults.bridge_point_count,
            jump_threshold_secs: defaults.bridge_jump_threshold_secs,
        }
    }
}

/// Remap a preview overlay for export with default tunables.
pub fn remap_for_export(state: &CursorOverlayState, table: &TimeRemapTable) -> CursorOverlayState {
    remap_for_export_with(state, table, &ExportRemapConfig::default())
}

/// Remap a preview overlay into composition time.
///
/// With an empty table there is no output timeline for cursor motion, so
/// smoothed points are dropped while clicks and keyframes keep their
/// timestamps. A state that is already in the export domain is returned
/// unchanged.
pub fn remap_for_export_with(
    state: &CursorOverlayState,
    table: &TimeRemapTable,
    config: &ExportRemapConfig,
) -> CursorOverlayState {
    if state.is_export() {
        tracing::warn!("Overlay is already in export time; skipping remap");
        return state.clone();
    }

    let remap = |timestamp: f64| -> Option<f64> {
        if table.is_empty() {
            return Some(timestamp);
        }
        let nearest = table.nearest_by_source(timestamp)?;
        if (nearest.source_time - timestamp).abs() > config.match_tolerance_secs {
            return None;
        }
        Some(table.composition_time(timestamp))
    };

    let smoothed_points = if table.is_empty() {
        Vec::new()
    } else {
        let mut points: Vec<SmoothedCursorPoint> = state
            .smoothed_points
            .iter()
            .filter_map(|p| remap(p.timestamp).map(|t| SmoothedCursorPoint::new(t, p.x, p.y)))
            .collect();
        points.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        dedup_timestamps(&mut points);
        inject_cursor_bridges(&points, table, config)
    };

    let clicks: Vec<_> = state
        .clicks
        .iter()
        .filter_map(|c| {
            remap(c.timestamp).map(|timestamp| {
                let mut click = *c;
                click.timestamp = timestamp;
                click
            })
        })
        .collect();

    let mut zoom_keyframes: Vec<_> = state
        .zoom_keyframes
        .iter()
        .filter_map(|k| {
            remap(k.timestamp).map(|timestamp| {
                let mut keyframe = *k;
                keyframe.timestamp = timestamp;
                keyframe
            })
        })
        .collect();
    zoom_keyframes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    tracing::debug!(
        points_in = state.smoothed_points.len(),
        points_out = smoothed_points.len(),
        clicks_in = state.clicks.len(),
        clicks_out = clicks.len(),
        keyframes_in = state.zoom_keyframes.len(),
        keyframes_out = zoom_keyframes.len(),
        "Remapped overlay for export"
    );

    CursorOverlayState {
        domain: OverlayDomain::Export,
        smoothed_points,
        clicks,
        zoom_keyframes,
        ..state.clone()
    }
}

/// Insert eased cursor motion across every cut in `table`.
///
/// `points` must be in composition time and sorted. For each cut, the last
/// point at or before the cut and the first point after it are joined by
/// `bridge_point_count` points spaced evenly in time, with positions eased
/// by smoothstep. Output timestamps are strictly increasing.
pub fn inject_cursor_bridges(
    points: &[SmoothedCursorPoint],
    table: &TimeRemapTable,
    config: &ExportRemapConfig,
) -> Vec<SmoothedCursorPoint> {
    let count = config.bridge_point_count;
    if points.len() < 2 || count == 0 {
        return points.to_vec();
    }

    let mut bridged: Vec<SmoothedCursorPoint> = Vec::new();
    let cuts = table.discontinuities(config.jump_threshold_secs);
    for cut in &cuts {
        let cut_time = cut.before.composition_time;

        let after = points.partition_point(|p| p.timestamp <= cut_time);
        if after == 0 || after >= points.len() {
            continue;
        }
        let a = points[after - 1];
        let b = points[after];

        let span = b.timestamp - a.timestamp;
        if span <= 0.0 {
            continue;
        }

        let from = a.position();
        let to = b.position();
        for k in 1..=count {
            let fraction = k as f64 / (count + 1) as f64;
            let position = Point2D::lerp(&from, &to, smoothstep(fraction));
            bridged.push(SmoothedCursorPoint::new(
                a.timestamp + span * fraction,
                position.x,
                position.y,
            ));
        }
    }

    if bridged.is_empty() {
        return points.to_vec();
    }

    tracing::debug!(
        cuts = cuts.len(),
        inserted = bridged.len(),
        "Bridged cursor motion across cuts"
    );

    let mut merged: Vec<SmoothedCursorPoint> = points.iter().copied().chain(bridged).collect();
    merged.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    dedup_timestamps(&mut merged);
    merged
}

/// Keep the first point of every run that does not strictly advance in time.
fn dedup_timestamps(points: &mut Vec<SmoothedCursorPoint>) {
    let mut last = f64::NEG_INFINITY;
    points.retain(|p| {
        if p.timestamp > last {
            last = p.timestamp;
            true
        } else {
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutframe_timeline_model::cursor::{CursorClick, CursorSettings};
    use cutframe_timeline_model::event::MouseButton;
    use cutframe_timeline_model::geometry::Size2D;
    use cutframe_timeline_model::segment::TimeRemapEntry;
    use cutframe_timeline_model::zoom::ZoomKeyframe;

    /// Plays 0..4s, skips 4..10s, plays 10..12s.
    fn cut_table() -> TimeRemapTable {
        TimeRemapTable::new(vec![
            TimeRemapEntry::new(0.0, 0.0),
            TimeRemapEntry::new(2.0, 2.0),
            TimeRemapEntry::new(4.0, 4.0),
            TimeRemapEntry::new(4.0, 10.0),
            TimeRemapEntry::new(6.0, 12.0),
        ])
    }

    fn preview_state() -> CursorOverlayState {
        CursorOverlayState {
            domain: OverlayDomain::Preview,
            smoothed_points: (0..=24)
                .map(|i| {
                    let t = i as f64 * 0.5;
                    SmoothedCursorPoint::new(t, t * 10.0, 50.0)
                })
                .collect(),
            clicks: vec![
                CursorClick::new(1.0, 10.0, 50.0, MouseButton::Left),
                CursorClick::new(7.0, 70.0, 50.0, MouseButton::Left),
                CursorClick::new(11.0, 110.0, 50.0, MouseButton::Right),
            ],
            cursor_image: None,
            cursor_hotspot: Point2D::ZERO,
            source_size: Size2D::new(200.0, 100.0),
            capture_origin: Point2D::ZERO,
            settings: CursorSettings::default(),
            zoom_keyframes: vec![
                ZoomKeyframe::new(0.0, 1.0, Point2D::new(100.0, 50.0), 0.0),
                ZoomKeyframe::new(7.0, 2.0, Point2D::new(100.0, 50.0), 0.5),
                ZoomKeyframe::new(11.0, 1.0, Point2D::new(100.0, 50.0), 0.8),
            ],
        }
    }

    #[test]
    fn test_click_inside_cut_is_dropped() {
        let exported = remap_for_export(&preview_state(), &cut_table());

        assert_eq!(exported.domain, OverlayDomain::Export);
        let times: Vec<f64> = exported.clicks.iter().map(|c| c.timestamp).collect();
        assert_eq!(times, vec![1.0, 5.0]);
        assert_eq!(exported.clicks[1].button, MouseButton::Right);
    }

    #[test]
    fn test_keyframes_remapped_and_easing_kept() {
        let exported = remap_for_export(&preview_state(), &cut_table());
        assert_eq!(exported.zoom_keyframes.len(), 2);
        assert_eq!(exported.zoom_keyframes[1].timestamp, 5.0);
        assert_eq!(exported.zoom_keyframes[1].easing_duration, 0.8);
    }

    #[test]
    fn test_points_strictly_increasing_with_bridge() {
        let exported = remap_for_export(&preview_state(), &cut_table());
        assert!(exported.points_are_ordered());

        // Points from deep inside the cut (6s..9s source) are gone.
        assert!(exported.smoothed_points.iter().all(|p| p.timestamp <= 6.0));

        // The bridge runs between the last pre-cut and first post-cut points.
        let around_cut: Vec<_> = exported
            .smoothed_points
            .iter()
            .filter(|p| p.timestamp > 4.0 && p.timestamp < 4.5)
            .collect();
        assert_eq!(around_cut.len(), 12);
        assert!(around_cut.windows(2).all(|w| w[1].x >= w[0].x));
    }

    #[test]
    fn test_empty_table_drops_points_keeps_rest() {
        let state = preview_state();
        let exported = remap_for_export(&state, &TimeRemapTable::identity());
        assert!(exported.smoothed_points.is_empty());
        assert_eq!(exported.clicks, state.clicks);
        assert_eq!(exported.zoom_keyframes, state.zoom_keyframes);
        assert!(exported.is_export());
    }

    #[test]
    fn test_already_exported_state_is_unchanged() {
        let mut state = preview_state();
        state.domain = OverlayDomain::Export;
        let again = remap_for_export(&state, &cut_table());
        assert_eq!(again, state);
    }

    #[test]
    fn test_tolerance_is_tunable() {
        let config = ExportRemapConfig {
            match_tolerance_secs: 3.5,
            ..Default::default()
        };
        let exported = remap_for_export_with(&preview_state(), &cut_table(), &config);
        // 7s is 3s from the nearest entry, so it now survives at the cut.
        assert_eq!(exported.clicks.len(), 3);
        assert_eq!(exported.clicks[1].timestamp, 4.0);
    }

    #[test]
    fn test_bridge_positions_are_eased() {
        let points = vec![
            SmoothedCursorPoint::new(3.9, 0.0, 0.0),
            SmoothedCursorPoint::new(4.0, 0.0, 0.0),
            SmoothedCursorPoint::new(4.1, 100.0, 0.0),
        ];
        let config = ExportRemapConfig {
            bridge_point_count: 3,
            ..Default::default()
        };
        let bridged = inject_cursor_bridges(&points, &cut_table(), &config);

        assert_eq!(bridged.len(), 6);
        let inserted = &bridged[2..5];
        assert!((inserted[0].timestamp - 4.025).abs() < 1e-9);
        assert!((inserted[1].x - 50.0).abs() < 1e-9);
        // smoothstep(0.25) = 0.15625
        assert!((inserted[0].x - 15.625).abs() < 1e-9);
    }

    #[test]
    fn test_no_cuts_no_bridges() {
        let table = TimeRemapTable::new(vec![
            TimeRemapEntry::new(0.0, 0.0),
            TimeRemapEntry::new(10.0, 10.0),
        ]);
        let points = vec![
            SmoothedCursorPoint::new(0.0, 0.0, 0.0),
            SmoothedCursorPoint::new(1.0, 5.0, 5.0),
        ];
        let bridged = inject_cursor_bridges(&points, &table, &ExportRemapConfig::default());
        assert_eq!(bridged, points);
    }
}
