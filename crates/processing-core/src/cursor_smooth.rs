//! Cursor motion smoothing.
//!
//! Raw cursor samples arrive at whatever rate the recorder produced them,
//! often irregular and jittery. The smoother resamples them onto a fixed
//! frame grid with a Catmull-Rom spline so the rendered cursor glides
//! through every recorded position.

use cutframe_common::config::ProcessingDefaults;
use cutframe_timeline_model::cursor::{CursorSample, SmoothedCursorPoint};
use cutframe_timeline_model::geometry::Point2D;

/// Upper bound on resampled points for a single recording.
const MAX_OUTPUT_POINTS: usize = 2_000_000;

/// Configuration for [`CursorSmoother`].
#[derive(Debug, Clone)]
pub struct SmoothingConfig {
    /// Output sample rate (points per second).
    pub output_frame_rate: u32,

    /// Spans between input samples shorter than this hold the earlier
    /// position instead of interpolating (seconds).
    pub min_segment_secs: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            output_frame_rate: 60,
            min_segment_secs: 1e-4,
        }
    }
}

impl From<&ProcessingDefaults> for SmoothingConfig {
    fn from(defaults: &ProcessingDefaults) -> Self {
        Self {
            output_frame_rate: defaults.output_frame_rate,
            ..Default::default()
        }
    }
}

/// Cursor smoothing engine.
pub struct CursorSmoother {
    config: SmoothingConfig,
}

impl CursorSmoother {
    pub fn new(config: SmoothingConfig) -> Self {
        Self { config }
    }

    /// Smoother resampling at `fps` points per second.
    pub fn with_frame_rate(fps: u32) -> Self {
        Self::new(SmoothingConfig {
            output_frame_rate: fps,
            ..Default::default()
        })
    }

    /// Resample `samples` onto a uniform grid.
    ///
    /// Non-finite samples are dropped and the rest are ordered by timestamp.
    /// Fewer than two usable samples are returned unchanged. A recording
    /// whose samples all share one timestamp yields nothing.
    pub fn smooth(&self, samples: &[CursorSample]) -> Vec<SmoothedCursorPoint> {
        let mut points: Vec<CursorSample> =
            samples.iter().copied().filter(|s| s.is_finite()).collect();
        let dropped = samples.len() - points.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Ignoring non-finite cursor samples");
        }

        // Stable, so samples sharing a timestamp keep recording order.
        points.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        if points.len() < 2 {
            return points.into_iter().map(SmoothedCursorPoint::from).collect();
        }

        let first_ts = points[0].timestamp;
        let span = points[points.len() - 1].timestamp - first_ts;
        if span < 1e-6 {
            return vec![];
        }

        let fps = f64::from(self.config.output_frame_rate.max(1));
        let count = ((span * fps + 1e-9).floor() as usize + 1).min(MAX_OUTPUT_POINTS);

        let mut result = Vec::with_capacity(count);
        let mut segment = 0usize;
        for k in 0..count {
            let t = first_ts + k as f64 / fps;
            while segment + 2 < points.len() && points[segment + 1].timestamp <= t {
                segment += 1;
            }
            let position = self.interpolate(&points, segment, t);
            result.push(SmoothedCursorPoint::new(t, position.x, position.y));
        }

        tracing::debug!(
            input = samples.len(),
            output = result.len(),
            fps = self.config.output_frame_rate,
            "Resampled cursor path"
        );

        result
    }

    /// Catmull-Rom position at `t` within the span `points[i]..points[i + 1]`.
    fn interpolate(&self, points: &[CursorSample], i: usize, t: f64) -> Point2D {
        let p1 = points[i];
        let p2 = points[i + 1];
        let p0 = if i > 0 { points[i - 1] } else { p1 };
        let p3 = points.get(i + 2).copied().unwrap_or(p2);

        let duration = p2.timestamp - p1.timestamp;
        if duration < self.config.min_segment_secs {
            return p1.position();
        }

        let u = ((t - p1.timestamp) / duration).clamp(0.0, 1.0);
        let x = catmull_rom(p0.x, p1.x, p2.x, p3.x, u);
        let y = catmull_rom(p0.y, p1.y, p2.y, p3.y, u);

        if x.is_finite() && y.is_finite() {
            Point2D::new(x, y)
        } else {
            p1.position()
        }
    }

    /// Linearly interpolated position at `timestamp`.
    ///
    /// Clamps to the first/last point outside the covered range. `points`
    /// must be sorted by timestamp.
    pub fn position_at(points: &[SmoothedCursorPoint], timestamp: f64) -> Option<Point2D> {
        let first = points.first()?;
        let last = points.last()?;

        if timestamp <= first.timestamp {
            return Some(first.position());
        }
        if timestamp >= last.timestamp {
            return Some(last.position());
        }

        let idx = points.partition_point(|p| p.timestamp <= timestamp);
        let a = points[idx - 1];
        let b = points[idx];

        let duration = b.timestamp - a.timestamp;
        if duration <= f64::EPSILON {
            return Some(a.position());
        }

        let t = (timestamp - a.timestamp) / duration;
        Some(Point2D::lerp(&a.position(), &b.position(), t))
    }
}

impl Default for CursorSmoother {
    fn default() -> Self {
        Self::new(SmoothingConfig::default())
    }
}

/// Resample `samples` at `fps` with a Catmull-Rom spline.
pub fn smooth_positions(samples: &[CursorSample], fps: u32) -> Vec<SmoothedCursorPoint> {
    CursorSmoother::with_frame_rate(fps).smooth(samples)
}

/// Uniform Catmull-Rom basis for one coordinate.
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jittery_samples() -> Vec<CursorSample> {
        vec![
            CursorSample::new(0.0, 100.0, 100.0),
            CursorSample::new(0.013, 103.0, 98.0),
            CursorSample::new(0.041, 98.0, 102.0),
            CursorSample::new(0.050, 102.0, 99.0),
            CursorSample::new(0.087, 99.0, 101.0),
            CursorSample::new(0.100, 100.0, 100.0),
        ]
    }

    #[test]
    fn test_empty_and_single_pass_through() {
        assert!(smooth_positions(&[], 60).is_empty());

        let one = smooth_positions(&[CursorSample::new(1.0, 5.0, 6.0)], 60);
        assert_eq!(one, vec![SmoothedCursorPoint::new(1.0, 5.0, 6.0)]);
    }

    #[test]
    fn test_zero_span_yields_nothing() {
        let samples = vec![
            CursorSample::new(2.0, 0.0, 0.0),
            CursorSample::new(2.0, 10.0, 10.0),
        ];
        assert!(smooth_positions(&samples, 60).is_empty());
    }

    #[test]
    fn test_uniform_grid_and_count() {
        let samples = vec![
            CursorSample::new(0.5, 0.0, 0.0),
            CursorSample::new(1.5, 100.0, 0.0),
        ];
        let smoothed = smooth_positions(&samples, 30);

        assert_eq!(smoothed.len(), 31);
        assert_eq!(smoothed[0].timestamp, 0.5);
        for w in smoothed.windows(2) {
            assert!((w[1].timestamp - w[0].timestamp - 1.0 / 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_passes_through_input_samples() {
        let samples = vec![
            CursorSample::new(0.0, 0.0, 0.0),
            CursorSample::new(0.5, 50.0, 20.0),
            CursorSample::new(1.0, 80.0, 90.0),
        ];
        let smoothed = smooth_positions(&samples, 10);

        let at_half = smoothed
            .iter()
            .find(|p| (p.timestamp - 0.5).abs() < 1e-9)
            .unwrap();
        assert!((at_half.x - 50.0).abs() < 1e-9);
        assert!((at_half.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_motion_stays_on_line() {
        let samples: Vec<CursorSample> = (0..5)
            .map(|i| CursorSample::new(i as f64 * 0.25, i as f64 * 10.0, 40.0))
            .collect();
        let smoothed = smooth_positions(&samples, 60);
        for point in &smoothed {
            assert!((point.y - 40.0).abs() < 1e-9);
            assert!(point.x >= -1e-9 && point.x <= 40.0 + 1e-9);
        }
        assert!(smoothed.windows(2).all(|w| w[1].x >= w[0].x - 1e-9));

        // Interior spans of evenly spaced collinear samples are linear.
        let interior = smoothed
            .iter()
            .find(|p| (p.timestamp - 0.5).abs() < 0.01)
            .unwrap();
        assert!((interior.x - interior.timestamp * 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_and_unsorted_input() {
        let samples = vec![
            CursorSample::new(0.1, 10.0, 10.0),
            CursorSample::new(f64::NAN, 0.0, 0.0),
            CursorSample::new(0.0, 0.0, 0.0),
            CursorSample::new(0.2, f64::INFINITY, 0.0),
        ];
        let smoothed = smooth_positions(&samples, 60);
        assert!(!smoothed.is_empty());
        assert!(smoothed.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(smoothed[0].timestamp, 0.0);
    }

    #[test]
    fn test_jitter_output_is_finite_and_ordered() {
        let smoothed = smooth_positions(&jittery_samples(), 120);
        assert_eq!(smoothed.len(), 13);
        assert!(smoothed.windows(2).all(|w| w[1].timestamp > w[0].timestamp));
        assert!(smoothed.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_position_at_interpolation() {
        let data = vec![
            SmoothedCursorPoint::new(0.0, 0.0, 0.0),
            SmoothedCursorPoint::new(1.0, 1.0, 1.0),
        ];

        let mid = CursorSmoother::position_at(&data, 0.5).unwrap();
        assert!((mid.x - 0.5).abs() < 1e-9);
        assert!((mid.y - 0.5).abs() < 1e-9);

        assert_eq!(CursorSmoother::position_at(&data, -1.0), Some(Point2D::new(0.0, 0.0)));
        assert_eq!(CursorSmoother::position_at(&data, 9.0), Some(Point2D::new(1.0, 1.0)));
        assert_eq!(CursorSmoother::position_at(&[], 0.0), None);
    }
}
