//! Remap table construction.
//!
//! Walks the enabled segments in source order and integrates playback
//! speed over source time to produce a densely sampled
//! [`TimeRemapTable`].
//!
//! # Speed ramps
//!
//! Where two consecutive enabled segments play at different speeds the
//! speed does not switch instantly. A ramp zone of `half` seconds on each
//! side of the boundary eases the instantaneous speed between the two with
//! a smoothstep. `half` is the configured half-ramp width clamped to half of
//! the shorter neighbour, so zones from both ends of a segment never
//! overlap. Composition time inside a zone is the integral of `1 / speed`.
//!
//! Disabled segments advance nothing; the source time of the next enabled
//! segment simply jumps forward.

use cutframe_common::config::ProcessingDefaults;
use cutframe_timeline_model::easing::smoothstep;
use cutframe_timeline_model::segment::{Segment, TimeRemapEntry, TimeRemapTable};

/// Tunables for [`build_time_remap_table_with`].
#[derive(Debug, Clone)]
pub struct RemapConfig {
    /// Maximum ramp width on each side of a speed change (seconds).
    pub half_ramp_secs: f64,

    /// Source-time distance between table samples (seconds).
    pub sample_step_secs: f64,

    /// Speed difference below which two segments count as equal.
    pub speed_epsilon: f64,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            half_ramp_secs: 0.5,
            sample_step_secs: 1.0 / 60.0,
            speed_epsilon: 0.01,
        }
    }
}

impl From<&ProcessingDefaults> for RemapConfig {
    fn from(defaults: &ProcessingDefaults) -> Self {
        Self {
            half_ramp_secs: defaults.half_ramp_secs,
            sample_step_secs: defaults.ramp_sample_step_secs,
            ..Default::default()
        }
    }
}

impl RemapConfig {
    fn sanitized_step(&self) -> f64 {
        if self.sample_step_secs.is_finite() {
            self.sample_step_secs.clamp(1e-4, 1.0)
        } else {
            Self::default().sample_step_secs
        }
    }

    fn sanitized_half_ramp(&self) -> f64 {
        if self.half_ramp_secs.is_finite() {
            self.half_ramp_secs.max(0.0)
        } else {
            0.0
        }
    }
}

/// Build the remap table with default tunables.
pub fn build_time_remap_table(segments: &[Segment]) -> TimeRemapTable {
    build_time_remap_table_with(segments, &RemapConfig::default())
}

/// An enabled segment normalized for integration.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    end: f64,
    speed: f64,
}

impl Span {
    fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Build the remap table for `segments`.
///
/// An empty segment list, or one with no playable enabled segment, yields
/// the identity table.
pub fn build_time_remap_table_with(segments: &[Segment], config: &RemapConfig) -> TimeRemapTable {
    let spans = playable_spans(segments);
    if spans.is_empty() {
        tracing::debug!(
            segments = segments.len(),
            "No enabled segments; using identity remap"
        );
        return TimeRemapTable::identity();
    }

    let ramps = boundary_ramps(&spans, config);
    let step = config.sanitized_step();

    let mut entries: Vec<TimeRemapEntry> = Vec::new();
    let mut composition_time = 0.0;

    for (i, span) in spans.iter().enumerate() {
        let start_entry = TimeRemapEntry::new(composition_time, span.start);
        let contiguous = entries.last().is_some_and(|last| {
            (last.source_time - start_entry.source_time).abs() < 1e-9
                && (last.composition_time - start_entry.composition_time).abs() < 1e-9
        });
        if !contiguous {
            entries.push(start_entry);
        }

        let steps = ((span.duration() / step).ceil() as usize).max(1);
        let ds = span.duration() / steps as f64;

        for k in 0..steps {
            let s0 = span.start + ds * k as f64;
            let s1 = if k + 1 == steps {
                span.end
            } else {
                span.start + ds * (k + 1) as f64
            };
            let sm = 0.5 * (s0 + s1);

            // Simpson's rule on 1 / speed.
            let inv0 = 1.0 / speed_at(&spans, &ramps, i, s0);
            let inv_m = 1.0 / speed_at(&spans, &ramps, i, sm);
            let inv1 = 1.0 / speed_at(&spans, &ramps, i, s1);
            composition_time += (s1 - s0) / 6.0 * (inv0 + 4.0 * inv_m + inv1);

            entries.push(TimeRemapEntry::new(composition_time, s1));
        }
    }

    tracing::debug!(
        segments = segments.len(),
        enabled = spans.len(),
        entries = entries.len(),
        output_secs = composition_time,
        "Built time remap table"
    );

    TimeRemapTable::new(entries)
}

/// Enabled, non-empty segments sorted by start with overlaps trimmed.
fn playable_spans(segments: &[Segment]) -> Vec<Span> {
    let mut enabled: Vec<&Segment> = segments
        .iter()
        .filter(|s| s.is_enabled && s.start_time.is_finite() && s.end_time.is_finite())
        .collect();
    enabled.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut spans: Vec<Span> = Vec::with_capacity(enabled.len());
    for segment in enabled {
        let floor = spans.last().map_or(f64::NEG_INFINITY, |s| s.end);
        let start = segment.start_time.max(floor);
        if segment.end_time - start <= 1e-9 {
            continue;
        }
        spans.push(Span {
            start,
            end: segment.end_time,
            speed: segment.effective_speed(),
        });
    }
    spans
}

/// Half-width of the ramp at the boundary *before* each span (0 = no ramp).
fn boundary_ramps(spans: &[Span], config: &RemapConfig) -> Vec<f64> {
    let half_ramp = config.sanitized_half_ramp();
    let mut ramps = vec![0.0; spans.len()];
    for i in 1..spans.len() {
        let prev = spans[i - 1];
        let curr = spans[i];
        if (curr.speed - prev.speed).abs() > config.speed_epsilon {
            ramps[i] = half_ramp
                .min(prev.duration() / 2.0)
                .min(curr.duration() / 2.0);
        }
    }
    ramps
}

/// Instantaneous playback speed at `source_time` inside span `i`.
fn speed_at(spans: &[Span], ramps: &[f64], i: usize, source_time: f64) -> f64 {
    let span = spans[i];

    let half_in = ramps[i];
    if half_in > 0.0 && source_time < span.start + half_in {
        let from = spans[i - 1].speed;
        let u = 0.5 + (source_time - span.start) / (2.0 * half_in);
        return from + (span.speed - from) * smoothstep(u);
    }

    let half_out = ramps.get(i + 1).copied().unwrap_or(0.0);
    if half_out > 0.0 && source_time > span.end - half_out {
        let to = spans[i + 1].speed;
        let u = (source_time - (span.end - half_out)) / (2.0 * half_out);
        return span.speed + (to - span.speed) * smoothstep(u);
    }

    span.speed
}
