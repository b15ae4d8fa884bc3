//! Segments and the source/composition time mapping.
//!
//! A recording is split into contiguous [`Segment`]s. Each segment has a
//! playback speed and can be disabled. The [`TimeRemapTable`] samples the
//! resulting piecewise mapping between *composition time* (the edited
//! output) and *source time* (the original recording).

use serde::{Deserialize, Serialize};

/// Slowest allowed playback speed.
pub const MIN_SPEED: f64 = 0.25;

/// Fastest allowed playback speed.
pub const MAX_SPEED: f64 = 32.0;

/// A contiguous slice of the source timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Editor-assigned identifier.
    pub id: String,

    /// Start in source seconds.
    pub start_time: f64,

    /// End in source seconds (exclusive, `> start_time`).
    pub end_time: f64,

    /// Playback speed multiplier in `[MIN_SPEED, MAX_SPEED]`.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Disabled segments are cut from the output.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_speed() -> f64 {
    1.0
}

fn default_enabled() -> bool {
    true
}

impl Segment {
    /// Create an enabled segment at 1x.
    pub fn new(id: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            id: id.into(),
            start_time,
            end_time,
            speed: 1.0,
            is_enabled: true,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    /// Source duration in seconds (never negative).
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// Speed clamped to the supported range. Non-finite speeds play at 1x.
    pub fn effective_speed(&self) -> f64 {
        if self.speed.is_finite() {
            self.speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        }
    }

    /// Output duration when played at speed, ignoring ramps. Zero when disabled.
    pub fn output_duration(&self) -> f64 {
        if self.is_enabled {
            self.duration() / self.effective_speed()
        } else {
            0.0
        }
    }
}

/// Split `[0, source_duration]` at the given points into enabled 1x segments.
///
/// Points outside the open interval, or closer than a millisecond to an
/// existing boundary, are ignored.
pub fn split_segments(source_duration: f64, split_points: &[f64]) -> Vec<Segment> {
    if !(source_duration > 0.0) {
        return vec![];
    }

    let mut cuts: Vec<f64> = split_points
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t > 0.0 && *t < source_duration)
        .collect();
    cuts.sort_by(f64::total_cmp);

    let mut boundaries = vec![0.0];
    for cut in cuts {
        if cut - boundaries[boundaries.len() - 1] > 1e-3 && source_duration - cut > 1e-3 {
            boundaries.push(cut);
        }
    }
    boundaries.push(source_duration);

    boundaries
        .windows(2)
        .enumerate()
        .map(|(i, w)| Segment::new(format!("segment-{i}"), w[0], w[1]))
        .collect()
}

/// Total output duration implied by enabled segments and speeds, ignoring ramps.
pub fn expected_output_duration(segments: &[Segment]) -> f64 {
    segments.iter().map(Segment::output_duration).sum()
}

/// One sample of the composition/source mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRemapEntry {
    pub composition_time: f64,
    pub source_time: f64,
}

impl TimeRemapEntry {
    pub fn new(composition_time: f64, source_time: f64) -> Self {
        Self {
            composition_time,
            source_time,
        }
    }
}

/// A pair of adjacent entries across which source time jumps forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discontinuity {
    pub before: TimeRemapEntry,
    pub after: TimeRemapEntry,
}

impl Discontinuity {
    /// Source seconds skipped by the jump.
    pub fn skipped_secs(&self) -> f64 {
        self.after.source_time - self.before.source_time
    }
}

/// Ordered samples of the composition/source mapping.
///
/// Both `composition_time` and `source_time` are non-decreasing across the
/// whole table. An empty table is the identity mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRemapTable {
    pub entries: Vec<TimeRemapEntry>,
}

impl TimeRemapTable {
    pub fn new(entries: Vec<TimeRemapEntry>) -> Self {
        Self { entries }
    }

    /// The identity mapping.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output duration, or `None` for the identity table.
    pub fn total_duration(&self) -> Option<f64> {
        self.entries.last().map(|e| e.composition_time)
    }

    /// Source time shown at `composition_time`.
    ///
    /// Linear interpolation between the bracketing entries, clamped to the
    /// first/last entry outside the table. At a cut (two entries sharing a
    /// composition time) the later entry wins.
    pub fn source_time(&self, composition_time: f64) -> f64 {
        let entries = &self.entries;
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            return composition_time;
        };

        if !(composition_time > first.composition_time) {
            return first.source_time;
        }
        if composition_time >= last.composition_time {
            return last.source_time;
        }

        let idx = entries.partition_point(|e| e.composition_time <= composition_time);
        let a = entries[idx - 1];
        let b = entries[idx];
        let span = b.composition_time - a.composition_time;
        if span <= f64::EPSILON {
            return a.source_time;
        }

        let t = (composition_time - a.composition_time) / span;
        a.source_time + (b.source_time - a.source_time) * t
    }

    /// Composition time at which `source_time` is shown.
    ///
    /// Inverse of [`source_time`](Self::source_time). Source times inside a
    /// cut collapse onto the composition time of the cut.
    pub fn composition_time(&self, source_time: f64) -> f64 {
        let entries = &self.entries;
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            return source_time;
        };

        if !(source_time > first.source_time) {
            return first.composition_time;
        }
        if source_time >= last.source_time {
            return last.composition_time;
        }

        let idx = entries.partition_point(|e| e.source_time <= source_time);
        let a = entries[idx - 1];
        let b = entries[idx];
        let span = b.source_time - a.source_time;
        if span <= f64::EPSILON {
            return a.composition_time;
        }

        let t = (source_time - a.source_time) / span;
        a.composition_time + (b.composition_time - a.composition_time) * t
    }

    /// The entry whose source time is closest to `source_time`.
    pub fn nearest_by_source(&self, source_time: f64) -> Option<&TimeRemapEntry> {
        if self.entries.is_empty() || !source_time.is_finite() {
            return None;
        }

        let idx = self.entries.partition_point(|e| e.source_time < source_time);
        let after = self.entries.get(idx);
        let before = idx.checked_sub(1).and_then(|i| self.entries.get(i));

        match (before, after) {
            (Some(b), Some(a)) => {
                if (source_time - b.source_time).abs() <= (a.source_time - source_time).abs() {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, a) => a,
        }
    }

    /// Cuts: adjacent entries where composition time stands still while
    /// source time jumps by more than `threshold_secs`.
    pub fn discontinuities(&self, threshold_secs: f64) -> Vec<Discontinuity> {
        self.entries
            .windows(2)
            .filter(|w| {
                w[1].composition_time - w[0].composition_time <= 1e-9
                    && w[1].source_time - w[0].source_time > threshold_secs
            })
            .map(|w| Discontinuity {
                before: w[0],
                after: w[1],
            })
            .collect()
    }

    /// Whether both columns are non-decreasing.
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|w| {
            w[1].composition_time >= w[0].composition_time && w[1].source_time >= w[0].source_time
        })
    }
}
