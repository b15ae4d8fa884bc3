//! Frame clock utilities.
//!
//! Output video is rendered at a fixed integer frame rate while every
//! algorithm in Cutframe works in fractional seconds. This module keeps the
//! conversions between the two in one place.

/// A fixed-rate frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    fps: u32,
}

impl FrameClock {
    /// Create a clock for the given frame rate. A rate of zero is bumped to 1.
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    /// Frames per second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Presentation time of the frame at `index`.
    pub fn frame_time_secs(&self, index: u64) -> f64 {
        index as f64 / self.fps as f64
    }

    /// Index of the frame on screen at `secs` (floor, clamped at zero).
    pub fn frame_at(&self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        // Nudge so that exact frame boundaries do not round down a frame.
        (secs * self.fps as f64 + 1e-9).floor() as u64
    }

    /// Number of frames needed to cover `duration_secs`.
    pub fn frame_count(&self, duration_secs: f64) -> u64 {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return 0;
        }
        (duration_secs * self.fps as f64 - 1e-9).ceil().max(1.0) as u64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time_and_index() {
        let clock = FrameClock::new(30);
        assert!((clock.frame_time_secs(15) - 0.5).abs() < 1e-12);
        assert_eq!(clock.frame_at(0.5), 15);
        assert_eq!(clock.frame_at(-1.0), 0);
    }

    #[test]
    fn test_frame_count_covers_duration() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.frame_count(1.0), 60);
        assert_eq!(clock.frame_count(1.001), 61);
        assert_eq!(clock.frame_count(0.0), 0);
        assert_eq!(clock.frame_count(f64::NAN), 0);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.fps(), 1);
        assert!((clock.frame_duration_secs() - 1.0).abs() < 1e-12);
    }

}
