//! Easing helpers shared by speed ramps, zoom transitions, and cut bridges.

/// Hermite smoothstep `3u² - 2u³`, with `u` clamped to `[0, 1]`.
///
/// Non-finite input maps to `0.0`.
pub fn smoothstep(u: f64) -> f64 {
    if !u.is_finite() {
        return 0.0;
    }
    let u = u.clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
