//! Click effect animation state.

use serde::{Deserialize, Serialize};

use cutframe_timeline_model::cursor::ClickEffectStyle;
use cutframe_timeline_model::geometry::{Point2D, Rect, Size2D};
use cutframe_timeline_model::overlay::CursorOverlayState;

use crate::geometry::project_to_output;

/// A click effect that is animating at the query time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveClickEffect {
    pub style: ClickEffectStyle,

    /// Centre of the effect.
    pub center: Point2D,

    /// Animation progress `[0.0, 1.0]`.
    pub progress: f64,

    /// Current radius, in the same units as `center`.
    pub radius: f64,

    /// Current opacity `[0.0, 1.0]`.
    pub opacity: f64,
}

impl ActiveClickEffect {
    /// This effect mapped from `view` (overlay space) into output pixels.
    pub fn projected(&self, view: &Rect, output_size: Size2D) -> Option<ActiveClickEffect> {
        let center = project_to_output(self.center, view, output_size)?;
        Some(ActiveClickEffect {
            center,
            radius: self.radius * output_size.width / view.width,
            ..*self
        })
    }
}

/// Click effects animating at `t` (overlay space).
///
/// A click is live from its timestamp until `duration_secs` later. The
/// radius grows linearly to `max_radius` while the opacity fades from the
/// configured opacity to zero.
pub fn active_click_effects(state: &CursorOverlayState, t: f64) -> Vec<ActiveClickEffect> {
    let effect = &state.settings.click_effect;
    if effect.style == ClickEffectStyle::None
        || !(effect.duration_secs > 0.0)
        || !t.is_finite()
    {
        return Vec::new();
    }

    let opacity = effect.opacity.clamp(0.0, 1.0);
    let max_radius = effect.max_radius.max(0.0);

    state
        .clicks
        .iter()
        .filter_map(|click| {
            let elapsed = t - click.timestamp;
            if elapsed < 0.0 || elapsed >= effect.duration_secs {
                return None;
            }

            let progress = elapsed / effect.duration_secs;
            Some(ActiveClickEffect {
                style: effect.style,
                center: click.position(),
                progress,
                radius: max_radius * progress,
                opacity: opacity * (1.0 - progress),
            })
        })
        .collect()
}
