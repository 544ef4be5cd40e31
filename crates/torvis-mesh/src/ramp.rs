use serde::Deserialize;

use super::Color;

/// Two-segment color ramp over `progress ∈ [0, 1]`.
///
/// Semantics:
/// - `[0, 0.5]` interpolates `start → mid`
/// - `(0.5, 1]` interpolates `mid → end`
/// - output alpha is always `1.0`; endpoint alpha is ignored
///
/// Both halves meet at `mid`, so the ramp is continuous at the breakpoint.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct ColorRamp {
    pub start: Color,
    pub mid: Color,
    pub end: Color,
}

impl ColorRamp {
    /// Pale cyan → red → pale cyan.
    pub const CORAL: ColorRamp = ColorRamp::new(
        Color::rgb(0.5, 0.9, 0.9),
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(0.5, 0.9, 0.9),
    );

    /// Lavender → yellow → lavender.
    pub const AMBER: ColorRamp = ColorRamp::new(
        Color::rgb(0.5, 0.5, 0.9),
        Color::rgb(1.0, 1.0, 0.0),
        Color::rgb(0.5, 0.5, 0.9),
    );

    pub const BREAKPOINT: f32 = 0.5;

    #[inline]
    pub const fn new(start: Color, mid: Color, end: Color) -> Self {
        Self { start, mid, end }
    }

    /// Evaluates the ramp. `progress` outside `[0, 1]` is clamped.
    pub fn eval(&self, progress: f32) -> Color {
        let p = progress.clamp(0.0, 1.0);
        let c = if p <= Self::BREAKPOINT {
            Color::lerp(self.start, self.mid, p * 2.0)
        } else {
            let reverse_progress = (p - Self::BREAKPOINT) * 2.0;
            Color::lerp(self.mid, self.end, reverse_progress)
        };
        c.with_alpha(1.0)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.mid.is_finite() && self.end.is_finite()
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp::CORAL
    }
}
