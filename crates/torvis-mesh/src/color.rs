use serde::Deserialize;

/// Linear straight-alpha RGBA color.
///
/// Unlike a compositing color this is *not* premultiplied: the mesh shader
/// writes the channels as-is and the pipeline does no blending.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    /// Clear color of every panel.
    pub const LIGHT_GRAY: Color = Color::rgb(0.95, 0.95, 0.95);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Returns the same color with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between `a` and `b`.
    ///
    /// Evaluated as `a·(1−t) + b·t` so both endpoints are reproduced exactly.
    #[inline]
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let s = 1.0 - t;
        Color {
            r: a.r * s + b.r * t,
            g: a.g * s + b.g * t,
            b: a.b * s + b.b * t,
            a: a.a * s + b.a * t,
        }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Color::new(r, g, b, a)
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

/// Config-file spelling: `[r, g, b]` or `[r, g, b, a]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgba([f32; 4]),
    Rgb([f32; 3]),
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Rgba(c) => c.into(),
            ColorRepr::Rgb(c) => c.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        c: Color,
    }

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let a = Color::rgb(0.5, 0.9, 0.9);
        let b = Color::rgb(1.0, 0.0, 0.0);
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint() {
        let c = Color::lerp(Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 0.5, 0.25), 0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.g - 0.25).abs() < 1e-6);
        assert!((c.b - 0.125).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn deserialize_rgb_is_opaque() {
        let h: Holder = toml::from_str("c = [0.1, 0.2, 0.3]").unwrap();
        assert_eq!(h.c, Color::rgb(0.1, 0.2, 0.3));
    }

    #[test]
    fn deserialize_rgba() {
        let h: Holder = toml::from_str("c = [0.1, 0.2, 0.3, 0.5]").unwrap();
        assert_eq!(h.c, Color::new(0.1, 0.2, 0.3, 0.5));
    }

    #[test]
    fn deserialize_rejects_two_channels() {
        assert!(toml::from_str::<Holder>("c = [0.1, 0.2]").is_err());
    }
}
