//! HSL colors with CSS formatting

/// An HSL color with alpha. Saturation and lightness are percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    /// Fully saturated, opaque color
    pub const fn vivid(hue: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation: 100.0,
            lightness,
            alpha: 1.0,
        }
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// CSS color string (`hsl(...)` when opaque, `hsla(...)` otherwise)
    pub fn to_css(&self) -> String {
        if self.alpha >= 1.0 {
            format!(
                "hsl({}, {}%, {}%)",
                self.hue, self.saturation, self.lightness
            )
        } else {
            format!(
                "hsla({}, {}%, {}%, {})",
                self.hue, self.saturation, self.lightness, self.alpha
            )
        }
    }
}
