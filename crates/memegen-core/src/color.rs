//! Color values shared by backgrounds, text overlays and ink.

use image::Rgba;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS-style color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and a handful of named colors.
    /// Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if let Some(hex) = input.strip_prefix('#') {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let channel = |s: &str| u8::from_str_radix(s, 16).ok();
            return match hex.len() {
                3 => Some(Self::new(
                    channel(&hex[0..1])? * 17,
                    channel(&hex[1..2])? * 17,
                    channel(&hex[2..3])? * 17,
                    255,
                )),
                6 => Some(Self::new(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                    255,
                )),
                8 => Some(Self::new(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                    channel(&hex[6..8])?,
                )),
                _ => None,
            };
        }

        match input.to_ascii_lowercase().as_str() {
            "black" => Some(Self::black()),
            "white" => Some(Self::white()),
            "red" => Some(Self::new(255, 0, 0, 255)),
            "green" => Some(Self::new(0, 128, 0, 255)),
            "blue" => Some(Self::new(0, 0, 255, 255)),
            "yellow" => Some(Self::new(255, 255, 0, 255)),
            "transparent" => Some(Self::transparent()),
            _ => None,
        }
    }

    /// Relative luminance in `[0, 1]` (Rec. 709 weights, no gamma correction).
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }

    /// Text color that reads well on top of this color.
    pub fn contrasting(self) -> Self {
        if self.luminance() < 0.5 {
            Self::white()
        } else {
            Self::black()
        }
    }

    /// Composite this color over `dst` (source-over), scaled by `coverage` in `[0, 1]`.
    pub fn blend_onto(self, dst: &mut Rgba<u8>, coverage: f64) {
        let sa = self.a as f64 / 255.0 * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let da = dst[3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= f64::EPSILON {
            *dst = Rgba([0, 0, 0, 0]);
            return;
        }

        let src = [self.r, self.g, self.b];
        for (i, s) in src.into_iter().enumerate() {
            let c = (s as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
            dst[i] = c.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for RgbaColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<RgbaColor> for Color {
    fn from(color: RgbaColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<RgbaColor> for Rgba<u8> {
    fn from(color: RgbaColor) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

impl From<Rgba<u8>> for RgbaColor {
    fn from(pixel: Rgba<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2], pixel[3])
    }
}
