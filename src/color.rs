//! Color values used by themes and the renderer.
//!
//! Components are sRGB floats in `0.0..=1.0`. Colors are blended the way a
//! 2D canvas blends them, without a linear-space conversion, so the values
//! here go to the GPU untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque RGB color, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
}

impl Rgb {
    /// Solid black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from components (0-1).
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` literal.
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::new(r, g, b)
    }

    /// Attach an alpha value.
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Convert to array format, padded with full alpha.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Rgb::hex(value)),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = (value >> 8) & 0xF;
                let g = (value >> 4) & 0xF;
                let b = value & 0xF;
                Ok(Rgb::hex((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }
}

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from components (0-1).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from CSS-style HSLA.
    ///
    /// `hue` is in degrees and wraps, `saturation` and `lightness` are
    /// percentages, `alpha` is clamped to 0-1.
    pub fn from_hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self::new(r + m, g + m, b + m, alpha.clamp(0.0, 1.0))
    }

    /// Returns a new color with different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-4
            && (a.g - b.g).abs() < 1e-4
            && (a.b - b.b).abs() < 1e-4
            && (a.a - b.a).abs() < 1e-4
    }

    #[test]
    fn test_parse_hex() {
        let c: Rgb = "#00cc66".parse().unwrap();
        assert_eq!(c, Rgb::hex(0x00cc66));
        assert_eq!(c.to_string(), "#00cc66");
    }

    #[test]
    fn test_parse_short_hex() {
        let c: Rgb = "#000".parse().unwrap();
        assert_eq!(c, Rgb::BLACK);
        let c: Rgb = "#f80".parse().unwrap();
        assert_eq!(c, Rgb::hex(0xff8800));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("00cc66".parse::<Rgb>().is_err());
        assert!("#00cc6".parse::<Rgb>().is_err());
        assert!("#00zz66".parse::<Rgb>().is_err());
        assert!("#+0cc66".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(close(Rgba::from_hsla(0.0, 100.0, 50.0, 1.0), Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(Rgba::from_hsla(120.0, 100.0, 50.0, 1.0), Rgba::new(0.0, 1.0, 0.0, 1.0)));
        assert!(close(Rgba::from_hsla(240.0, 100.0, 50.0, 0.5), Rgba::new(0.0, 0.0, 1.0, 0.5)));
    }

    #[test]
    fn test_hsla_hue_wraps() {
        let a = Rgba::from_hsla(30.0, 90.0, 70.0, 1.0);
        let b = Rgba::from_hsla(390.0, 90.0, 70.0, 1.0);
        assert!(close(a, b));
    }

    #[test]
    fn test_hsla_grey_when_unsaturated() {
        let c = Rgba::from_hsla(200.0, 0.0, 25.0, 1.0);
        assert!(close(c, Rgba::new(0.25, 0.25, 0.25, 1.0)));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Rgb::hex(0x1a237e)).unwrap();
        assert_eq!(json, "\"#1a237e\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::hex(0x1a237e));
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
