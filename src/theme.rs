//! Themes and the theme registry.
//!
//! A [`Theme`] is plain data: a background, a color ramp over remaining life,
//! a shape, and the base speed/size particles are randomized from. Themes
//! never change after creation. The [`ThemeRegistry`] only moves a cursor
//! over them.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ThemeRegistry::new(presets::galaxy_themes())?;
//! let first = registry.current().clone();
//! registry.advance();
//! assert_ne!(registry.current(), &first);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::error::ConfigError;
use crate::shapes::Shape;

/// Maximum number of gradient stops a background may carry.
pub const MAX_STOPS: usize = 4;

/// Default lifespan in ticks.
pub const DEFAULT_LIFESPAN: u32 = 180;

/// Background painted behind the particles.
///
/// Stops are spread evenly along the gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Single flat color.
    Solid {
        /// Fill color.
        color: Rgb,
    },
    /// Linear gradient across the window.
    ///
    /// `angle_deg` follows CSS: 0 points up, 90 points right.
    Linear {
        /// Gradient direction in degrees.
        angle_deg: f32,
        /// Colors from start to end.
        stops: Vec<Rgb>,
    },
    /// Circular gradient from the center out to the farthest corner.
    Radial {
        /// Colors from center to edge.
        stops: Vec<Rgb>,
    },
}

impl Background {
    /// Gradient stops in order. A solid background has one.
    pub fn stops(&self) -> &[Rgb] {
        match self {
            Background::Solid { color } => std::slice::from_ref(color),
            Background::Linear { stops, .. } | Background::Radial { stops } => stops,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let count = self.stops().len();
        if count == 0 || count > MAX_STOPS {
            return Err(ConfigError::InvalidValue(format!(
                "background needs 1 to {} stops, got {}",
                MAX_STOPS, count
            )));
        }
        Ok(())
    }
}

/// Maps remaining life to a color.
///
/// Hue drifts with remaining life and alpha fades linearly to zero:
/// `hsla(hue + life * hue_per_life, saturation%, lightness%, life / lifespan)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    /// Base hue in degrees.
    pub hue: f32,
    /// Hue shift per tick of remaining life.
    #[serde(default = "default_hue_per_life")]
    pub hue_per_life: f32,
    /// Saturation in percent.
    pub saturation: f32,
    /// Lightness in percent.
    pub lightness: f32,
}

fn default_hue_per_life() -> f32 {
    0.2
}

fn default_lifespan() -> u32 {
    DEFAULT_LIFESPAN
}

impl ColorRamp {
    /// Ramp with the default hue drift of one degree per five ticks.
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            hue_per_life: 0.2,
            saturation,
            lightness,
        }
    }

    /// Color for a particle with `remaining_life` ticks left out of `lifespan`.
    pub fn at(&self, remaining_life: i32, lifespan: u32) -> Rgba {
        let life = remaining_life as f32;
        let alpha = if lifespan == 0 { 0.0 } else { life / lifespan as f32 };
        Rgba::from_hsla(
            self.hue + life * self.hue_per_life,
            self.saturation,
            self.lightness,
            alpha,
        )
    }
}

/// An immutable visual theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name.
    pub name: String,
    /// Background behind the particles.
    pub background: Background,
    /// Particle color over remaining life.
    pub color: ColorRamp,
    /// Particle shape.
    pub shape: Shape,
    /// Upper bound of the random part of particle speed.
    pub base_speed: f32,
    /// Upper bound of the random part of particle size.
    pub base_size: f32,
    /// Ticks a particle lives. Also normalizes the color ramp's alpha.
    #[serde(default = "default_lifespan")]
    pub lifespan: u32,
}

impl Theme {
    /// Color of a particle of this theme with `remaining_life` ticks left.
    pub fn color_of(&self, remaining_life: i32) -> Rgba {
        self.color.at(remaining_life, self.lifespan)
    }

    /// Check that every numeric field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |what: &str| {
            ConfigError::InvalidValue(format!("theme '{}': {}", self.name, what))
        };
        if !(self.base_speed > 0.0 && self.base_speed.is_finite()) {
            return Err(invalid("base_speed must be positive"));
        }
        if !(self.base_size > 0.0 && self.base_size.is_finite()) {
            return Err(invalid("base_size must be positive"));
        }
        if self.lifespan == 0 || self.lifespan > i32::MAX as u32 {
            return Err(invalid("lifespan must be between 1 and 2147483647"));
        }
        self.background.validate()
    }
}

/// Ordered, non-empty sequence of themes with one active entry.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Arc<Theme>>,
    index: usize,
}

impl ThemeRegistry {
    /// Create a registry starting at the first theme.
    ///
    /// Fails if `themes` is empty or any theme is invalid.
    pub fn new(themes: Vec<Theme>) -> Result<Self, ConfigError> {
        if themes.is_empty() {
            return Err(ConfigError::NoThemes);
        }
        for theme in &themes {
            theme.validate()?;
        }
        Ok(Self {
            themes: themes.into_iter().map(Arc::new).collect(),
            index: 0,
        })
    }

    /// The active theme.
    #[inline]
    pub fn current(&self) -> &Arc<Theme> {
        &self.themes[self.index]
    }

    /// Index of the active theme.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of themes.
    #[inline]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always `false`; a registry holds at least one theme.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// All themes in order.
    pub fn themes(&self) -> &[Arc<Theme>] {
        &self.themes
    }

    /// Move to the next theme, wrapping after the last one.
    ///
    /// Returns the newly active theme. Particles already spawned keep the
    /// theme they were created with.
    pub fn advance(&mut self) -> &Arc<Theme> {
        self.index = (self.index + 1) % self.themes.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(name: &str, shape: Shape) -> Theme {
        Theme {
            name: name.into(),
            background: Background::Solid { color: Rgb::BLACK },
            color: ColorRamp::new(120.0, 90.0, 70.0),
            shape,
            base_speed: 0.5,
            base_size: 10.0,
            lifespan: 180,
        }
    }

    #[test]
    fn test_registry_rejects_empty() {
        assert!(matches!(ThemeRegistry::new(vec![]), Err(ConfigError::NoThemes)));
    }

    #[test]
    fn test_registry_rejects_invalid_theme() {
        let mut bad = theme("bad", Shape::Star);
        bad.base_size = 0.0;
        assert!(ThemeRegistry::new(vec![bad]).is_err());
    }

    #[test]
    fn test_advance_wraps() {
        let mut registry = ThemeRegistry::new(vec![
            theme("a", Shape::Star),
            theme("b", Shape::Flame),
            theme("c", Shape::Burst),
        ])
        .unwrap();
        assert_eq!(registry.index(), 0);

        for k in 1..=7 {
            registry.advance();
            assert_eq!(registry.index(), k % 3);
        }
        assert_eq!(registry.current().name, "b");
    }

    #[test]
    fn test_single_theme_advance_stays() {
        let mut registry = ThemeRegistry::new(vec![theme("only", Shape::Circle)]).unwrap();
        registry.advance();
        assert_eq!(registry.index(), 0);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_color_ramp_matches_hsla_formula() {
        let t = theme("a", Shape::Star);
        let c = t.color_of(90);
        let expected = Rgba::from_hsla(120.0 + 90.0 / 5.0, 90.0, 70.0, 0.5);
        assert!((c.r - expected.r).abs() < 1e-5);
        assert!((c.g - expected.g).abs() < 1e-5);
        assert!((c.b - expected.b).abs() < 1e-5);
        assert!((c.a - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_color_ramp_alpha_bounds() {
        let t = theme("a", Shape::Star);
        assert_eq!(t.color_of(180).a, 1.0);
        assert_eq!(t.color_of(0).a, 0.0);
        assert_eq!(t.color_of(-3).a, 0.0);
    }

    #[test]
    fn test_lifespan_bounds() {
        let mut t = theme("a", Shape::Star);
        t.lifespan = 0;
        assert!(t.validate().is_err());
        t.lifespan = i32::MAX as u32 + 1;
        assert!(t.validate().is_err());
        t.lifespan = i32::MAX as u32;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_background_stop_limits() {
        let too_many = Background::Radial {
            stops: vec![Rgb::BLACK; MAX_STOPS + 1],
        };
        assert!(too_many.validate().is_err());
        let none = Background::Linear {
            angle_deg: 45.0,
            stops: vec![],
        };
        assert!(none.validate().is_err());
        assert_eq!(Background::Solid { color: Rgb::BLACK }.stops().len(), 1);
    }

    #[test]
    fn test_theme_json_defaults() {
        let json = r##"{
            "name": "green",
            "background": { "kind": "radial", "stops": ["#00251a", "#00cc66"] },
            "color": { "hue": 120, "saturation": 90, "lightness": 70 },
            "shape": "star",
            "base_speed": 0.5,
            "base_size": 14
        }"##;
        let t: Theme = serde_json::from_str(json).unwrap();
        assert_eq!(t.lifespan, DEFAULT_LIFESPAN);
        assert_eq!(t.color.hue_per_life, 0.2);
        assert_eq!(t.background.stops()[1], Rgb::hex(0x00cc66));
    }
}
