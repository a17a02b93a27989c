//! Built-in theme tables and engine presets.
//!
//! Two generations of the effect ship with the crate:
//!
//! - **Galaxy** (default): stars, flames, flowers and bursts on deep
//!   gradients. Long-lived particles (180 ticks), gentle attraction, at most
//!   100 particles on screen, themes change every 6 seconds.
//! - **Classic**: every shape, shorter life (150 ticks), faster decay and
//!   drift, no particle cap, themes change every 5 seconds.

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::config::{BatchSizes, EffectConfig, EngineConfig, MotionConfig, SpawnConfig};
use crate::error::ConfigError;
use crate::shapes::Shape;
use crate::theme::{Background, ColorRamp, Theme};

/// A named, complete effect configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Star field themes, capped at 100 particles.
    #[default]
    Galaxy,
    /// All eight shapes, uncapped.
    Classic,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Preset; 2] = [Preset::Galaxy, Preset::Classic];

    /// Lower-case preset name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Galaxy => "galaxy",
            Preset::Classic => "classic",
        }
    }

    /// Engine constants for this preset.
    pub fn engine(self) -> EngineConfig {
        match self {
            Preset::Galaxy => EngineConfig::default(),
            Preset::Classic => EngineConfig {
                spawn: SpawnConfig::default(),
                motion: MotionConfig {
                    attraction_factor: 1.0,
                    drift_rate: 0.05,
                    drift_factor: 1.5,
                    size_decay: 0.99,
                },
                batch: BatchSizes::uniform(3),
                capacity: None,
            },
        }
    }

    /// Theme table for this preset.
    pub fn themes(self) -> Vec<Theme> {
        match self {
            Preset::Galaxy => galaxy_themes(),
            Preset::Classic => classic_themes(),
        }
    }

    /// Full effect configuration for this preset.
    pub fn config(self) -> EffectConfig {
        let theme_interval_ms = match self {
            Preset::Galaxy => 6000,
            Preset::Classic => 5000,
        };
        EffectConfig {
            engine: self.engine(),
            theme_interval_ms,
            fade: 0.15,
            themes: self.themes(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::InvalidValue(format!("unknown preset '{}'", s)))
    }
}

fn radial(stops: &[u32]) -> Background {
    Background::Radial {
        stops: stops.iter().map(|&c| Rgb::hex(c)).collect(),
    }
}

fn linear(angle_deg: f32, stops: &[u32]) -> Background {
    Background::Linear {
        angle_deg,
        stops: stops.iter().map(|&c| Rgb::hex(c)).collect(),
    }
}

fn theme(
    name: &str,
    background: Background,
    color: ColorRamp,
    shape: Shape,
    base_speed: f32,
    base_size: f32,
    lifespan: u32,
) -> Theme {
    Theme {
        name: name.to_string(),
        background,
        color,
        shape,
        base_speed,
        base_size,
        lifespan,
    }
}

/// The galaxy theme table.
pub fn galaxy_themes() -> Vec<Theme> {
    const LIFE: u32 = 180;
    vec![
        theme(
            "Emerald Nebula",
            radial(&[0x00251a, 0x00cc66, 0x66ff99]),
            ColorRamp::new(120.0, 90.0, 70.0),
            Shape::Star,
            0.5,
            14.0,
            LIFE,
        ),
        theme(
            "Cosmic Void",
            radial(&[0x1a0033, 0x0d001a, 0x000000]),
            ColorRamp::new(200.0, 80.0, 70.0),
            Shape::Star,
            0.6,
            10.0,
            LIFE,
        ),
        theme(
            "Golden Cluster",
            radial(&[0x332600, 0xffcc00, 0xffff66]),
            ColorRamp::new(60.0, 90.0, 70.0),
            Shape::Star,
            0.5,
            12.0,
            LIFE,
        ),
        theme(
            "Red Giant",
            linear(135.0, &[0x330000, 0xff3333, 0xff6666]),
            ColorRamp::new(0.0, 90.0, 60.0),
            Shape::Flame,
            0.7,
            11.0,
            LIFE,
        ),
        theme(
            "Violet Bloom",
            radial(&[0x2d0040, 0x6600cc, 0xcc00ff]),
            ColorRamp::new(270.0, 90.0, 60.0),
            Shape::Flower,
            0.4,
            11.0,
            LIFE,
        ),
        theme(
            "Indigo Flare",
            linear(45.0, &[0x1a237e, 0x3f51b5, 0xff8f00]),
            ColorRamp::new(240.0, 80.0, 60.0),
            Shape::Burst,
            0.6,
            9.0,
            LIFE,
        ),
    ]
}

/// The classic theme table, one theme per shape.
pub fn classic_themes() -> Vec<Theme> {
    const LIFE: u32 = 150;
    vec![
        theme(
            "Starlight",
            linear(180.0, &[0x000428, 0x004e92]),
            ColorRamp::new(50.0, 100.0, 70.0),
            Shape::Star,
            1.0,
            10.0,
            LIFE,
        ),
        theme(
            "Ember",
            linear(180.0, &[0x1a0000, 0x8b0000, 0xff4500]),
            ColorRamp::new(10.0, 100.0, 60.0),
            Shape::Flame,
            1.2,
            12.0,
            LIFE,
        ),
        theme(
            "Tide",
            linear(90.0, &[0x001f3f, 0x0074d9, 0x7fdbff]),
            ColorRamp::new(190.0, 90.0, 65.0),
            Shape::Wave,
            1.0,
            10.0,
            LIFE,
        ),
        theme(
            "Vortex",
            radial(&[0x0f0c29, 0x302b63, 0x24243e]),
            ColorRamp::new(280.0, 85.0, 65.0),
            Shape::Spiral,
            0.9,
            12.0,
            LIFE,
        ),
        theme(
            "Honeycomb",
            radial(&[0x3e2723, 0xff8f00, 0xffd54f]),
            ColorRamp::new(30.0, 95.0, 60.0),
            Shape::Hexagon,
            0.8,
            9.0,
            LIFE,
        ),
        theme(
            "Petals",
            linear(45.0, &[0x4a0033, 0xc2185b, 0xf8bbd0]),
            ColorRamp::new(330.0, 90.0, 70.0),
            Shape::Flower,
            0.7,
            12.0,
            LIFE,
        ),
        theme(
            "Supernova",
            radial(&[0x000000, 0x1b1b3a, 0x693668]),
            ColorRamp::new(300.0, 100.0, 65.0),
            Shape::Burst,
            1.1,
            10.0,
            LIFE,
        ),
        theme(
            "Bubbles",
            Background::Solid {
                color: Rgb::hex(0x05080f),
            },
            ColorRamp::new(160.0, 80.0, 60.0),
            Shape::Circle,
            1.0,
            6.0,
            LIFE,
        ),
    ]
}
