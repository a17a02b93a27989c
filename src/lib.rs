//! # glowtrail
//!
//! Pointer-reactive glowing particle trails with cycling color themes.
//!
//! Moving the pointer sprays short-lived shapes (stars, flames, flowers,
//! bursts and more) that are pulled toward the pointer when close and drift
//! along slowly curving paths otherwise. Every few seconds the theme changes:
//! new particles take the new shape and color ramp, and the background
//! gradient switches, while particles already on screen keep the theme they
//! were born with.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glowtrail::prelude::*;
//!
//! fn main() -> Result<(), EffectError> {
//!     Effect::new()
//!         .with_preset(Preset::Galaxy)
//!         .with_title("Galaxy")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Themes
//!
//! A [`Theme`] is plain data: background, [`ColorRamp`], [`Shape`], base
//! speed and size, and lifespan. A [`ThemeRegistry`] holds them in order and
//! [`advances`](ThemeRegistry::advance) on a timer.
//!
//! ### Engine
//!
//! [`ParticleEngine`] owns the particles. Feed it [`PointerEvent`]s to spawn,
//! call [`tick`](ParticleEngine::tick) once per frame with the pointer
//! position, then [`render`](ParticleEngine::render) onto any [`Surface`].
//! The engine has no window or GPU dependency and can be driven headless:
//!
//! ```ignore
//! let themes = ThemeRegistry::new(presets::galaxy_themes())?;
//! let mut engine = ParticleEngine::with_seed(EngineConfig::default(), 7);
//! let mut frame = DrawList::new(800, 600);
//!
//! engine.spawn_batch(Vec2::new(400.0, 300.0), themes.current(), 10);
//! engine.tick(Vec2::new(420.0, 310.0));
//! engine.render(&mut frame);
//! ```
//!
//! ### Configuration
//!
//! Everything is serde data. An [`EffectConfig`] can be loaded from JSON;
//! missing fields fall back to the galaxy preset.
//!
//! ## Presets
//!
//! | Preset | Themes | Lifespan | Capacity | Theme interval |
//! |--------|--------|----------|----------|----------------|
//! | [`Preset::Galaxy`] | 6 | 180 | 100 | 6 s |
//! | [`Preset::Classic`] | 8 | 150 | none | 5 s |

pub mod color;
pub mod config;
pub mod draw;
mod effect;
pub mod engine;
pub mod error;
mod gpu;
pub mod input;
pub mod particle;
pub mod presets;
pub mod shapes;
pub mod theme;
pub mod time;
mod window;

pub use color::{Rgb, Rgba};
pub use config::{BatchSizes, EffectConfig, EngineConfig, MotionConfig, SpawnConfig};
pub use draw::{DrawCommand, DrawList, Glow, Surface};
pub use effect::Effect;
pub use engine::{ParticleEngine, TickStats};
pub use error::{ConfigError, EffectError, GpuError};
pub use glam::Vec2;
pub use input::{PointerEvent, PointerKind};
pub use particle::{Motion, Particle};
pub use presets::Preset;
pub use shapes::{Outline, Paint, Path, Shape};
pub use theme::{Background, ColorRamp, Theme, ThemeRegistry};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use glowtrail::prelude::*;
/// ```
///
/// This imports:
/// - [`Effect`] - the windowed effect builder
/// - [`Preset`] and [`EffectConfig`] - ready-made and custom configuration
/// - [`ParticleEngine`], [`DrawList`], [`Surface`] - the headless core
/// - [`Theme`], [`ThemeRegistry`], [`Shape`] - theme data
/// - [`Vec2`] - glam vector type
pub mod prelude {
    pub use crate::config::{EffectConfig, EngineConfig};
    pub use crate::draw::{DrawList, Surface};
    pub use crate::effect::Effect;
    pub use crate::engine::ParticleEngine;
    pub use crate::error::EffectError;
    pub use crate::input::{PointerEvent, PointerKind};
    pub use crate::presets::{self, Preset};
    pub use crate::shapes::Shape;
    pub use crate::theme::{Background, ColorRamp, Theme, ThemeRegistry};
    pub use crate::Vec2;
}
