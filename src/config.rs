//! Engine constants and effect settings.
//!
//! Everything here is plain serde data so a whole effect can be described
//! in one JSON file. Missing fields fall back to the galaxy preset.
//!
//! ```json
//! {
//!     "engine": { "capacity": 250, "motion": { "size_decay": 0.99 } },
//!     "theme_interval_ms": 4000,
//!     "themes": [ ... ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::PointerKind;
use crate::presets::Preset;
use crate::theme::Theme;

/// Ranges particles are randomized from at spawn.
///
/// Each value is `min + rand * spread`, except size and speed whose spread
/// comes from the theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Size added to `rand * theme.base_size`.
    pub min_size: f32,
    /// Speed added to `rand * theme.base_speed`.
    pub min_speed: f32,
    /// Smallest attraction radius.
    pub radius_min: f32,
    /// Random extra attraction radius.
    pub radius_spread: f32,
    /// Slowest spin in radians per tick.
    pub rotation_speed_min: f32,
    /// Random extra spin in radians per tick.
    pub rotation_speed_spread: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_size: 3.0,
            min_speed: 0.2,
            radius_min: 120.0,
            radius_spread: 180.0,
            rotation_speed_min: 0.01,
            rotation_speed_spread: 0.03,
        }
    }
}

/// Per-tick movement constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Speed multiplier while moving toward the pointer.
    pub attraction_factor: f32,
    /// Heading change per unit of speed while drifting.
    pub drift_rate: f32,
    /// Speed multiplier while drifting.
    pub drift_factor: f32,
    /// Size multiplier applied every tick.
    pub size_decay: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            attraction_factor: 0.8,
            drift_rate: 0.03,
            drift_factor: 1.0,
            size_decay: 0.995,
        }
    }
}

/// Particles spawned per pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSizes {
    /// Per cursor move.
    pub on_move: u32,
    /// Per button press or touch start.
    pub on_press: u32,
    /// Per touch drag.
    pub on_drag: u32,
}

impl BatchSizes {
    /// Same batch size for every event kind.
    pub const fn uniform(count: u32) -> Self {
        Self {
            on_move: count,
            on_press: count,
            on_drag: count,
        }
    }

    /// Batch size for an event kind.
    pub fn for_kind(&self, kind: PointerKind) -> u32 {
        match kind {
            PointerKind::Move => self.on_move,
            PointerKind::Press => self.on_press,
            PointerKind::Drag => self.on_drag,
        }
    }
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self {
            on_move: 2,
            on_press: 2,
            on_drag: 1,
        }
    }
}

/// Particle engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spawn randomization.
    pub spawn: SpawnConfig,
    /// Movement constants.
    pub motion: MotionConfig,
    /// Particles per pointer event.
    pub batch: BatchSizes,
    /// Keep at most this many particles, dropping the oldest.
    pub capacity: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn: SpawnConfig::default(),
            motion: MotionConfig::default(),
            batch: BatchSizes::default(),
            capacity: Some(100),
        }
    }
}

impl EngineConfig {
    /// Check that the constants keep the simulation finite and shrinking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let motion = &self.motion;
        if !(motion.size_decay > 0.0 && motion.size_decay <= 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "size_decay must be in (0, 1], got {}",
                motion.size_decay
            )));
        }
        let finite = [
            motion.attraction_factor,
            motion.drift_rate,
            motion.drift_factor,
            self.spawn.min_size,
            self.spawn.min_speed,
            self.spawn.radius_min,
            self.spawn.radius_spread,
            self.spawn.rotation_speed_min,
            self.spawn.rotation_speed_spread,
        ];
        if finite.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::InvalidValue(
                "engine constants must be finite and non-negative".into(),
            ));
        }
        if self.spawn.min_size <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "min_size must be positive, got {}",
                self.spawn.min_size
            )));
        }
        if self.capacity == Some(0) {
            return Err(ConfigError::InvalidValue("capacity must be at least 1".into()));
        }
        Ok(())
    }
}

/// Everything needed to run an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Particle engine constants.
    pub engine: EngineConfig,
    /// Milliseconds between theme changes.
    pub theme_interval_ms: u64,
    /// Fraction of the trail erased each frame (0 keeps everything).
    pub fade: f32,
    /// Themes cycled through in order.
    pub themes: Vec<Theme>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Preset::Galaxy.config()
    }
}

impl EffectConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EffectConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {} themes from {}",
            config.themes.len(),
            path.display()
        );
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Time between theme changes.
    pub fn theme_interval(&self) -> Duration {
        Duration::from_millis(self.theme_interval_ms)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.themes.is_empty() {
            return Err(ConfigError::NoThemes);
        }
        for theme in &self.themes {
            theme.validate()?;
        }
        if self.theme_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "theme_interval_ms must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fade) {
            return Err(ConfigError::InvalidValue(format!(
                "fade must be in [0, 1], got {}",
                self.fade
            )));
        }
        self.engine.validate()
    }
}
