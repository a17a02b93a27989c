//! Effect builder and runner.

use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::presets::Preset;
use crate::theme::{Theme, ThemeRegistry};
use crate::window::App;

/// A glowing particle trail effect.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// # Example
///
/// ```ignore
/// use glowtrail::prelude::*;
///
/// Effect::new()
///     .with_preset(Preset::Classic)
///     .with_title("Trails")
///     .run()?;
/// ```
pub struct Effect {
    config: EffectConfig,
    title: String,
    size: (u32, u32),
    seed: Option<u64>,
}

impl Effect {
    /// Create an effect with the galaxy preset.
    pub fn new() -> Self {
        Self {
            config: EffectConfig::default(),
            title: "glowtrail".to_string(),
            size: (1280, 720),
            seed: None,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: EffectConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a preset's engine constants, theme table and timing.
    pub fn with_preset(self, preset: Preset) -> Self {
        self.with_config(preset.config())
    }

    /// Replace the theme table, keeping the engine constants.
    pub fn with_themes(mut self, themes: Vec<Theme>) -> Self {
        self.config.themes = themes;
        self
    }

    /// Set the window title prefix.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Seed the particle randomness for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configuration the effect will run with.
    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Run the effect. This blocks until the window is closed.
    pub fn run(self) -> Result<(), EffectError> {
        self.config.validate()?;
        let registry = ThemeRegistry::new(self.config.themes.clone())?;
        log::info!(
            "Starting with {} themes, first: {}",
            registry.len(),
            registry.current().name
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(
            self.config,
            registry,
            self.title,
            self.size,
            self.seed,
        );
        event_loop.run_app(&mut app)?;
        app.into_result()
    }
}

impl Default for Effect {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_galaxy() {
        let effect = Effect::new();
        assert_eq!(effect.config(), &Preset::Galaxy.config());
    }

    #[test]
    fn test_with_themes_keeps_engine() {
        let themes = crate::presets::classic_themes();
        let effect = Effect::new().with_themes(themes.clone());
        assert_eq!(effect.config().themes, themes);
        assert_eq!(effect.config().engine, Preset::Galaxy.engine());
    }

    #[test]
    fn test_run_rejects_empty_themes_before_opening_window() {
        let result = Effect::new().with_themes(Vec::new()).run();
        assert!(matches!(
            result,
            Err(EffectError::Config(crate::error::ConfigError::NoThemes))
        ));
    }
}
