//! The particle engine.
//!
//! Owns every live particle, spawns batches on pointer events, advances the
//! simulation one tick at a time, and draws onto any [`Surface`].
//!
//! Particles are kept in spawn order, so the most recent ones are always at
//! the tail. When a capacity is configured the oldest are dropped from the
//! head after every spawn and after each tick.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = ParticleEngine::with_seed(EngineConfig::default(), 42);
//! engine.handle_pointer(PointerEvent::new(PointerKind::Move, pos), registry.current());
//! engine.tick(input.pointer());
//! engine.render(&mut draw_list);
//! ```

use std::sync::Arc;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::draw::Surface;
use crate::input::PointerEvent;
use crate::particle::Particle;
use crate::theme::Theme;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Particles advanced.
    pub updated: usize,
    /// Particles removed because their life ran out.
    pub expired: usize,
    /// Particles removed to stay within capacity.
    pub evicted: usize,
}

/// Particle collection plus the rules that drive it.
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    config: EngineConfig,
    particles: Vec<Particle>,
    next_id: u64,
    rng: StdRng,
}

impl ParticleEngine {
    /// Create an engine seeded from the OS.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed, for reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            config,
            particles: Vec::new(),
            next_id: 0,
            rng,
        }
    }

    /// Engine constants.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn one particle, enforce capacity, and return the new id.
    pub fn spawn(&mut self, position: Vec2, theme: &Arc<Theme>) -> u64 {
        let id = self.push(position, theme);
        self.enforce_capacity();
        id
    }

    /// Spawn `count` particles at `position`, then enforce capacity.
    ///
    /// Returns how many older particles were evicted.
    pub fn spawn_batch(&mut self, position: Vec2, theme: &Arc<Theme>, count: u32) -> usize {
        self.particles.reserve(count as usize);
        for _ in 0..count {
            self.push(position, theme);
        }
        self.enforce_capacity()
    }

    /// Spawn the batch configured for `event`'s kind at its position.
    pub fn handle_pointer(&mut self, event: PointerEvent, theme: &Arc<Theme>) -> usize {
        let count = self.config.batch.for_kind(event.kind);
        self.spawn_batch(event.position, theme, count)
    }

    /// Advance every particle one tick toward or around `pointer`.
    ///
    /// Particles whose life reaches zero are removed in the same tick, then
    /// capacity is enforced.
    pub fn tick(&mut self, pointer: Vec2) -> TickStats {
        let motion = self.config.motion;
        let updated = self.particles.len();
        for particle in &mut self.particles {
            particle.update(pointer, &motion);
        }

        self.particles.retain(|p| !p.is_expired());
        let expired = updated - self.particles.len();
        let evicted = self.enforce_capacity();

        let stats = TickStats {
            updated,
            expired,
            evicted,
        };
        log::trace!("tick: {:?}, {} alive", stats, self.particles.len());
        stats
    }

    /// Draw every live particle, oldest first.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            surface.draw(particle.draw_command());
        }
    }

    fn push(&mut self, position: Vec2, theme: &Arc<Theme>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let particle = Particle::spawn(id, position, theme, &self.config.spawn, &mut self.rng);
        self.particles.push(particle);
        id
    }

    fn enforce_capacity(&mut self) -> usize {
        let Some(capacity) = self.config.capacity else {
            return 0;
        };
        let excess = self.particles.len().saturating_sub(capacity);
        if excess > 0 {
            self.particles.drain(..excess);
        }
        excess
    }
}
