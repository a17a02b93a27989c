//! A single particle and its per-tick update.
//!
//! Particles move in one of two regimes, chosen fresh every tick from the
//! distance to the pointer:
//!
//! - [`Motion::Attracted`]: inside the particle's attraction radius, it
//!   heads straight for the pointer, stopping on it if the step would
//!   overshoot.
//! - [`Motion::Drifting`]: outside it, the heading turns a little every tick
//!   and the particle moves forward along it.
//!
//! There is no memory between ticks beyond position and heading.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;
use rand::Rng;

use crate::config::{MotionConfig, SpawnConfig};
use crate::draw::{DrawCommand, Glow};
use crate::theme::Theme;

/// Movement regime for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Moving straight toward the pointer.
    Attracted,
    /// Wandering along a slowly turning heading.
    Drifting,
}

impl Motion {
    /// The regime `particle` is in for a pointer at `pointer`.
    pub fn of(particle: &Particle, pointer: Vec2) -> Self {
        if particle.position.distance(pointer) < particle.attraction_radius {
            Motion::Attracted
        } else {
            Motion::Drifting
        }
    }
}

/// A live particle.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Spawn sequence number, increasing across the engine's lifetime.
    pub id: u64,
    /// Position in surface pixels.
    pub position: Vec2,
    /// Current size; shrinks every tick.
    pub size: f32,
    /// Drift heading in radians, also used as a shape phase.
    pub angle: f32,
    /// Pixels per tick.
    pub speed: f32,
    /// Pointer distance below which the particle is attracted.
    pub attraction_radius: f32,
    /// Spin in radians.
    pub rotation: f32,
    /// Spin per tick in radians.
    pub rotation_speed: f32,
    /// Ticks left before removal.
    pub remaining_life: i32,
    /// Theme active when the particle spawned.
    pub theme: Arc<Theme>,
}

impl Particle {
    /// Spawn a particle at `position` with parameters drawn from `theme`.
    pub fn spawn<R: Rng + ?Sized>(
        id: u64,
        position: Vec2,
        theme: &Arc<Theme>,
        spawn: &SpawnConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            id,
            position,
            size: rng.gen::<f32>() * theme.base_size + spawn.min_size,
            angle: rng.gen::<f32>() * TAU,
            speed: rng.gen::<f32>() * theme.base_speed + spawn.min_speed,
            attraction_radius: rng.gen::<f32>() * spawn.radius_spread + spawn.radius_min,
            rotation: 0.0,
            rotation_speed: rng.gen::<f32>() * spawn.rotation_speed_spread
                + spawn.rotation_speed_min,
            remaining_life: i32::try_from(theme.lifespan).unwrap_or(i32::MAX),
            theme: Arc::clone(theme),
        }
    }

    /// Advance one tick toward or around `pointer`.
    ///
    /// Returns the regime used for this tick.
    pub fn update(&mut self, pointer: Vec2, motion: &MotionConfig) -> Motion {
        let regime = Motion::of(self, pointer);
        match regime {
            Motion::Attracted => {
                let to_pointer = pointer - self.position;
                let step = self.speed * motion.attraction_factor;
                if step >= to_pointer.length() {
                    // Land on the pointer rather than jump past it.
                    self.position = pointer;
                } else {
                    let heading = to_pointer.y.atan2(to_pointer.x);
                    self.position += Vec2::from_angle(heading) * step;
                }
            }
            Motion::Drifting => {
                self.angle += self.speed * motion.drift_rate;
                self.position += Vec2::from_angle(self.angle) * self.speed * motion.drift_factor;
            }
        }

        self.rotation += self.rotation_speed;
        self.remaining_life -= 1;
        self.size *= motion.size_decay;
        regime
    }

    /// Whether the particle has run out of life.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining_life <= 0
    }

    /// Build the draw command for the particle's current state.
    pub fn draw_command(&self) -> DrawCommand {
        let shape = self.theme.shape;
        let color = self.theme.color_of(self.remaining_life);
        DrawCommand {
            center: self.position,
            rotation: self.rotation,
            outline: shape.outline(self.size, self.angle),
            color,
            glow: shape.glow_blur().map(|blur| Glow { blur, color }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::shapes::Shape;
    use crate::theme::{Background, ColorRamp};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn theme(shape: Shape) -> Arc<Theme> {
        Arc::new(Theme {
            name: "test".into(),
            background: Background::Solid { color: Rgb::BLACK },
            color: ColorRamp::new(200.0, 80.0, 70.0),
            shape,
            base_speed: 0.6,
            base_size: 10.0,
            lifespan: 180,
        })
    }

    fn particle_at(position: Vec2) -> Particle {
        let mut rng = StdRng::seed_from_u64(7);
        Particle::spawn(0, position, &theme(Shape::Star), &SpawnConfig::default(), &mut rng)
    }

    #[test]
    fn test_spawn_ranges() {
        let theme = theme(Shape::Star);
        let spawn = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for id in 0..200 {
            let p = Particle::spawn(id, Vec2::ZERO, &theme, &spawn, &mut rng);
            assert!((3.0..13.0).contains(&p.size));
            assert!((0.0..TAU).contains(&p.angle));
            assert!((0.2..0.8).contains(&p.speed));
            assert!((120.0..300.0).contains(&p.attraction_radius));
            assert!((0.01..0.04).contains(&p.rotation_speed));
            assert_eq!(p.rotation, 0.0);
            assert_eq!(p.remaining_life, 180);
        }
    }

    #[test]
    fn test_attracted_moves_toward_pointer() {
        let mut p = particle_at(Vec2::new(100.0, 100.0));
        let pointer = Vec2::new(150.0, 100.0);
        let before = p.position.distance(pointer);

        assert_eq!(p.update(pointer, &MotionConfig::default()), Motion::Attracted);

        let after = p.position.distance(pointer);
        assert!((before - after - p.speed * 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_attracted_never_overshoots_pointer() {
        let mut p = particle_at(Vec2::new(100.0, 100.0));
        let pointer = Vec2::new(100.05, 100.0);
        let before = p.position.distance(pointer);
        assert!(before < p.speed * 0.8);

        assert_eq!(p.update(pointer, &MotionConfig::default()), Motion::Attracted);

        assert!(p.position.distance(pointer) < before);
        assert_eq!(p.position, pointer);
    }

    #[test]
    fn test_huge_lifespan_saturates() {
        let mut big = (*theme(Shape::Star)).clone();
        big.lifespan = u32::MAX;
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::spawn(0, Vec2::ZERO, &Arc::new(big), &SpawnConfig::default(), &mut rng);
        assert_eq!(p.remaining_life, i32::MAX);
        p.update(Vec2::ZERO, &MotionConfig::default());
        assert!(!p.is_expired());
    }

    #[test]
    fn test_drifting_turns_and_moves_forward() {
        let mut p = particle_at(Vec2::ZERO);
        let motion = MotionConfig::default();
        let pointer = Vec2::new(10_000.0, 0.0);
        let angle = p.angle;

        assert_eq!(p.update(pointer, &motion), Motion::Drifting);

        let expected_angle = angle + p.speed * motion.drift_rate;
        assert!((p.angle - expected_angle).abs() < 1e-6);
        let expected = Vec2::from_angle(expected_angle) * p.speed;
        assert!((p.position - expected).length() < 1e-4);
    }

    #[test]
    fn test_pointer_on_particle_stays_finite() {
        let mut p = particle_at(Vec2::new(5.0, 5.0));
        p.update(Vec2::new(5.0, 5.0), &MotionConfig::default());
        assert!(p.position.is_finite());
    }

    #[test]
    fn test_regime_boundary_is_exclusive() {
        let mut p = particle_at(Vec2::ZERO);
        p.attraction_radius = 10.0;
        assert_eq!(Motion::of(&p, Vec2::new(9.99, 0.0)), Motion::Attracted);
        assert_eq!(Motion::of(&p, Vec2::new(10.0, 0.0)), Motion::Drifting);
    }

    #[test]
    fn test_draw_command_uses_spawn_theme() {
        let p = particle_at(Vec2::new(3.0, 4.0));
        let cmd = p.draw_command();
        assert_eq!(cmd.center, Vec2::new(3.0, 4.0));
        assert_eq!(cmd.color, p.theme.color_of(180));
        assert_eq!(cmd.glow.map(|g| g.blur), Some(20.0));
    }

    #[test]
    fn test_circle_draws_without_glow() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Particle::spawn(0, Vec2::ZERO, &theme(Shape::Circle), &SpawnConfig::default(), &mut rng);
        assert!(p.draw_command().glow.is_none());
    }
}
