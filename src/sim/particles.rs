//! Cosmetic burst particles
//!
//! Destruction events spawn short-lived particles that are simulated
//! independently of the physics backend. Life drains by a fixed amount per
//! tick, so a batch is fully gone after exactly 20 ticks; that natural decay
//! is the only size bound the system needs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::view::Color;

/// Life lost per tick; 1.0 / 0.05 = 20 ticks from spawn to removal.
pub const LIFE_DECAY: f32 = 0.05;

/// Downward pull applied to particle velocity each tick.
pub const PARTICLE_GRAVITY: f32 = 0.5;

/// Half-range of the random initial velocity per axis.
pub const SPAWN_SPREAD: f32 = 5.0;

/// One burst particle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    /// Remaining life in [0, 1]
    pub life: f32,
    pub color: Color,
}

/// Owns the live particle collection and its RNG.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Append `count` particles at `pos` with randomized velocities.
    pub fn spawn(&mut self, pos: Vec2, color: Color, count: u32) {
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
                self.rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
            );
            self.particles.push(Particle {
                pos,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    /// Integrate one tick and prune expired particles.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::palette;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_full_life_and_bounded_velocity() {
        let mut system = ParticleSystem::new(42);
        system.spawn(Vec2::new(10.0, 20.0), palette::PIG_BURST, 10);
        assert_eq!(system.len(), 10);
        for p in system.particles() {
            assert_eq!(p.life, 1.0);
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert!(p.vel.x.abs() < SPAWN_SPREAD);
            assert!(p.vel.y.abs() < SPAWN_SPREAD);
        }
    }

    #[test]
    fn test_batch_decays_in_exactly_twenty_ticks() {
        let mut system = ParticleSystem::new(7);
        system.spawn(Vec2::ZERO, palette::WOOD, 10);
        for _ in 0..19 {
            system.advance();
        }
        assert_eq!(system.len(), 10);
        system.advance();
        assert!(system.is_empty());
    }

    #[test]
    fn test_gravity_bends_particles_down() {
        let mut system = ParticleSystem::new(3);
        system.spawn(Vec2::ZERO, palette::ICE, 4);
        let before: Vec<f32> = system.particles().iter().map(|p| p.vel.y).collect();
        system.advance();
        for (p, v) in system.particles().iter().zip(before) {
            assert_eq!(p.vel.y, v + PARTICLE_GRAVITY);
        }
    }

    proptest! {
        #[test]
        fn prop_any_batch_expires_within_twenty_ticks(count in 0u32..64, seed in any::<u64>()) {
            let mut system = ParticleSystem::new(seed);
            system.spawn(Vec2::ZERO, palette::PIG_BURST, count);
            for _ in 0..20 {
                system.advance();
            }
            prop_assert!(system.is_empty());
        }
    }
}
