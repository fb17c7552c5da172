//! Cosmetic particles
//!
//! One particle type with a kind tag. Motion and lifetime decay are shared;
//! the kind only decides how a particle spawns and how fast it fades. Nothing
//! here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Shed behind the player while airborne
    Dust,
    /// Rises off the lava surface
    Ember { fade: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    fn decay(&self) -> f32 {
        match self.kind {
            ParticleKind::Dust => 0.02,
            ParticleKind::Ember { fade } => fade,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay();
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Spawn, advance and cull particles for one tick
pub fn update_particles(state: &mut GameState) {
    if state.player.jumping {
        let origin = Vec2::new(state.player.pos.x, state.player.bottom());
        let dust = Particle {
            pos: origin,
            vel: Vec2::new(-state.game_speed, state.fx_rng.random_range(-1.0..=1.0)),
            life: 1.0,
            size: state.fx_rng.random_range(2.0..=5.0),
            kind: ParticleKind::Dust,
        };
        state.particles.push(dust);
    }

    if state.fx_rng.random_bool(EMBER_CHANCE) {
        let ember = Particle {
            pos: Vec2::new(
                state.fx_rng.random_range(0.0..=state.viewport.width),
                state.viewport.lava_y,
            ),
            vel: Vec2::new(0.0, -state.fx_rng.random_range(1.0..=3.0)),
            life: 1.0,
            size: state.fx_rng.random_range(4.0..=12.0),
            kind: ParticleKind::Ember { fade: 0.02 },
        };
        state.particles.push(ember);
    }

    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(Particle::is_alive);

    // Oldest particles go first when over budget
    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Wallet;
    use crate::platform::Viewport;
    use crate::settings::Difficulty;

    #[test]
    fn test_particles_share_motion_and_fade() {
        let mut dust = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(-3.0, 1.0),
            life: 1.0,
            size: 3.0,
            kind: ParticleKind::Dust,
        };
        dust.update();
        assert_eq!(dust.pos, Vec2::new(-3.0, 1.0));
        assert!((dust.life - 0.98).abs() < 1e-6);

        let mut ember = Particle {
            kind: ParticleKind::Ember { fade: 0.5 },
            ..dust.clone()
        };
        ember.update();
        ember.update();
        assert!(!ember.is_alive());
    }

    #[test]
    fn test_particle_budget() {
        let mut state = GameState::new(5, Viewport::default(), Difficulty::Normal, Wallet::default());
        state.player.jumping = true;
        for _ in 0..1000 {
            update_particles(&mut state);
            assert!(state.particles.len() <= MAX_PARTICLES);
        }
        assert!(!state.particles.is_empty());
    }
}
