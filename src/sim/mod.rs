//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update step per frame, timers counted in ticks
//! - Seeded RNG only (cosmetics draw from their own stream)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod generator;
pub mod geometry;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{fatal_collision, is_grounded, is_landing, resolve_landing, touches_lava};
pub use generator::{generate_next, jump_reach, min_gap, needs_spawn, spawn_distance};
pub use geometry::{Aabb, SpikeTriangle};
pub use particles::{Particle, ParticleKind};
pub use state::{
    DeathCause, GameEvent, GameMode, GamePhase, GameState, Obstacle, ObstacleKind, PairHalf,
    Player, Spike, TickTimer, TransitionMarker,
};
pub use tick::{
    TickInput, handle_jump, reset_game, scroll_speed, set_color_set, set_difficulty,
    set_pointer_down, set_visibility, start_countdown, start_game, tick, toggle_pause, update,
};
