//! Game state and core simulation types
//!
//! Everything one session needs lives in `GameState`; the update step, the
//! generator and the state machine operations all take it explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, SpikeTriangle};
use super::particles::Particle;
use crate::consts::*;
use crate::persistence::Wallet;
use crate::platform::Viewport;
use crate::settings::{ColorSet, Difficulty, DifficultyProfile};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start action
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen by the player or by losing visibility
    Paused,
    /// Run ended; counting down to an automatic reset
    Countdown,
    /// Win score reached; simulation frozen until replay
    Won,
}

/// Gameplay sub-mode. The switch to `Flappy` is one-way within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Normal,
    Flappy,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Lava,
    Spike,
    PillarSide,
    FlappyPillar,
}

/// Things that happened during a tick, for the glue layer (HUD, audio, storage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Landed,
    Died(DeathCause),
    Reset,
    Scored(u32),
    CoinsAwarded(u64),
    ModeChanged(GameMode),
    Won,
    Paused,
    Resumed,
}

impl GameEvent {
    /// True when persisted economy values changed
    pub fn touches_wallet(&self) -> bool {
        matches!(self, GameEvent::CoinsAwarded(_) | GameEvent::Won)
    }
}

/// Trail point for player rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub rotation: f32,
}

/// The player's block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (positive = falling)
    pub velocity: f32,
    /// y before the last integration, for swept landing tests
    pub prev_y: f32,
    /// Airborne flag
    pub jumping: bool,
    /// Cosmetic spin
    pub rotation: f32,
    /// Trail history (newest first)
    pub trail: Vec<TrailPoint>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            velocity: 0.0,
            prev_y: PLAYER_START_Y,
            jumping: false,
            rotation: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }
}

impl Player {
    /// Put the player back at the start position, at rest
    pub fn reset(&mut self) {
        self.pos = Vec2::new(PLAYER_X, PLAYER_START_Y);
        self.velocity = 0.0;
        self.prev_y = PLAYER_START_Y;
        self.jumping = false;
        self.rotation = 0.0;
        self.trail.clear();
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn prev_bottom(&self) -> f32 {
        self.prev_y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Gravity then integration. Velocity never exceeds the max fall speed.
    pub fn integrate(&mut self) {
        self.velocity = (self.velocity + GRAVITY).min(MAX_FALL_SPEED);
        self.prev_y = self.pos.y;
        self.pos.y += self.velocity;
    }

    /// Record current pose to trail (call once per tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos,
                rotation: self.rotation,
            },
        );
        self.trail.truncate(TRAIL_LENGTH);
    }
}

/// A triangular hazard standing on its host obstacle's top surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    /// Offset of the left base corner from the host's x
    pub relative_x: f32,
    pub width: f32,
    pub height: f32,
}

impl Spike {
    /// World-space triangle for a host at (`host_x`, `host_y`)
    pub fn triangle(&self, host_x: f32, host_y: f32) -> SpikeTriangle {
        SpikeTriangle {
            left: host_x + self.relative_x,
            base_y: host_y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Decorative rock texture for pillars (renderer-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RockTexture {
    pub seed: u32,
    pub cracks: u8,
}

/// Which half of a flappy pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairHalf {
    Top,
    Bottom,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Thin floating slab
    Platform,
    /// Column rising out of the lava; its faces are fatal
    Pillar { texture: Option<RockTexture> },
    /// One half of a vertical gap pair; any touch is fatal
    FlappyPillar {
        half: PairHalf,
        texture: Option<RockTexture>,
    },
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub spikes: Vec<Spike>,
    /// Set once the obstacle has been counted toward the score
    pub scored: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_xywh(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True when the player can stand on this obstacle
    pub fn is_support(&self) -> bool {
        !matches!(self.kind, ObstacleKind::FlappyPillar { .. })
    }

    pub fn is_pillar(&self) -> bool {
        matches!(self.kind, ObstacleKind::Pillar { .. })
    }

    pub fn is_flappy(&self) -> bool {
        matches!(self.kind, ObstacleKind::FlappyPillar { .. })
    }

    /// A flappy pair scores once, through its top half
    pub fn counts_for_score(&self) -> bool {
        !matches!(
            self.kind,
            ObstacleKind::FlappyPillar {
                half: PairHalf::Bottom,
                ..
            }
        )
    }

    /// Height of the top surface above the lava line
    pub fn elevation(&self, lava_y: f32) -> f32 {
        lava_y - self.y
    }

    pub fn spike_triangles(&self) -> impl Iterator<Item = SpikeTriangle> + '_ {
        self.spikes.iter().map(|s| s.triangle(self.x, self.y))
    }
}

/// Off-screen marker announcing the switch to flappy mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionMarker {
    pub x: f32,
}

/// Tick-counted timer. Starting it again replaces the running instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickTimer {
    remaining: u32,
}

impl TickTimer {
    /// Arm for `ticks`, cancelling any countdown already in progress
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn cancel(&mut self) {
        self.remaining = 0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Whole seconds left, rounded up (what the HUD shows)
    pub fn seconds_left(&self) -> u32 {
        self.remaining.div_ceil(TICKS_PER_SECOND)
    }

    /// Advance one tick; returns true on the tick the timer runs out
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (obstacle generation only)
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    /// Cosmetic RNG so particles never perturb generation
    #[serde(skip, default = "default_rng")]
    pub fx_rng: Pcg32,
    pub viewport: Viewport,
    pub difficulty: Difficulty,
    pub color_set: ColorSet,
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Obstacles passed this run
    pub score: u32,
    /// Current scroll speed (pixels per tick)
    pub game_speed: f32,
    /// How far the lead obstacle travels in before the next spawns
    pub platform_distance: f32,
    pub player: Player,
    /// Active obstacles in spawn order (rightmost last)
    pub obstacles: Vec<Obstacle>,
    pub marker: Option<TransitionMarker>,
    /// Death countdown (one instance at most)
    pub countdown: TickTimer,
    /// Window after a win during which replay input is ignored
    pub win_grace: TickTimer,
    /// Persisted coins and wins
    pub wallet: Wallet,
    /// Pointer/touch currently held (drives continuous jumping)
    pub pointer_down: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of resets this session
    pub runs: u32,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, viewport: Viewport, difficulty: Difficulty, wallet: Wallet) -> Self {
        let base_speed = difficulty.profile().base_speed;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            viewport,
            difficulty,
            color_set: ColorSet::default(),
            phase: GamePhase::Menu,
            mode: GameMode::Normal,
            score: 0,
            game_speed: base_speed,
            platform_distance: INITIAL_PLATFORM_DISTANCE,
            player: Player::default(),
            obstacles: Vec::new(),
            marker: None,
            countdown: TickTimer::default(),
            win_grace: TickTimer::default(),
            wallet,
            pointer_down: false,
            time_ticks: 0,
            runs: 0,
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Everything the renderer draws, as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("Snapshot failed: {e}");
            String::from("{}")
        })
    }
}
