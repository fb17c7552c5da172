//! The Floor Is Lava - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle generation, collisions, game state)
//! - `settings`: Difficulty tiers and cosmetic color sets
//! - `persistence`: Coin/win wallet backed by a key-value store
//! - `platform`: Render target dimensions and the fixed-step frame clock
//! - `error`: Initialization errors

pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use persistence::{MemoryStorage, Storage, Wallet};
pub use platform::{FrameClock, Viewport};
pub use settings::{ColorSet, Difficulty, DifficultyProfile};

/// Game configuration constants
///
/// Physics is frame-based: velocities are pixels per tick, accelerations pixels per tick².
pub mod consts {
    /// Simulation ticks per wall-clock second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default logical render target size
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 400.0;
    /// Smallest render target the spawn math still works in
    pub const MIN_VIEW_WIDTH: f32 = 400.0;
    pub const MIN_VIEW_HEIGHT: f32 = 300.0;
    /// Depth of the lava pool; the lava line sits this far above the bottom edge
    pub const LAVA_DEPTH: f32 = 70.0;

    /// Player defaults (x is fixed, only y is simulated)
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 230.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const TRAIL_LENGTH: usize = 10;
    /// Cosmetic spin per airborne tick (radians)
    pub const SPIN_PER_TICK: f32 = 0.1;

    pub const GRAVITY: f32 = 0.4;
    pub const JUMP_FORCE: f32 = -8.0;
    /// Flappy mode impulse (weaker than a full jump)
    pub const FLAP_FORCE: f32 = -7.0;
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// Scroll speed grows with score up to this cap
    pub const MAX_GAME_SPEED: f32 = 12.0;
    pub const SPEED_INCREMENT: f32 = 0.1;

    /// Spawn distance derived from scroll speed: base + speed * factor, clamped
    pub const INITIAL_PLATFORM_DISTANCE: f32 = 200.0;
    pub const MIN_PLATFORM_DISTANCE: f32 = 150.0;
    pub const MAX_PLATFORM_DISTANCE: f32 = 350.0;
    pub const PLATFORM_DISTANCE_PER_SPEED: f32 = 15.0;

    /// Tolerance band shared by landing, grounded and fatal tests (pixels)
    pub const COLLISION_EPSILON: f32 = 2.0;
    /// How deep into a pillar face an overlap still counts as a side impact
    pub const SIDE_HIT_MARGIN: f32 = 10.0;

    /// Platform slab thickness
    pub const PLATFORM_THICKNESS: f32 = 15.0;
    /// First obstacle of every run
    pub const START_PLATFORM_X: f32 = 50.0;
    pub const START_PLATFORM_Y: f32 = 280.0;
    pub const START_PLATFORM_WIDTH: f32 = 300.0;

    /// Extra ticks of free fall a gap must force beyond the first one that
    /// leaves the landing band
    pub const WALK_OFF_MARGIN_TICKS: u32 = 1;
    /// Random slack added on top of the minimum horizontal offset
    pub const GAP_JITTER: f32 = 60.0;
    /// Fraction of the full jump arc a gap may use
    pub const JUMP_REACH_FACTOR: f32 = 0.75;

    /// Obstacle top surfaces stay within this band above the lava line
    pub const MIN_ELEVATION: f32 = 40.0;
    pub const MAX_ELEVATION: f32 = 160.0;
    pub const MAX_STEP_UP: f32 = 50.0;
    pub const MAX_STEP_DOWN: f32 = 60.0;
    /// Pillars always rise at least this far above the lava
    pub const MIN_PILLAR_ELEVATION: f32 = 80.0;
    /// Platforms below this elevation are "low": a pillar may not follow them
    pub const LOW_PLATFORM_ELEVATION: f32 = 60.0;

    /// Spikes keep this fraction of the host width clear at both edges
    pub const SPIKE_EDGE_MARGIN_RATIO: f32 = 0.25;
    pub const SPIKE_MIN_WIDTH: f32 = 20.0;
    pub const SPIKE_MAX_WIDTH: f32 = 30.0;
    pub const SPIKE_MIN_HEIGHT: f32 = 15.0;
    pub const SPIKE_MAX_HEIGHT: f32 = 20.0;

    /// Flappy pillar pairs
    pub const FLAPPY_PILLAR_WIDTH: f32 = 60.0;
    pub const FLAPPY_GAP: f32 = 130.0;
    pub const FLAPPY_SPACING: f32 = 250.0;
    /// Gap never starts closer than this to the top edge or the lava line
    pub const FLAPPY_GAP_MARGIN: f32 = 40.0;
    /// Pairs seeded when the mode switches
    pub const FLAPPY_SEED_PAIRS: usize = 3;

    /// Score thresholds
    pub const FLAPPY_SCORE_THRESHOLD: u32 = 50;
    pub const WIN_SCORE: u32 = 100;
    /// Coins are paid out every this many points
    pub const COIN_SCORE_INTERVAL: u32 = 10;

    /// Timers, in ticks
    pub const COUNTDOWN_SECONDS: u32 = 3;
    pub const COUNTDOWN_TICKS: u32 = COUNTDOWN_SECONDS * TICKS_PER_SECOND;
    pub const WIN_GRACE_TICKS: u32 = 3 * TICKS_PER_SECOND;

    /// Cosmetic particle budget
    pub const MAX_PARTICLES: usize = 128;
    /// Chance per tick of a lava ember spawning
    pub const EMBER_CHANCE: f64 = 0.3;
}
