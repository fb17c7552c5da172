//! Procedural obstacle generation
//!
//! Each call appends exactly one obstacle (normal mode) or one top/bottom pair
//! (flappy mode) to the right of the current lead obstacle. Placement is
//! bounded so every gap is clearable with a single jump at the current scroll
//! speed, and never narrow enough to walk across.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameMode, GameState, Obstacle, ObstacleKind, PairHalf, RockTexture, Spike};
use crate::consts::*;

/// Spawn distance for a scroll speed: faster runs spread obstacles further apart
pub fn spawn_distance(speed: f32) -> f32 {
    (INITIAL_PLATFORM_DISTANCE + speed * PLATFORM_DISTANCE_PER_SPEED)
        .clamp(MIN_PLATFORM_DISTANCE, MAX_PLATFORM_DISTANCE)
}

/// Ticks of unsupported fall before the drop exceeds `COLLISION_EPSILON`.
///
/// Past that point the swept landing test no longer catches the player on the
/// far side of a gap.
fn ticks_to_leave_landing_band() -> u32 {
    let (mut velocity, mut fall, mut ticks) = (0.0_f32, 0.0_f32, 0);
    while fall <= COLLISION_EPSILON {
        velocity = (velocity + GRAVITY).min(MAX_FALL_SPEED);
        fall += velocity;
        ticks += 1;
    }
    ticks
}

/// Narrowest gap at a scroll speed. Walking into it drops the player out of
/// the landing band before the far edge arrives, so it has to be jumped.
pub fn min_gap(speed: f32) -> f32 {
    let ticks = ticks_to_leave_landing_band() + WALK_OFF_MARGIN_TICKS;
    PLAYER_SIZE + speed * ticks as f32
}

/// Widest gap the generator allows at a scroll speed.
///
/// A full jump is airborne for `2 * |JUMP_FORCE| / GRAVITY` ticks; only a
/// fraction of that horizontal travel is used so landings stay comfortable.
pub fn jump_reach(speed: f32) -> f32 {
    let airtime = 2.0 * JUMP_FORCE.abs() / GRAVITY;
    (speed * airtime * JUMP_REACH_FACTOR).max(min_gap(speed))
}

/// Range of x offsets from `prev.x` where the obstacle after `prev` may go
fn offset_window(state: &GameState, prev: &Obstacle) -> (f32, f32) {
    if prev.is_flappy() {
        return (FLAPPY_SPACING, FLAPPY_SPACING);
    }
    let speed = state.game_speed;
    let reach = jump_reach(speed);
    let min_offset = state
        .platform_distance
        .clamp(prev.width + min_gap(speed), prev.width + reach);
    let max_offset = (min_offset + GAP_JITTER).min(prev.width + reach);
    (min_offset, max_offset)
}

/// True when the next obstacle must be generated this tick.
///
/// The earliest slot for the next obstacle is `lead.x + min_offset`. Spawning
/// while that slot is still at least one scroll step past the right edge keeps
/// every new obstacle off screen.
pub fn needs_spawn(state: &GameState) -> bool {
    let Some(lead) = state.obstacles.last() else {
        return true;
    };
    if state.mode == GameMode::Flappy && !lead.is_flappy() {
        return true;
    }
    let (min_offset, _) = offset_window(state, lead);
    lead.x + min_offset - 2.0 * state.game_speed < state.viewport.width
}

/// Uniform sample in `[lo, hi]`; collapses to `lo` for an empty range
fn sample(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi <= lo { lo } else { rng.random_range(lo..=hi) }
}

/// The fixed, generous platform every run starts on
pub fn start_platform(state: &mut GameState) -> Obstacle {
    Obstacle {
        id: state.next_entity_id(),
        kind: ObstacleKind::Platform,
        x: START_PLATFORM_X,
        y: START_PLATFORM_Y,
        width: START_PLATFORM_WIDTH,
        height: PLATFORM_THICKNESS,
        spikes: Vec::new(),
        scored: false,
    }
}

/// Append the next obstacle (or pair) for the current mode
pub fn generate_next(state: &mut GameState) {
    match state.mode {
        GameMode::Normal => {
            let obstacle = next_obstacle(state);
            log::debug!(
                "Spawned {:?} #{} at x={:.0} y={:.0} w={:.0} spikes={}",
                obstacle.kind,
                obstacle.id,
                obstacle.x,
                obstacle.y,
                obstacle.width,
                obstacle.spikes.len()
            );
            state.obstacles.push(obstacle);
        }
        GameMode::Flappy => {
            let x = match state.obstacles.last() {
                Some(last) if last.is_flappy() => last.x + FLAPPY_SPACING,
                _ => state.viewport.width,
            };
            push_flappy_pair(state, x);
        }
    }
}

/// Build the next normal-mode obstacle from the lead one
fn next_obstacle(state: &mut GameState) -> Obstacle {
    let Some(prev) = state.obstacles.last().cloned() else {
        return start_platform(state);
    };

    let profile = state.profile();
    let lava_y = state.viewport.lava_y;
    let prev_elevation = if prev.is_support() {
        prev.elevation(lava_y)
    } else {
        lava_y - START_PLATFORM_Y
    };

    // A pillar right after a low platform cannot be cleared
    let after_low_platform =
        matches!(prev.kind, ObstacleKind::Platform) && prev_elevation < LOW_PLATFORM_ELEVATION;
    let pillar = !after_low_platform && state.rng.random_bool(profile.pillar_chance);

    let width = if pillar {
        profile.pillar_width
    } else {
        profile.platform_width
    };

    // Horizontal: offset from the previous x, gap kept within [min_gap, reach]
    let (min_offset, max_offset) = offset_window(state, &prev);
    let x = prev.x + sample(&mut state.rng, min_offset, max_offset);

    // Vertical: a jumpable step from the previous surface, inside the band
    let mut lo = prev_elevation - MAX_STEP_DOWN;
    let hi = (prev_elevation + MAX_STEP_UP).min(MAX_ELEVATION);
    if pillar {
        lo = lo.max(MIN_PILLAR_ELEVATION);
    }
    let lo = lo.max(MIN_ELEVATION).min(hi);
    let elevation = sample(&mut state.rng, lo, hi);
    let y = lava_y - elevation;

    let (kind, height) = if pillar {
        let texture = RockTexture {
            seed: state.fx_rng.random(),
            cracks: state.fx_rng.random_range(2..=5),
        };
        (
            ObstacleKind::Pillar {
                texture: Some(texture),
            },
            elevation,
        )
    } else {
        (ObstacleKind::Platform, PLATFORM_THICKNESS)
    };

    let mut spikes = Vec::new();
    if state.rng.random_bool(profile.spike_chance) {
        if let Some(spike) = place_spike(&mut state.rng, width) {
            spikes.push(spike);
        }
    }

    Obstacle {
        id: state.next_entity_id(),
        kind,
        x,
        y,
        width,
        height,
        spikes,
        scored: false,
    }
}

/// One spike somewhere in the middle of the host, clear of both edge margins
fn place_spike(rng: &mut Pcg32, host_width: f32) -> Option<Spike> {
    let margin = host_width * SPIKE_EDGE_MARGIN_RATIO;
    let width = sample(rng, SPIKE_MIN_WIDTH, SPIKE_MAX_WIDTH);
    let max_x = host_width - margin - width;
    if max_x < margin {
        return None;
    }
    Some(Spike {
        relative_x: sample(rng, margin, max_x),
        width,
        height: sample(rng, SPIKE_MIN_HEIGHT, SPIKE_MAX_HEIGHT),
    })
}

/// Append a top/bottom pillar pair at `x` sharing one random gap
pub fn push_flappy_pair(state: &mut GameState, x: f32) {
    let view = state.viewport;
    let gap_start = sample(
        &mut state.rng,
        FLAPPY_GAP_MARGIN,
        view.lava_y - FLAPPY_GAP - FLAPPY_GAP_MARGIN,
    );

    for half in [PairHalf::Top, PairHalf::Bottom] {
        let (y, height) = match half {
            PairHalf::Top => (0.0, gap_start),
            PairHalf::Bottom => (
                gap_start + FLAPPY_GAP,
                view.height - (gap_start + FLAPPY_GAP),
            ),
        };
        let texture = RockTexture {
            seed: state.fx_rng.random(),
            cracks: state.fx_rng.random_range(2..=5),
        };
        let obstacle = Obstacle {
            id: state.next_entity_id(),
            kind: ObstacleKind::FlappyPillar {
                half,
                texture: Some(texture),
            },
            x,
            y,
            width: FLAPPY_PILLAR_WIDTH,
            height,
            spikes: Vec::new(),
            scored: false,
        };
        state.obstacles.push(obstacle);
    }
    log::debug!("Spawned flappy pair at x={x:.0} gap_y={gap_start:.0}");
}

/// Fill the track with fresh pairs starting just off the right edge
pub fn seed_flappy_pairs(state: &mut GameState) {
    let start = state.viewport.width;
    for i in 0..FLAPPY_SEED_PAIRS {
        push_flappy_pair(state, start + i as f32 * FLAPPY_SPACING);
    }
}
