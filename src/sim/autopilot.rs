//! Demo-mode player
//!
//! Reads the same state the player sees and decides whether this tick's input
//! should be a jump. Used by the attract screen and the headless runner.

use super::collision::is_grounded;
use super::state::{GameMode, GameState, ObstacleKind, PairHalf};
use crate::consts::*;

/// Ticks of warning before running off the supporting edge
const EDGE_LEAD_TICKS: f32 = 2.0;
/// Ticks of warning before a spike or a wall
const HAZARD_LEAD_TICKS: f32 = 4.0;
/// Flap once the bottom edge sinks this close to the gap's lower lip
const FLAP_MARGIN: f32 = 25.0;
/// Cruising height above the lava when no pair is ahead
const FLAPPY_CRUISE_HEIGHT: f32 = 120.0;

/// Whether the autopilot would jump (or flap) right now
pub fn wants_jump(state: &GameState) -> bool {
    match state.mode {
        GameMode::Normal => wants_runner_jump(state),
        GameMode::Flappy => wants_flap(state),
    }
}

fn wants_runner_jump(state: &GameState) -> bool {
    let player = &state.player;
    let Some(support) = state.obstacles.iter().find(|o| is_grounded(player, o)) else {
        return false;
    };
    let speed = state.game_speed;

    // About to lose the floor
    if support.right() - player.pos.x <= speed * EDGE_LEAD_TICKS {
        return true;
    }

    let lead = speed * HAZARD_LEAD_TICKS + COLLISION_EPSILON;
    let ahead = |x: f32| x >= player.bounds().max.x && x - player.bounds().max.x <= lead;

    if support.spike_triangles().any(|s| ahead(s.left)) {
        return true;
    }

    // A wall rising above the current surface
    state.obstacles.iter().any(|o| {
        matches!(o.kind, ObstacleKind::Pillar { .. })
            && ahead(o.x)
            && o.y < player.bottom() - COLLISION_EPSILON
    })
}

fn wants_flap(state: &GameState) -> bool {
    let player = &state.player;
    if player.velocity < 0.0 {
        return false;
    }

    let next_gap = state
        .obstacles
        .iter()
        .filter(|o| {
            matches!(
                o.kind,
                ObstacleKind::FlappyPillar {
                    half: PairHalf::Top,
                    ..
                }
            )
        })
        .find(|o| o.right() > player.pos.x);

    let floor = match next_gap {
        Some(top) => top.height + FLAPPY_GAP - FLAP_MARGIN,
        None => state.viewport.lava_y - FLAPPY_CRUISE_HEIGHT,
    };
    player.bottom() >= floor
}
