//! Collision detection and response for the runner
//!
//! Every test here is a pure predicate except `resolve_landing`, which is the
//! one mutator and is only called after `is_landing` holds. All bands use the
//! shared `COLLISION_EPSILON` so near-miss landings and narrow spike clips are
//! judged the same way everywhere.

use super::geometry::SpikeTriangle;
use super::state::{DeathCause, Obstacle, ObstacleKind, Player};
use crate::consts::*;

/// Player descending onto the obstacle's top surface this tick.
///
/// Swept against the previous position so fast falls cannot tunnel through
/// thin platforms: the bottom edge was at or above the surface (within
/// epsilon) last tick and has reached it now.
pub fn is_landing(player: &Player, obstacle: &Obstacle) -> bool {
    if !obstacle.is_support() || player.velocity <= 0.0 {
        return false;
    }
    let top = obstacle.y;
    player.prev_bottom() <= top + COLLISION_EPSILON
        && player.bottom() >= top - COLLISION_EPSILON
        && player.bounds().overlaps_x(&obstacle.bounds())
}

/// Rest the player exactly on the obstacle's top surface
pub fn resolve_landing(player: &mut Player, obstacle: &Obstacle) {
    player.pos.y = obstacle.y - player.size.y;
    player.prev_y = player.pos.y;
    player.velocity = 0.0;
    player.jumping = false;
}

/// Player standing on the obstacle (bottom edge within the band, x-spans overlapping)
pub fn is_grounded(player: &Player, obstacle: &Obstacle) -> bool {
    obstacle.is_support()
        && (player.bottom() - obstacle.y).abs() <= COLLISION_EPSILON
        && player.bounds().overlaps_x(&obstacle.bounds())
}

/// Player's bottom edge is below a spike's outline at the player's center.
///
/// The outline is the rising edge on the left half of the span and the falling
/// edge on the right half. The player must also reach above the spike base,
/// so passing underneath the host never counts.
pub fn spike_collision(player: &Player, spike: &SpikeTriangle) -> bool {
    let bounds = player.bounds();
    if bounds.max.x < spike.left || bounds.min.x > spike.right() {
        return false;
    }
    if bounds.min.y >= spike.base_y {
        return false;
    }
    let boundary = spike.surface_y_at(player.center_x());
    player.bottom() > boundary + COLLISION_EPSILON
}

/// Player ran into a pillar's left or right face.
///
/// Overlap counts as a side hit only when the player is below the top surface
/// (beyond epsilon) and within `depth_limit` of a face. A clean top landing
/// therefore never registers.
pub fn pillar_side_collision(player: &Player, obstacle: &Obstacle, depth_limit: f32) -> bool {
    if !obstacle.is_pillar() {
        return false;
    }
    let p = player.bounds();
    let o = obstacle.bounds();
    if !p.overlaps(&o) {
        return false;
    }
    if p.max.y <= o.min.y + COLLISION_EPSILON {
        return false;
    }
    let left_depth = p.max.x - o.min.x;
    let right_depth = o.max.x - p.min.x;
    left_depth <= depth_limit || right_depth <= depth_limit
}

/// Any overlap with a flappy pillar is fatal
pub fn flappy_collision(player: &Player, obstacle: &Obstacle) -> bool {
    obstacle.is_flappy() && player.bounds().overlaps(&obstacle.bounds())
}

/// Run every fatal test that applies to this obstacle.
///
/// `scroll_speed` widens the side-hit margin so a fast pillar cannot jump past
/// the face band in a single tick.
pub fn fatal_collision(player: &Player, obstacle: &Obstacle, scroll_speed: f32) -> Option<DeathCause> {
    match obstacle.kind {
        ObstacleKind::FlappyPillar { .. } => {
            flappy_collision(player, obstacle).then_some(DeathCause::FlappyPillar)
        }
        ObstacleKind::Platform | ObstacleKind::Pillar { .. } => {
            if obstacle.spike_triangles().any(|s| spike_collision(player, &s)) {
                return Some(DeathCause::Spike);
            }
            let depth_limit = SIDE_HIT_MARGIN + scroll_speed;
            pillar_side_collision(player, obstacle, depth_limit).then_some(DeathCause::PillarSide)
        }
    }
}

/// Player's bottom edge reached the lava line
#[inline]
pub fn touches_lava(player: &Player, lava_y: f32) -> bool {
    player.bottom() >= lava_y
}
