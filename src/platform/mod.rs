//! Platform abstraction layer
//!
//! Handles the pieces the simulation needs from its host:
//! - Render target dimensions (established once, validated)
//! - Wall-clock to fixed-tick conversion for the render driver

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Logical size of the render target. Obstacle spawn math is expressed against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Y of the lava surface (screen coordinates, y grows downward)
    pub lava_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
            lava_y: VIEW_HEIGHT - LAVA_DEPTH,
        }
    }
}

impl Viewport {
    /// Validate a render target size. Too-small targets abort initialization.
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        if !(width >= MIN_VIEW_WIDTH && height >= MIN_VIEW_HEIGHT) {
            return Err(GameError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            lava_y: height - LAVA_DEPTH,
        })
    }
}

/// Fixed-step accumulator between a variable-rate frame callback and the tick rate.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (milliseconds); returns how many ticks to run.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);

        // Long stalls (tab switch, debugger) are dropped rather than replayed
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Forget timing history (after a pause or visibility change)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_default_lava_line() {
        let view = Viewport::default();
        assert_eq!(view.lava_y, 330.0);
    }

    #[test]
    fn test_viewport_rejects_small_target() {
        assert!(Viewport::new(0.0, 0.0).is_err());
        assert!(Viewport::new(f32::NAN, 400.0).is_err());
        let view = Viewport::new(1024.0, 500.0).unwrap();
        assert_eq!(view.lava_y, 430.0);
    }

    #[test]
    fn test_frame_clock_first_frame_runs_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.0), 1);
    }

    #[test]
    fn test_frame_clock_caps_substeps() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        // 100ms at 60 Hz is six ticks, give or take float residue
        let ticks = clock.advance(100.0);
        assert!((5..=6).contains(&ticks));
        // Huge stall is clamped to 100ms worth
        assert!(clock.advance(10_000.0) <= MAX_SUBSTEPS);
    }
}
