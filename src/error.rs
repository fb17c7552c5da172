//! Initialization errors
//!
//! The simulation itself never fails: in-run deaths are game events, not errors.
//! What can fail is setting up the surface the game runs against.

/// Errors raised before the first frame is simulated.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Render target not found: {0}")]
    MissingRenderTarget(String),

    #[error("Render target too small: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
