//! Common types shared across Hookline crates.

pub use glam::Vec2;

/// Unified error type for game logic.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("invalid operation")]
    InvalidOperation,
    /// A tuning value or stat block violates its preconditions.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;

/// Returns an [`GameError::InvalidConfig`] unless `cond` holds.
pub fn ensure(cond: bool, msg: impl Into<String>) -> GameResult<()> {
    if cond {
        Ok(())
    } else {
        Err(GameError::InvalidConfig(msg.into()))
    }
}

/// Linear interpolation between `a` and `b`, `t` clamped to `0..=1`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Position of `value` between `a` and `b`, clamped to `0..=1`.
///
/// Returns 0 when the range is empty.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}
