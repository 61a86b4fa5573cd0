//! Opposing force exerted by a hooked fish.

/// Fatigue never takes a fish below this share of its nominal force.
pub const MIN_HEALTH_FACTOR: f32 = 0.2;

/// Force multiplier for the battle phase reached after `elapsed` seconds.
///
/// An opening pull, a short lull, a struggle spike and then fatigue.
pub fn phase_multiplier(elapsed: f32) -> f32 {
    if elapsed < 1.0 {
        1.0
    } else if elapsed < 3.0 {
        0.8
    } else if elapsed < 5.0 {
        1.1
    } else {
        0.5
    }
}

/// Scales force by remaining health, floored at [`MIN_HEALTH_FACTOR`].
pub fn health_factor(health_fraction: f32) -> f32 {
    health_fraction.clamp(MIN_HEALTH_FACTOR, 1.0)
}

/// Deterministic force pattern of one fish. Holds no battle state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceModel {
    pub base_strength: f32,
}

impl ForceModel {
    pub fn new(base_strength: f32) -> Self {
        Self { base_strength }
    }

    /// Opposing force after `elapsed` seconds at the given health fraction.
    pub fn opposing_force(&self, elapsed: f32, health_fraction: f32) -> f32 {
        self.base_strength * phase_multiplier(elapsed) * health_factor(health_fraction)
    }
}
