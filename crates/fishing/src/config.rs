use common::{ensure, GameResult};
use serde::Deserialize;

/// Tuning shared by every tension battle.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TensionConfig {
    /// Lower edge of the safe band. Below it the line is slack.
    pub min_safe_tension: f32,
    /// Upper edge of the safe band. Above it the line snaps.
    pub max_safe_tension: f32,
    /// Momentum added by one reel impulse.
    pub impulse_gain: f32,
    /// Momentum lost per second.
    pub decay_rate: f32,
    /// Player force cap as a multiple of `max_safe_tension`.
    pub overdrive_factor: f32,
    /// Player force at or below this counts as not pulling.
    pub force_epsilon: f32,
    pub max_health: f32,
    /// Health removed by one clean pull.
    pub damage_per_impulse: f32,
}

impl Default for TensionConfig {
    fn default() -> Self {
        Self {
            min_safe_tension: 2.0,
            max_safe_tension: 15.0,
            impulse_gain: 4.0,
            decay_rate: 8.0,
            overdrive_factor: 1.5,
            force_epsilon: 0.01,
            max_health: 100.0,
            damage_per_impulse: 10.0,
        }
    }
}

impl TensionConfig {
    /// Fails fast on values that would make a battle ill-defined.
    pub fn validate(&self) -> GameResult<()> {
        ensure(
            self.min_safe_tension.is_finite() && self.max_safe_tension.is_finite(),
            "safe tension band must be finite",
        )?;
        ensure(
            self.max_safe_tension > self.min_safe_tension,
            "max_safe_tension must exceed min_safe_tension",
        )?;
        ensure(positive(self.impulse_gain), "impulse_gain must be positive")?;
        ensure(positive(self.decay_rate), "decay_rate must be positive")?;
        ensure(
            self.overdrive_factor.is_finite() && self.overdrive_factor >= 1.0,
            "overdrive_factor must be at least 1",
        )?;
        ensure(
            self.force_epsilon.is_finite() && self.force_epsilon >= 0.0,
            "force_epsilon must be non-negative",
        )?;
        ensure(positive(self.max_health), "max_health must be positive")?;
        ensure(
            positive(self.damage_per_impulse),
            "damage_per_impulse must be positive",
        )
    }

    /// Highest player force a battle will ever register.
    pub fn player_force_cap(&self) -> f32 {
        self.max_safe_tension * self.overdrive_factor
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
