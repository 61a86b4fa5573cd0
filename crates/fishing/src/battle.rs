//! Tension battle between the player and a hooked fish.

use common::{ensure, inverse_lerp, GameResult};
use data::FishStats;
use log::debug;

use crate::{ForceModel, TensionConfig};

/// Outcome of a [`BattleSession::tick`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleResult {
    /// The battle continues.
    Ongoing,
    /// The fish reached the surface or ran out of health.
    Win,
    /// The line snapped or the fish escaped.
    Lose,
}

impl BattleResult {
    pub fn is_terminal(self) -> bool {
        self != BattleResult::Ongoing
    }
}

/// Why a battle ended in [`BattleResult::Lose`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    /// Tension exceeded the safe maximum.
    LineSnapped,
    /// The fish reached the maximum depth.
    Escaped,
}

/// Immutable view of a battle after one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattleTick {
    pub result: BattleResult,
    pub loss: Option<LossCause>,
    pub elapsed: f32,
    pub depth: f32,
    /// `depth / max_depth`, 0 at the surface.
    pub depth_fraction: f32,
    pub momentum: f32,
    pub player_force: f32,
    pub opposing_force: f32,
    pub tension: f32,
    /// Tension position inside the safe band, pinned to 1 on a win and 0 on a loss.
    pub tension_fraction: f32,
    pub min_safe_tension: f32,
    pub max_safe_tension: f32,
    pub health: f32,
    pub health_fraction: f32,
    /// Whether this tick's impulse damaged the fish.
    pub clean_pull: bool,
}

/// Per-catch battle state. Lives from hook until the first terminal result.
#[derive(Clone, Debug)]
pub struct BattleSession {
    config: TensionConfig,
    force: ForceModel,
    catch_speed: f32,
    escape_speed: f32,
    max_depth: f32,
    elapsed: f32,
    depth: f32,
    momentum: f32,
    health: f32,
    player_force: f32,
    opposing_force: f32,
    tension: f32,
    clean_pull: bool,
    result: BattleResult,
    loss: Option<LossCause>,
}

impl BattleSession {
    /// Starts a battle against a fish hooked at `initial_depth`.
    ///
    /// The depth is clamped into `0..=stats.max_depth`.
    pub fn begin(
        config: TensionConfig,
        stats: FishStats,
        initial_depth: f32,
    ) -> GameResult<Self> {
        config.validate()?;
        stats.validate()?;
        ensure(initial_depth.is_finite(), "initial depth must be finite")?;
        let force = ForceModel::new(stats.base_strength);
        let opposing_force = force.opposing_force(0.0, 1.0);
        Ok(Self {
            config,
            force,
            catch_speed: stats.catch_speed,
            escape_speed: stats.escape_speed,
            max_depth: stats.max_depth,
            elapsed: 0.0,
            depth: initial_depth.clamp(0.0, stats.max_depth),
            momentum: 0.0,
            health: config.max_health,
            player_force: 0.0,
            opposing_force,
            tension: opposing_force,
            clean_pull: false,
            result: BattleResult::Ongoing,
            loss: None,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.result.is_terminal()
    }

    pub fn result(&self) -> BattleResult {
        self.result
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tension(&self) -> f32 {
        self.tension
    }

    pub fn config(&self) -> &TensionConfig {
        &self.config
    }

    pub fn depth_fraction(&self) -> f32 {
        (self.depth / self.max_depth).clamp(0.0, 1.0)
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / self.config.max_health).clamp(0.0, 1.0)
    }

    /// Advances the battle by `dt` seconds.
    ///
    /// `pull_impulse` must only be true on the tick the reel action is newly
    /// asserted. Once a terminal result is reached further ticks change nothing
    /// and report the same result.
    pub fn tick(&mut self, dt: f32, pull_impulse: bool) -> BattleTick {
        if !self.is_active() {
            return self.snapshot();
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clean_pull = false;

        self.elapsed += dt;
        if pull_impulse {
            self.momentum += self.config.impulse_gain;
        }
        self.momentum = (self.momentum - self.config.decay_rate * dt).max(0.0);
        self.player_force = self.momentum.clamp(0.0, self.config.player_force_cap());
        self.opposing_force = self
            .force
            .opposing_force(self.elapsed, self.health_fraction());
        self.tension = (self.player_force + self.opposing_force).abs();

        if self.tension > self.config.max_safe_tension {
            debug!(
                "line snapped at tension {:.2} (limit {:.2})",
                self.tension, self.config.max_safe_tension
            );
            return self.finish(BattleResult::Lose, Some(LossCause::LineSnapped));
        }

        let pulling = self.player_force > self.config.force_epsilon;
        if pulling && self.tension >= self.config.min_safe_tension {
            self.depth -= self.catch_speed * dt;
        } else {
            self.depth += self.escape_speed * dt;
        }
        self.depth = self.depth.clamp(0.0, self.max_depth);

        if pull_impulse
            && self.tension > self.config.min_safe_tension
            && self.tension < self.config.max_safe_tension
        {
            self.clean_pull = true;
            self.health -= self.config.damage_per_impulse;
            if self.health <= 0.0 {
                self.health = 0.0;
                debug!("fish exhausted at depth {:.2}", self.depth);
                return self.finish(BattleResult::Win, None);
            }
        }

        if self.depth <= 0.0 {
            self.finish(BattleResult::Win, None)
        } else if self.depth >= self.max_depth {
            self.finish(BattleResult::Lose, Some(LossCause::Escaped))
        } else {
            self.snapshot()
        }
    }

    fn finish(&mut self, result: BattleResult, loss: Option<LossCause>) -> BattleTick {
        self.result = result;
        self.loss = loss;
        self.snapshot()
    }

    /// Current state without advancing the battle.
    pub fn snapshot(&self) -> BattleTick {
        let tension_fraction = match self.result {
            BattleResult::Win => 1.0,
            BattleResult::Lose => 0.0,
            BattleResult::Ongoing => inverse_lerp(
                self.config.min_safe_tension,
                self.config.max_safe_tension,
                self.tension,
            ),
        };
        BattleTick {
            result: self.result,
            loss: self.loss,
            elapsed: self.elapsed,
            depth: self.depth,
            depth_fraction: self.depth_fraction(),
            momentum: self.momentum,
            player_force: self.player_force,
            opposing_force: self.opposing_force,
            tension: self.tension,
            tension_fraction,
            min_safe_tension: self.config.min_safe_tension,
            max_safe_tension: self.config.max_safe_tension,
            health: self.health,
            health_fraction: self.health_fraction(),
            clean_pull: self.clean_pull,
        }
    }
}
