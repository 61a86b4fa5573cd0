//! Direct-pull capture of non-fish objects.

use common::GameResult;
use data::ObjectStats;

use crate::BattleResult;

/// Result of one [`ObjectPull::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectTick {
    pub result: BattleResult,
    /// Vertical displacement from the hook point, never below `-max_pull_depth`.
    pub offset: f32,
    pub velocity: f32,
    pub line_length: f32,
}

/// Line span the pull acts on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpan {
    pub length: f32,
    pub min_length: f32,
    /// Shortening speed while the reel is held.
    pub reel_speed: f32,
}

/// Hooked object sinking under its own weight.
///
/// There is no tension model: holding the reel shortens the line and reaching
/// the minimum length lands the object.
#[derive(Clone, Debug)]
pub struct ObjectPull {
    stats: ObjectStats,
    velocity: f32,
    offset: f32,
    result: BattleResult,
}

impl ObjectPull {
    pub fn new(stats: ObjectStats) -> GameResult<Self> {
        stats.validate()?;
        Ok(Self {
            stats,
            velocity: 0.0,
            offset: 0.0,
            result: BattleResult::Ongoing,
        })
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn result(&self) -> BattleResult {
        self.result
    }

    /// Advances the pull by `dt` seconds, shortening `line` while `pull_held`.
    pub fn tick(&mut self, dt: f32, pull_held: bool, line: &mut LineSpan) -> ObjectTick {
        if self.result.is_terminal() {
            return self.snapshot(line);
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.velocity -= self.stats.weight * dt;
        self.offset = (self.offset + self.velocity * dt).max(-self.stats.max_pull_depth);

        if pull_held {
            line.length = (line.length - line.reel_speed * dt).max(line.min_length);
            self.offset = (self.offset + self.stats.pull_speed * dt).min(0.0);
        }
        if line.length <= line.min_length {
            line.length = line.min_length;
            self.result = BattleResult::Win;
        }
        self.snapshot(line)
    }

    fn snapshot(&self, line: &LineSpan) -> ObjectTick {
        ObjectTick {
            result: self.result,
            offset: self.offset,
            velocity: self.velocity,
            line_length: line.length,
        }
    }
}
