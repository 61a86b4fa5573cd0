use common::{GameResult, Vec2};
use log::{debug, info};

use crate::input::{InputLatch, RawButtons};
use crate::rig::{CaptureRig, RigState, TargetResolved};
use crate::target::{CatchTarget, TargetKind};
use crate::GameConfig;

/// Distance at which the line endpoint touches a target.
pub const HOOK_RADIUS: f32 = 0.3;

/// Settings for a scripted headless run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunOptions {
    /// Fixed step length in seconds.
    pub dt: f32,
    /// Steps between reel taps while fighting a fish. At least 2.
    pub tap_every: u32,
    pub max_steps: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dt: 0.1,
            tap_every: 5,
            max_steps: 10_000,
        }
    }
}

/// What a finished run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub steps: u64,
    pub score: u32,
    pub resolutions: Vec<TargetResolved>,
}

/// Drives a [`CaptureRig`] over a static pond with a scripted player.
///
/// Stands in for the game loop: it owns the targets, checks for contact
/// between the line endpoint and a target, and applies resolution events.
pub struct HeadlessApp {
    rig: CaptureRig,
    pond: Vec<CatchTarget>,
    latch: InputLatch,
    options: RunOptions,
    steps: u64,
    battle_steps: u64,
    resolutions: Vec<TargetResolved>,
}

impl HeadlessApp {
    pub fn new(config: &GameConfig, pond: Vec<CatchTarget>, options: RunOptions) -> GameResult<Self> {
        common::ensure(
            options.dt.is_finite() && options.dt > 0.0,
            "dt must be positive",
        )?;
        Ok(Self {
            rig: CaptureRig::from_config(config)?,
            pond,
            latch: InputLatch::new(),
            options: RunOptions {
                tap_every: options.tap_every.max(2),
                ..options
            },
            steps: 0,
            battle_steps: 0,
            resolutions: Vec::new(),
        })
    }

    pub fn rig(&self) -> &CaptureRig {
        &self.rig
    }

    pub fn pond(&self) -> &[CatchTarget] {
        &self.pond
    }

    fn buttons(&self) -> RawButtons {
        match self.rig.state() {
            RigState::Idle => RawButtons {
                lower: true,
                reel: false,
            },
            RigState::Battling => {
                let reel = match self.rig.snapshot().hooked.map(|h| h.kind) {
                    Some(TargetKind::Object) => true,
                    _ => self.battle_steps % u64::from(self.options.tap_every) == 0,
                };
                RawButtons { lower: false, reel }
            }
            _ => RawButtons::default(),
        }
    }

    /// Runs one step: input, rig update, then contact checks.
    pub fn step(&mut self) -> GameResult<()> {
        let input = self.latch.sample(self.buttons());
        if self.rig.state() == RigState::Battling {
            self.battle_steps += 1;
        } else {
            self.battle_steps = 0;
        }
        let snap = self.rig.step(self.options.dt, input);
        self.steps += 1;

        if let Some(resolved) = snap.resolved {
            if resolved.destroys_target() {
                self.pond.retain(|t| t.id != resolved.target);
            }
            self.resolutions.push(resolved);
        }

        if snap.state == RigState::Lowering {
            let endpoint = snap.endpoint;
            if let Some(target) = self
                .pond
                .iter()
                .find(|t| touches(endpoint, t.position))
            {
                if self.rig.try_hook(target)? {
                    debug!("contact with {} at {:?}", target.name, endpoint);
                }
            }
        }
        Ok(())
    }

    /// Steps until the pond is empty or the step budget runs out.
    pub fn run(&mut self) -> GameResult<RunSummary> {
        while !self.pond.is_empty() && self.steps < self.options.max_steps {
            self.step()?;
        }
        info!(
            "run finished after {} steps, score {}",
            self.steps,
            self.rig.score()
        );
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.steps,
            score: self.rig.score(),
            resolutions: self.resolutions.clone(),
        }
    }
}

fn touches(endpoint: Vec2, target: Vec2) -> bool {
    endpoint.distance(target) <= HOOK_RADIUS
}
