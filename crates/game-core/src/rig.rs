//! Rod and line state machine.

use common::{inverse_lerp, GameResult, Vec2};
use fishing::{BattleResult, BattleTick, LineSpan, LossCause, ObjectTick, TensionConfig};
use log::{debug, info, warn};

use crate::collect::CollectMotion;
use crate::config::{GameConfig, RigConfig};
use crate::input::StepInput;
use crate::target::{Capability, CaptureTick, CatchTarget, TargetId, TargetKind};

/// Discrete state of the rig.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RigState {
    Idle,
    Lowering,
    Retracting,
    Battling,
    Collecting,
}

/// How a hooked target left the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Landed and collected. The spawner should destroy the target.
    Caught { points: u32 },
    Escaped,
    LineSnapped,
    /// The player gave up on the catch.
    Abandoned,
}

/// Emitted once per hooked target when the rig lets go of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetResolved {
    pub target: TargetId,
    pub outcome: Outcome,
}

impl TargetResolved {
    /// `true` when the target should be destroyed rather than released back
    /// to its own physics.
    pub fn destroys_target(&self) -> bool {
        matches!(self.outcome, Outcome::Caught { .. })
    }
}

/// Presentation view of the hooked target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HookedView {
    pub id: TargetId,
    pub kind: TargetKind,
    pub position: Vec2,
    pub scale: f32,
}

/// Immutable result of one [`CaptureRig::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigSnapshot {
    pub state: RigState,
    pub line_length: f32,
    pub endpoint: Vec2,
    /// Line position between minimum and maximum length, in `0..=1`.
    ///
    /// While battling a fish this equals the normalised depth.
    pub bar_fraction: f32,
    pub battle: Option<BattleTick>,
    pub pull: Option<ObjectTick>,
    pub hooked: Option<HookedView>,
    pub resolved: Option<TargetResolved>,
    pub score: u32,
}

struct Hooked {
    id: TargetId,
    kind: TargetKind,
    points: u32,
    position: Vec2,
    scale: f32,
    /// Running capture. Taken as soon as the capture reaches a result.
    capability: Option<Capability>,
}

impl Hooked {
    fn view(&self) -> HookedView {
        HookedView {
            id: self.id,
            kind: self.kind,
            position: self.position,
            scale: self.scale,
        }
    }
}

/// Capture state machine owning the line and at most one hooked target.
pub struct CaptureRig {
    config: RigConfig,
    tension: TensionConfig,
    state: RigState,
    line_length: f32,
    hooked: Option<Hooked>,
    collect: Option<CollectMotion>,
    score: u32,
}

impl CaptureRig {
    /// Creates an idle rig with the line fully retracted.
    pub fn new(config: RigConfig, tension: TensionConfig) -> GameResult<Self> {
        config.validate()?;
        tension.validate()?;
        Ok(Self {
            config,
            tension,
            state: RigState::Idle,
            line_length: config.min_length,
            hooked: None,
            collect: None,
            score: 0,
        })
    }

    pub fn from_config(cfg: &GameConfig) -> GameResult<Self> {
        Self::new(cfg.rig, cfg.tension)
    }

    pub fn state(&self) -> RigState {
        self.state
    }

    pub fn line_length(&self) -> f32 {
        self.line_length
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn hooked_id(&self) -> Option<TargetId> {
        self.hooked.as_ref().map(|h| h.id)
    }

    /// Tip of the line, straight below the anchor.
    pub fn endpoint(&self) -> Vec2 {
        self.config.anchor - Vec2::new(0.0, self.line_length)
    }

    fn line_fraction(&self) -> f32 {
        inverse_lerp(self.config.min_length, self.config.max_length, self.line_length)
    }

    fn transition(&mut self, next: RigState) {
        if self.state != next {
            debug!("rig {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Called when the line endpoint touches `target`.
    ///
    /// Returns `Ok(true)` if the target is now hooked. Only a lowering line
    /// with nothing on it can hook; everything else is refused with
    /// `Ok(false)`. Invalid target stats are an error.
    pub fn try_hook(&mut self, target: &CatchTarget) -> GameResult<bool> {
        if self.state != RigState::Lowering || self.hooked.is_some() {
            debug!("hook on {:?} refused in {:?}", target.id, self.state);
            return Ok(false);
        }
        let capability = Capability::engage(&target.stats, self.tension, self.line_fraction())?;
        info!(
            "hooked {} ({:?}) at line length {:.2}",
            target.name, target.id, self.line_length
        );
        self.hooked = Some(Hooked {
            id: target.id,
            kind: target.kind(),
            points: target.points(),
            position: self.endpoint(),
            scale: 1.0,
            capability: Some(capability),
        });
        self.transition(RigState::Battling);
        Ok(true)
    }

    /// Lets go of whatever is on the line and starts retracting.
    ///
    /// Only meaningful while battling or lowering; returns the release event
    /// if a target was hooked.
    pub fn abandon(&mut self) -> Option<TargetResolved> {
        match self.state {
            RigState::Lowering => {
                self.transition(RigState::Retracting);
                None
            }
            RigState::Battling => {
                let resolved = self.release(Outcome::Abandoned);
                self.transition(RigState::Retracting);
                resolved
            }
            _ => None,
        }
    }

    /// Advances the rig by `dt` seconds.
    pub fn step(&mut self, dt: f32, input: StepInput) -> RigSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut capture = None;
        let mut resolved = None;
        match self.state {
            RigState::Idle => {
                if input.lower_requested {
                    self.transition(RigState::Lowering);
                    self.lower(dt);
                }
            }
            RigState::Lowering => self.lower(dt),
            RigState::Retracting => self.retract(dt),
            RigState::Battling => (capture, resolved) = self.battle(dt, input),
            RigState::Collecting => resolved = self.collect(dt),
        }
        let mut snapshot = self.snapshot();
        snapshot.resolved = resolved;
        match capture {
            Some(CaptureTick::Battle(tick)) => snapshot.battle = Some(tick),
            Some(CaptureTick::Pull(tick)) => snapshot.pull = Some(tick),
            None => {}
        }
        snapshot
    }

    /// Current state without advancing.
    pub fn snapshot(&self) -> RigSnapshot {
        RigSnapshot {
            state: self.state,
            line_length: self.line_length,
            endpoint: self.endpoint(),
            bar_fraction: self.line_fraction(),
            battle: None,
            pull: None,
            hooked: self.hooked.as_ref().map(Hooked::view),
            resolved: None,
            score: self.score,
        }
    }

    fn lower(&mut self, dt: f32) {
        self.line_length += self.config.lower_speed * dt;
        if self.line_length >= self.config.max_length {
            self.line_length = self.config.max_length;
            self.transition(RigState::Retracting);
        }
    }

    fn retract(&mut self, dt: f32) {
        self.line_length -= self.config.lower_speed * dt;
        if self.line_length <= self.config.min_length {
            self.line_length = self.config.min_length;
            self.transition(RigState::Idle);
        }
    }

    fn battle(
        &mut self,
        dt: f32,
        input: StepInput,
    ) -> (Option<CaptureTick>, Option<TargetResolved>) {
        let Some(mut hooked) = self.hooked.take() else {
            warn!("battling with nothing hooked, ignoring step");
            return (None, None);
        };
        let Some(mut capability) = hooked.capability.take() else {
            warn!("battling {:?} with no capture running, ignoring step", hooked.id);
            self.hooked = Some(hooked);
            return (None, None);
        };
        let mut line = LineSpan {
            length: self.line_length,
            min_length: self.config.min_length,
            reel_speed: self.config.lower_speed,
        };
        let tick = capability.tick(
            dt,
            input.pull_impulse,
            input.pull_held,
            &mut line,
            self.config.max_length,
        );
        self.line_length = line.length.clamp(self.config.min_length, self.config.max_length);
        hooked.position = self.endpoint() + Vec2::new(0.0, capability.offset());

        let resolved = match tick.result() {
            BattleResult::Ongoing => {
                hooked.capability = Some(capability);
                self.hooked = Some(hooked);
                None
            }
            BattleResult::Win => {
                info!("landed {:?}, collecting", hooked.id);
                self.collect = Some(CollectMotion::new(
                    hooked.position,
                    self.config.keep_position,
                    self.config.collect_arc_height,
                    self.config.collect_duration,
                ));
                self.hooked = Some(hooked);
                self.transition(RigState::Collecting);
                None
            }
            BattleResult::Lose => {
                let outcome = match tick {
                    CaptureTick::Battle(b) if b.loss == Some(LossCause::LineSnapped) => {
                        Outcome::LineSnapped
                    }
                    _ => Outcome::Escaped,
                };
                self.hooked = Some(hooked);
                let resolved = self.release(outcome);
                self.transition(RigState::Retracting);
                resolved
            }
        };
        (Some(tick), resolved)
    }

    fn collect(&mut self, dt: f32) -> Option<TargetResolved> {
        let (Some(hooked), Some(motion)) = (self.hooked.as_mut(), self.collect.as_mut()) else {
            warn!("collecting with nothing hooked, ignoring step");
            return None;
        };
        let frame = motion.advance(dt);
        hooked.position = frame.position;
        hooked.scale = frame.scale;
        if !frame.done {
            return None;
        }
        let points = hooked.points;
        self.score += points;
        info!("collected {:?} for {} points, score {}", hooked.id, points, self.score);
        let resolved = self.release(Outcome::Caught { points });
        self.transition(RigState::Retracting);
        resolved
    }

    /// Drops the hooked target and any running battle or collect motion.
    fn release(&mut self, outcome: Outcome) -> Option<TargetResolved> {
        self.collect = None;
        let hooked = self.hooked.take()?;
        match outcome {
            Outcome::Caught { .. } => {}
            _ => info!("{:?} released: {:?}", hooked.id, outcome),
        }
        Some(TargetResolved {
            target: hooked.id,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::{FishStats, ObjectStats};

    const DT: f32 = 0.1;

    fn rig() -> CaptureRig {
        CaptureRig::new(RigConfig::default(), TensionConfig::default()).expect("rig")
    }

    fn carp() -> CatchTarget {
        CatchTarget::fish(TargetId(1), FishStats::default(), Vec2::new(0.0, -3.0)).unwrap()
    }

    fn boot() -> CatchTarget {
        CatchTarget::object(TargetId(2), ObjectStats::default(), Vec2::new(0.0, -2.0)).unwrap()
    }

    fn lowered_to(rig: &mut CaptureRig, length: f32) {
        rig.step(DT, StepInput::lower());
        while rig.line_length() < length {
            rig.step(DT, StepInput::default());
        }
        assert_eq!(rig.state(), RigState::Lowering);
    }

    #[test]
    fn starts_idle_and_retracted() {
        let rig = rig();
        assert_eq!(rig.state(), RigState::Idle);
        assert_eq!(rig.line_length(), 0.5);
        assert_eq!(rig.endpoint(), Vec2::new(0.0, -0.5));
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = RigConfig {
            lower_speed: 0.0,
            ..RigConfig::default()
        };
        assert!(CaptureRig::new(cfg, TensionConfig::default()).is_err());
    }

    #[test]
    fn idle_waits_for_start_signal() {
        let mut rig = rig();
        let snap = rig.step(DT, StepInput::default());
        assert_eq!(snap.state, RigState::Idle);
        assert_eq!(snap.line_length, 0.5);
    }

    #[test]
    fn empty_drop_bottoms_out_and_returns() {
        let mut rig = rig();
        let mut states = vec![rig.step(DT, StepInput::lower()).state];
        for _ in 0..100 {
            let snap = rig.step(DT, StepInput::default());
            assert!(snap.line_length >= 0.5 && snap.line_length <= 5.0);
            states.push(snap.state);
            if snap.state == RigState::Idle {
                break;
            }
        }
        assert!(states.contains(&RigState::Lowering));
        assert!(states.contains(&RigState::Retracting));
        assert_eq!(rig.state(), RigState::Idle);
        assert_eq!(rig.line_length(), 0.5);
    }

    #[test]
    fn lower_request_ignored_while_retracting() {
        let mut rig = rig();
        rig.step(DT, StepInput::lower());
        while rig.state() != RigState::Retracting {
            rig.step(DT, StepInput::default());
        }
        let before = rig.line_length();
        let snap = rig.step(DT, StepInput::lower());
        assert_eq!(snap.state, RigState::Retracting);
        assert!(snap.line_length < before);
    }

    #[test]
    fn hook_only_while_lowering() {
        let mut rig = rig();
        assert!(!rig.try_hook(&carp()).unwrap());
        lowered_to(&mut rig, 2.0);
        assert!(rig.try_hook(&carp()).unwrap());
        assert_eq!(rig.state(), RigState::Battling);
        assert_eq!(rig.hooked_id(), Some(TargetId(1)));
        // a second target cannot be hooked on top
        assert!(!rig.try_hook(&boot()).unwrap());
        assert_eq!(rig.hooked_id(), Some(TargetId(1)));
    }

    #[test]
    fn no_hook_while_retracting() {
        let mut rig = rig();
        lowered_to(&mut rig, 1.0);
        rig.abandon();
        assert_eq!(rig.state(), RigState::Retracting);
        assert!(!rig.try_hook(&carp()).unwrap());
    }

    #[test]
    fn hooked_fish_snaps_to_endpoint() {
        let mut rig = rig();
        lowered_to(&mut rig, 2.0);
        rig.try_hook(&carp()).unwrap();
        let snap = rig.snapshot();
        let hooked = snap.hooked.expect("hooked");
        assert_eq!(hooked.position, snap.endpoint);
        assert_eq!(hooked.kind, TargetKind::Fish);
    }

    #[test]
    fn slack_battle_loses_and_releases() {
        let mut rig = rig();
        lowered_to(&mut rig, 3.0);
        rig.try_hook(&carp()).unwrap();
        let mut resolved = None;
        for _ in 0..200 {
            let snap = rig.step(DT, StepInput::default());
            assert!(snap.line_length >= 0.5 && snap.line_length <= 5.0);
            if let Some(r) = snap.resolved {
                resolved = Some(r);
                assert_eq!(snap.state, RigState::Retracting);
                assert!(snap.hooked.is_none());
                break;
            }
            let battle = snap.battle.expect("battle tick");
            assert!((snap.bar_fraction - battle.depth_fraction).abs() < 1e-4);
        }
        let resolved = resolved.expect("resolved");
        assert_eq!(resolved.outcome, Outcome::Escaped);
        assert!(!resolved.destroys_target());
        assert_eq!(rig.score(), 0);
    }

    #[test]
    fn overpull_snaps_line() {
        let cfg = TensionConfig {
            impulse_gain: 20.0,
            ..TensionConfig::default()
        };
        let mut rig = CaptureRig::new(RigConfig::default(), cfg).unwrap();
        lowered_to(&mut rig, 3.0);
        rig.try_hook(&carp()).unwrap();
        let snap = rig.step(DT, StepInput::tap());
        assert_eq!(
            snap.resolved,
            Some(TargetResolved {
                target: TargetId(1),
                outcome: Outcome::LineSnapped,
            })
        );
        assert_eq!(snap.battle.map(|b| b.result), Some(BattleResult::Lose));
    }

    #[test]
    fn won_battle_collects_then_retracts() {
        let mut rig = rig();
        lowered_to(&mut rig, 3.0);
        rig.try_hook(&carp()).unwrap();
        let mut step = 0;
        while rig.state() == RigState::Battling {
            let input = if step % 5 == 0 {
                StepInput::tap()
            } else {
                StepInput::default()
            };
            rig.step(DT, input);
            step += 1;
            assert!(step < 500, "battle never ended");
        }
        assert_eq!(rig.state(), RigState::Collecting);

        let mut resolved = None;
        let mut last_scale = 1.0;
        while rig.state() == RigState::Collecting {
            let snap = rig.step(DT, StepInput::default());
            if let Some(view) = snap.hooked {
                assert!(view.scale <= last_scale);
                last_scale = view.scale;
            }
            resolved = resolved.or(snap.resolved);
        }
        let resolved = resolved.expect("resolved");
        assert_eq!(resolved.outcome, Outcome::Caught { points: 1 });
        assert!(resolved.destroys_target());
        assert_eq!(rig.score(), 1);
        assert_eq!(rig.state(), RigState::Retracting);

        for _ in 0..100 {
            if rig.step(DT, StepInput::default()).state == RigState::Idle {
                break;
            }
        }
        assert_eq!(rig.state(), RigState::Idle);
        assert_eq!(rig.line_length(), 0.5);
    }

    #[test]
    fn won_battle_drops_session_before_collecting() {
        let mut rig = rig();
        lowered_to(&mut rig, 3.0);
        rig.try_hook(&carp()).unwrap();
        let mut step = 0;
        while rig.state() == RigState::Battling {
            let owns_battle = matches!(
                rig.hooked.as_ref().and_then(|h| h.capability.as_ref()),
                Some(Capability::TensionBattle(_))
            );
            assert!(owns_battle);
            let input = if step % 5 == 0 {
                StepInput::tap()
            } else {
                StepInput::default()
            };
            rig.step(DT, input);
            step += 1;
            assert!(step < 500, "battle never ended");
        }
        assert_eq!(rig.state(), RigState::Collecting);
        let hooked = rig.hooked.as_ref().expect("target kept for collecting");
        assert!(hooked.capability.is_none());
    }

    #[test]
    fn landed_object_drops_pull_before_collecting() {
        let mut rig = rig();
        lowered_to(&mut rig, 2.0);
        rig.try_hook(&boot()).unwrap();
        for _ in 0..100 {
            if rig.step(DT, StepInput::hold()).state != RigState::Battling {
                break;
            }
        }
        assert_eq!(rig.state(), RigState::Collecting);
        assert!(rig.hooked.as_ref().is_some_and(|h| h.capability.is_none()));
    }

    #[test]
    fn object_reeled_in_by_holding() {
        let mut rig = rig();
        lowered_to(&mut rig, 2.0);
        rig.try_hook(&boot()).unwrap();
        let mut snap = rig.step(DT, StepInput::tap());
        for _ in 0..100 {
            if snap.state != RigState::Battling {
                break;
            }
            assert!(snap.pull.is_some());
            snap = rig.step(DT, StepInput::hold());
        }
        assert_eq!(snap.state, RigState::Collecting);
        assert_eq!(snap.line_length, 0.5);
    }

    #[test]
    fn object_hangs_without_reeling() {
        let mut rig = rig();
        lowered_to(&mut rig, 2.0);
        rig.try_hook(&boot()).unwrap();
        let length = rig.line_length();
        for _ in 0..100 {
            let snap = rig.step(DT, StepInput::default());
            assert_eq!(snap.state, RigState::Battling);
            let pull = snap.pull.expect("pull");
            assert!(pull.offset >= -10.0);
        }
        assert_eq!(rig.line_length(), length);
    }

    #[test]
    fn abandon_releases_target() {
        let mut rig = rig();
        lowered_to(&mut rig, 2.0);
        rig.try_hook(&boot()).unwrap();
        let resolved = rig.abandon().expect("released");
        assert_eq!(resolved.outcome, Outcome::Abandoned);
        assert_eq!(rig.state(), RigState::Retracting);
        assert!(rig.hooked_id().is_none());
        assert!(rig.abandon().is_none());
    }

    #[test]
    fn battling_without_target_is_a_no_op() {
        let mut rig = rig();
        rig.state = RigState::Battling;
        rig.line_length = 2.0;
        let snap = rig.step(DT, StepInput::tap());
        assert_eq!(snap.state, RigState::Battling);
        assert_eq!(snap.line_length, 2.0);
        assert!(snap.battle.is_none());
        assert!(snap.resolved.is_none());

        rig.state = RigState::Collecting;
        let snap = rig.step(DT, StepInput::default());
        assert_eq!(snap.state, RigState::Collecting);
        assert!(snap.resolved.is_none());
    }

    proptest::proptest! {
        #[test]
        fn prop_line_and_hook_invariants(
            steps in proptest::collection::vec(
                (0.0f32..0.3, proptest::bool::ANY, proptest::bool::ANY, proptest::bool::ANY, 0u8..4),
                1..400,
            ),
        ) {
            let mut rig = rig();
            for (dt, impulse, held, lower, action) in steps {
                let input = StepInput {
                    pull_impulse: impulse,
                    pull_held: held,
                    lower_requested: lower,
                };
                let snap = rig.step(dt, input);
                proptest::prop_assert!(snap.line_length >= 0.5 && snap.line_length <= 5.0);
                proptest::prop_assert!((0.0..=1.0).contains(&snap.bar_fraction));
                let hooked_state = matches!(snap.state, RigState::Battling | RigState::Collecting);
                proptest::prop_assert_eq!(snap.hooked.is_some(), hooked_state);
                match action {
                    0 => {
                        rig.try_hook(&carp()).unwrap();
                    }
                    1 => {
                        rig.try_hook(&boot()).unwrap();
                    }
                    2 => {
                        rig.abandon();
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut rig = rig();
        rig.step(DT, StepInput::lower());
        let before = rig.line_length();
        rig.step(f32::NAN, StepInput::default());
        rig.step(-1.0, StepInput::default());
        assert_eq!(rig.line_length(), before);
    }
}
