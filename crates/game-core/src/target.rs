//! Hookable entities and what the rig does with them once hooked.

use common::{lerp, GameResult, Vec2};
use data::{FishStats, ObjectStats, TargetSpec, TargetStats};
use fishing::{
    BattleResult, BattleSession, BattleTick, LineSpan, ObjectPull, ObjectTick, TensionConfig,
};

/// Handle of a target owned by the spawn system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Fish,
    Object,
}

/// Catchable entity as seen by the rig.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchTarget {
    pub id: TargetId,
    pub name: String,
    pub stats: TargetStats,
    pub position: Vec2,
}

impl CatchTarget {
    pub fn fish(id: TargetId, stats: FishStats, position: Vec2) -> GameResult<Self> {
        stats.validate()?;
        Ok(Self {
            id,
            name: String::from("fish"),
            stats: TargetStats::Fish(stats),
            position,
        })
    }

    pub fn object(id: TargetId, stats: ObjectStats, position: Vec2) -> GameResult<Self> {
        stats.validate()?;
        Ok(Self {
            id,
            name: format!("{:?}", stats.object_kind).to_lowercase(),
            stats: TargetStats::Object(stats),
            position,
        })
    }

    /// Instantiates a loaded [`TargetSpec`] at `position`.
    pub fn from_spec(id: TargetId, spec: &TargetSpec, position: Vec2) -> GameResult<Self> {
        spec.stats.validate()?;
        Ok(Self {
            id,
            name: spec.name.clone(),
            stats: spec.stats,
            position,
        })
    }

    pub fn kind(&self) -> TargetKind {
        match self.stats {
            TargetStats::Fish(_) => TargetKind::Fish,
            TargetStats::Object(_) => TargetKind::Object,
        }
    }

    pub fn points(&self) -> u32 {
        self.stats.points()
    }
}

/// Per-tick view of whichever capture variant is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureTick {
    Battle(BattleTick),
    Pull(ObjectTick),
}

impl CaptureTick {
    pub fn result(&self) -> BattleResult {
        match self {
            CaptureTick::Battle(tick) => tick.result,
            CaptureTick::Pull(tick) => tick.result,
        }
    }
}

/// How a hooked target is brought in.
#[derive(Clone, Debug)]
pub enum Capability {
    /// Fish: tug-of-war through a [`BattleSession`].
    TensionBattle(BattleSession),
    /// Objects: sink under weight, land by holding the reel.
    GravityPull(ObjectPull),
}

impl Capability {
    /// Starts the capture variant for `stats`.
    ///
    /// `line_fraction` is the current line position in `0..=1` between the
    /// rig's minimum and maximum length and seeds a fish's starting depth.
    pub fn engage(
        stats: &TargetStats,
        tension: TensionConfig,
        line_fraction: f32,
    ) -> GameResult<Self> {
        match stats {
            TargetStats::Fish(fish) => {
                let depth = line_fraction.clamp(0.0, 1.0) * fish.max_depth;
                Ok(Capability::TensionBattle(BattleSession::begin(tension, *fish, depth)?))
            }
            TargetStats::Object(object) => Ok(Capability::GravityPull(ObjectPull::new(*object)?)),
        }
    }

    /// Runs one capture tick and updates `line` to match.
    ///
    /// A fish drives the line length from its depth; an object shortens it
    /// directly while the reel is held.
    pub fn tick(
        &mut self,
        dt: f32,
        pull_impulse: bool,
        pull_held: bool,
        line: &mut LineSpan,
        max_length: f32,
    ) -> CaptureTick {
        match self {
            Capability::TensionBattle(session) => {
                let tick = session.tick(dt, pull_impulse);
                line.length = lerp(line.min_length, max_length, tick.depth_fraction);
                CaptureTick::Battle(tick)
            }
            Capability::GravityPull(pull) => CaptureTick::Pull(pull.tick(dt, pull_held, line)),
        }
    }

    /// Vertical displacement of the target from the line endpoint.
    pub fn offset(&self) -> f32 {
        match self {
            Capability::TensionBattle(_) => 0.0,
            Capability::GravityPull(pull) => pull.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(length: f32) -> LineSpan {
        LineSpan {
            length,
            min_length: 0.5,
            reel_speed: 3.0,
        }
    }

    #[test]
    fn fish_depth_seeded_from_line() {
        let stats = TargetStats::Fish(FishStats::default());
        match Capability::engage(&stats, TensionConfig::default(), 0.7).unwrap() {
            Capability::TensionBattle(session) => assert!((session.depth() - 7.0).abs() < 1e-5),
            other => panic!("expected battle, got {:?}", other),
        }
    }

    #[test]
    fn battle_maps_depth_onto_line() {
        let stats = TargetStats::Fish(FishStats::default());
        let mut cap = Capability::engage(&stats, TensionConfig::default(), 0.5).unwrap();
        let mut line = span(2.75);
        let tick = cap.tick(0.1, false, false, &mut line, 5.0);
        match tick {
            CaptureTick::Battle(b) => {
                let expected = 0.5 + 4.5 * b.depth_fraction;
                assert!((line.length - expected).abs() < 1e-5);
                assert!(line.length > 2.75);
            }
            other => panic!("expected battle tick, got {:?}", other),
        }
    }

    #[test]
    fn object_ignores_impulse_without_hold() {
        let stats = TargetStats::Object(ObjectStats::default());
        let mut cap = Capability::engage(&stats, TensionConfig::default(), 0.5).unwrap();
        let mut line = span(3.0);
        cap.tick(0.1, true, false, &mut line, 5.0);
        assert_eq!(line.length, 3.0);
        cap.tick(0.1, false, true, &mut line, 5.0);
        assert!(line.length < 3.0);
        assert!(cap.offset() <= 0.0);
    }

    #[test]
    fn loaded_targets_keep_names_and_points() {
        let specs = data::load_targets_embedded().unwrap();
        for (i, spec) in specs.iter().enumerate() {
            let target = CatchTarget::from_spec(TargetId(i as u64), spec, Vec2::ZERO).unwrap();
            assert_eq!(target.name, spec.name);
            assert_eq!(target.points(), spec.stats.points());
        }
    }

    #[test]
    fn invalid_fish_rejected() {
        let res = CatchTarget::fish(TargetId(1), FishStats::new(0.0, 2.0, 3.0), Vec2::ZERO);
        assert!(res.is_err());
    }
}
