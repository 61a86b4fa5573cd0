//! Data loading utilities for Hookline.

use common::{ensure, GameError, GameResult};
use serde::Deserialize;

fn default_points() -> u32 {
    1
}

fn default_max_depth() -> f32 {
    10.0
}

/// Pull characteristics of a hookable fish.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct FishStats {
    /// Nominal pulling force before phase and fatigue modifiers.
    pub base_strength: f32,
    /// Depth units per second gained by the player while reeling cleanly.
    pub catch_speed: f32,
    /// Depth units per second the fish regains when the line is slack.
    pub escape_speed: f32,
    /// Depth at which the fish counts as escaped.
    #[serde(default = "default_max_depth")]
    pub max_depth: f32,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl FishStats {
    /// Creates stats worth one point with the default escape depth.
    pub fn new(base_strength: f32, catch_speed: f32, escape_speed: f32) -> Self {
        Self {
            base_strength,
            catch_speed,
            escape_speed,
            max_depth: default_max_depth(),
            points: default_points(),
        }
    }

    /// Rejects non-positive or non-finite stats.
    pub fn validate(&self) -> GameResult<()> {
        ensure(positive(self.base_strength), "base_strength must be positive")?;
        ensure(positive(self.catch_speed), "catch_speed must be positive")?;
        ensure(positive(self.escape_speed), "escape_speed must be positive")?;
        ensure(positive(self.max_depth), "max_depth must be positive")
    }
}

impl Default for FishStats {
    fn default() -> Self {
        Self::new(8.0, 2.0, 3.0)
    }
}

/// Flavor of a non-fish catch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ObjectKind {
    Ball,
    Shoe,
    Rabbit,
    #[default]
    Other,
}

/// Physical characteristics of a hookable object.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ObjectStats {
    #[serde(default)]
    pub object_kind: ObjectKind,
    /// Downward acceleration applied while hooked.
    pub weight: f32,
    pub pull_speed: f32,
    /// Maximum downward displacement from the hook point.
    pub max_pull_depth: f32,
    #[serde(default = "default_points")]
    pub points: u32,
}

impl ObjectStats {
    pub fn new(weight: f32, pull_speed: f32, max_pull_depth: f32) -> Self {
        Self {
            object_kind: ObjectKind::Other,
            weight,
            pull_speed,
            max_pull_depth,
            points: default_points(),
        }
    }

    /// Rejects negative weight and non-positive speed or depth.
    pub fn validate(&self) -> GameResult<()> {
        ensure(
            self.weight.is_finite() && self.weight >= 0.0,
            "weight must be non-negative",
        )?;
        ensure(positive(self.pull_speed), "pull_speed must be positive")?;
        ensure(positive(self.max_pull_depth), "max_pull_depth must be positive")
    }
}

impl Default for ObjectStats {
    fn default() -> Self {
        Self::new(5.0, 2.0, 10.0)
    }
}

/// Stat block of a catch target, tagged by `kind` in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind")]
pub enum TargetStats {
    Fish(FishStats),
    Object(ObjectStats),
}

impl TargetStats {
    pub fn validate(&self) -> GameResult<()> {
        match self {
            TargetStats::Fish(stats) => stats.validate(),
            TargetStats::Object(stats) => stats.validate(),
        }
    }

    /// Points awarded when a target with these stats is collected.
    pub fn points(&self) -> u32 {
        match self {
            TargetStats::Fish(stats) => stats.points,
            TargetStats::Object(stats) => stats.points,
        }
    }
}

/// Catch target definition loaded from JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct TargetSpec {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub stats: TargetStats,
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Loads a list of [`TargetSpec`] from the given JSON file path.
pub fn load_targets(path: &str) -> GameResult<Vec<TargetSpec>> {
    let data = std::fs::read_to_string(path)?;
    parse_targets(&data)
}

/// Loads [`TargetSpec`] definitions embedded at compile time (used on WASM).
pub fn load_targets_embedded() -> GameResult<Vec<TargetSpec>> {
    parse_targets(include_str!("../../../assets/targets.json"))
}

fn parse_targets(data: &str) -> GameResult<Vec<TargetSpec>> {
    let targets: Vec<TargetSpec> = serde_json::from_str(data)?;
    if targets.is_empty() {
        return Err(GameError::InvalidOperation);
    }
    for target in &targets {
        target.stats.validate()?;
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sample_data() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/targets.json");
        let targets = load_targets(path).expect("targets");
        assert!(!targets.is_empty());
    }

    #[test]
    fn embedded_targets_load() {
        let targets = load_targets_embedded().expect("targets");
        assert!(targets
            .iter()
            .any(|t| matches!(t.stats, TargetStats::Fish(_))));
        assert!(targets
            .iter()
            .any(|t| matches!(t.stats, TargetStats::Object(_))));
    }

    #[test]
    fn parse_failure_when_empty() {
        let res = parse_targets("[]");
        assert!(matches!(res, Err(GameError::InvalidOperation)));
    }

    #[test]
    fn parse_failure_on_malformed_json() {
        let res = parse_targets("[{\"id\": ");
        assert!(matches!(res, Err(GameError::Parse(_))));
    }

    #[test]
    fn parse_simple_fish() {
        let json = r#"[{"id": "A", "name": "A", "kind": "Fish",
            "base_strength": 8.0, "catch_speed": 2.0, "escape_speed": 3.0}]"#;
        let targets = parse_targets(json).expect("targets");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, "A");
        match targets[0].stats {
            TargetStats::Fish(stats) => {
                assert_eq!(stats, FishStats::new(8.0, 2.0, 3.0));
                assert_eq!(stats.max_depth, 10.0);
            }
            other => panic!("expected fish, got {:?}", other),
        }
    }

    #[test]
    fn parse_simple_object() {
        let json = r#"[{"id": "B", "name": "Boot", "kind": "Object",
            "object_kind": "Shoe", "weight": 5.0, "pull_speed": 2.0,
            "max_pull_depth": 10.0, "points": 4}]"#;
        let targets = parse_targets(json).expect("targets");
        match targets[0].stats {
            TargetStats::Object(stats) => {
                assert_eq!(stats.object_kind, ObjectKind::Shoe);
                assert_eq!(stats.points, 4);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_catch_speed() {
        let json = r#"[{"id": "A", "name": "A", "kind": "Fish",
            "base_strength": 8.0, "catch_speed": 0.0, "escape_speed": 3.0}]"#;
        assert!(matches!(
            parse_targets(json),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn object_validation() {
        assert!(ObjectStats::default().validate().is_ok());
        assert!(ObjectStats::new(-1.0, 2.0, 10.0).validate().is_err());
        assert!(ObjectStats::new(5.0, 2.0, 0.0).validate().is_err());
    }
}
