use common::{ensure, GameResult, Vec2};
use fishing::TensionConfig;
use serde::Deserialize;

/// Geometry and timing of the rod.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub min_length: f32,
    pub max_length: f32,
    /// Line units per second while lowering or retracting.
    pub lower_speed: f32,
    /// Rod tip. The line hangs straight down from here.
    pub anchor: Vec2,
    /// Where collected targets fly to.
    pub keep_position: Vec2,
    /// Seconds the collect motion takes.
    pub collect_duration: f32,
    /// Height of the Bézier control point above the hook point.
    pub collect_arc_height: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            min_length: 0.5,
            max_length: 5.0,
            lower_speed: 3.0,
            anchor: Vec2::ZERO,
            keep_position: Vec2::new(-4.0, 2.0),
            collect_duration: 1.0 / 1.2,
            collect_arc_height: 2.0,
        }
    }
}

impl RigConfig {
    pub fn validate(&self) -> GameResult<()> {
        ensure(
            self.min_length.is_finite() && self.min_length >= 0.0,
            "min_length must be non-negative",
        )?;
        ensure(
            self.max_length.is_finite() && self.max_length > self.min_length,
            "max_length must exceed min_length",
        )?;
        ensure(
            self.lower_speed.is_finite() && self.lower_speed > 0.0,
            "lower_speed must be positive",
        )?;
        ensure(
            self.collect_duration.is_finite() && self.collect_duration > 0.0,
            "collect_duration must be positive",
        )?;
        ensure(
            self.anchor.is_finite() && self.keep_position.is_finite(),
            "positions must be finite",
        )?;
        ensure(
            self.collect_arc_height.is_finite(),
            "collect_arc_height must be finite",
        )
    }
}

/// Complete game configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rig: RigConfig,
    pub tension: TensionConfig,
}

impl GameConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&data)
    }

    /// Parses and validates a JSON document.
    pub fn from_json(data: &str) -> GameResult<Self> {
        let cfg: Self = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> GameResult<()> {
        self.rig.validate()?;
        self.tension.validate()
    }
}
