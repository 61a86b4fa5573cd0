//! Capture rig, catch targets and the headless game driver.

mod app;
pub mod collect;
mod config;
mod input;
mod rig;
mod target;

use common::{GameResult, Vec2};
use log::info;

pub use app::{HeadlessApp, RunOptions, RunSummary, HOOK_RADIUS};
pub use config::{GameConfig, RigConfig};
pub use input::{InputLatch, RawButtons, StepInput};
pub use rig::{CaptureRig, HookedView, Outcome, RigSnapshot, RigState, TargetResolved};
pub use target::{Capability, CaptureTick, CatchTarget, TargetId, TargetKind};

/// Vertical gap between demo targets hung below the rod.
const DEMO_SPACING: f32 = 0.9;

/// Places every loaded target type on the line's path, shallowest first.
pub fn demo_pond(config: &GameConfig) -> GameResult<Vec<CatchTarget>> {
    let specs = {
        #[cfg(target_arch = "wasm32")]
        {
            data::load_targets_embedded()?
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/targets.json");
            data::load_targets(path).or_else(|_| data::load_targets_embedded())?
        }
    };
    let rig = &config.rig;
    let mut depth = rig.min_length + 1.0;
    let mut pond = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        if depth >= rig.max_length {
            break;
        }
        let position = rig.anchor - Vec2::new(0.0, depth);
        pond.push(CatchTarget::from_spec(TargetId(i as u64), spec, position)?);
        depth += DEMO_SPACING;
    }
    Ok(pond)
}

/// Runs a scripted session over the demo pond.
pub fn run(config: &GameConfig, options: RunOptions) -> GameResult<RunSummary> {
    config.validate()?;
    let pond = demo_pond(config)?;
    info!("starting run with {} targets", pond.len());
    HeadlessApp::new(config, pond, options)?.run()
}
