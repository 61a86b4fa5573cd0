/// Signals consumed by one [`crate::CaptureRig::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepInput {
    /// Reel action newly asserted this step.
    pub pull_impulse: bool,
    /// Reel action currently held.
    pub pull_held: bool,
    /// Lowering newly requested this step.
    pub lower_requested: bool,
}

impl StepInput {
    /// A single reel tap.
    pub fn tap() -> Self {
        Self {
            pull_impulse: true,
            pull_held: true,
            lower_requested: false,
        }
    }

    /// Reel held down since an earlier step.
    pub fn hold() -> Self {
        Self {
            pull_held: true,
            ..Self::default()
        }
    }

    pub fn lower() -> Self {
        Self {
            lower_requested: true,
            ..Self::default()
        }
    }
}

/// Raw button states from whatever device drives the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawButtons {
    pub lower: bool,
    pub reel: bool,
}

/// Turns held button states into edge-triggered [`StepInput`]s.
#[derive(Clone, Debug, Default)]
pub struct InputLatch {
    previous: RawButtons,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples this step's buttons. Edges fire only on a released-to-pressed change.
    pub fn sample(&mut self, raw: RawButtons) -> StepInput {
        let input = StepInput {
            pull_impulse: raw.reel && !self.previous.reel,
            pull_held: raw.reel,
            lower_requested: raw.lower && !self.previous.lower,
        };
        self.previous = raw;
        input
    }
}
