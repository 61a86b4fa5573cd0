//! Fishing minigame mechanics: the fish force model, the tension battle and
//! the direct pull used for non-fish catches.

mod battle;
mod config;
pub mod force;
mod object;

pub use battle::{BattleResult, BattleSession, BattleTick, LossCause};
pub use config::TensionConfig;
pub use force::ForceModel;
pub use object::{LineSpan, ObjectPull, ObjectTick};
