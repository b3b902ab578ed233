pub mod api;
pub mod catalog;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod games;
pub mod input;
pub mod session;

// Re-export key types at crate root for convenience
pub use api::game::{GameContext, GameSignal, MiniGame};
pub use api::types::{GameEvent, LevelId, QuestEvent, SoundCue, SoundEvent};
pub use catalog::level::{Level, LevelKind, Module};
pub use catalog::Catalog;
pub use crate::core::progress::{Advance, LevelUp, Progress, ProgressionEngine};
pub use crate::core::rng::Rng;
pub use crate::core::timers::{Scheduler, TimerId};
pub use dispatch::{ContentTag, Mount};
pub use error::{CatalogError, ConfigError};
pub use input::queue::{InputEvent, InputQueue};
pub use session::{AdvanceMode, QuestConfig, QuestSession, QuestSnapshot, QuestSummary};
