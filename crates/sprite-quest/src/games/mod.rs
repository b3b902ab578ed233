//! Mini-games. Each one is a small state machine behind the `MiniGame`
//! contract; none of them knows about the catalog or the progression engine.

pub mod condition;
pub mod coordinate;
pub mod creative;
pub mod events;
pub mod loops;
pub mod playground;
pub mod quiz;
pub mod workshop;

pub use condition::ConditionGame;
pub use coordinate::CoordinateGame;
pub use creative::CreativeGame;
pub use events::EventsGame;
pub use loops::LoopGame;
pub use playground::PartyPlayground;
pub use quiz::{QuizGame, QuizSet};
pub use workshop::{Workshop, WorkshopMode};

// Custom input kinds (JS → Rust), carried in `InputEvent::Custom`.

// Shared by every game.
/// The in-game "play again" control.
pub const CUSTOM_RESTART: u32 = 1;
/// The in-game "next" control, shown once the level is done.
pub const CUSTOM_NEXT: u32 = 2;
/// Show (or toggle) the hint.
pub const CUSTOM_HINT: u32 = 3;

// Coordinate targeting. `a` is the typed number; NaN clears the field.
pub const CUSTOM_SET_X: u32 = 10;
pub const CUSTOM_SET_Y: u32 = 11;
pub const CUSTOM_LAUNCH: u32 = 12;

// Event rules. `a` is the option index.
pub const CUSTOM_TAP_SPRITE: u32 = 20;
pub const CUSTOM_SELECT_MOTION: u32 = 21;
pub const CUSTOM_SELECT_SOUND: u32 = 22;
pub const CUSTOM_SELECT_PHRASE: u32 = 23;
pub const CUSTOM_SELECT_BACKDROP: u32 = 24;

// Loop. `a` is the repeat count.
pub const CUSTOM_SET_REPEAT: u32 = 30;
pub const CUSTOM_RUN: u32 = 31;

// Workshop.
pub const CUSTOM_DROP_BLOCK: u32 = 40;

// Creative show. `a` is the step index (0 move, 1 jump, 2 spin).
pub const CUSTOM_ADD_STEP: u32 = 50;
pub const CUSTOM_START_SHOW: u32 = 51;

// Quiz. `a` is the answer index.
pub const CUSTOM_ANSWER: u32 = 60;

// Party playground.
pub const CUSTOM_MOVE_CAT: u32 = 70;
pub const CUSTOM_CLICK_STAR: u32 = 71;
pub const CUSTOM_COLLECT_COIN: u32 = 72;

/// Interpret a float argument as an option index.
pub(crate) fn option_index(a: f32) -> Option<usize> {
    if a.is_finite() && a >= 0.0 {
        Some(a as usize)
    } else {
        None
    }
}
