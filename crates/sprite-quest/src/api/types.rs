use std::fmt;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable identifier of a level, unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub String);

impl LevelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A sound event emitted by quest or mini-game logic.
/// The numeric value maps to a cue in the TypeScript SoundManager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// Named sound cues. The discriminant is the id written into `SoundEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum SoundCue {
    Pop = 1,
    Jump = 2,
    Spin = 3,
    Shake = 4,
    Meow = 5,
    Boing = 6,
    Magic = 7,
    Tada = 8,
    Success = 9,
    Miss = 10,
    Collect = 11,
    Fanfare = 12,
}

impl From<SoundCue> for SoundEvent {
    fn from(cue: SoundCue) -> Self {
        SoundEvent(cue as u32)
    }
}

/// A quest event packed for the JS side.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

// Event kinds (Rust → JS)
pub const EVENT_LEVEL_ENTERED: f32 = 1.0;
pub const EVENT_LEVELED_UP: f32 = 2.0;
pub const EVENT_QUEST_FINISHED: f32 = 3.0;
pub const EVENT_RESTARTED: f32 = 4.0;
pub const EVENT_CELEBRATION_ENDED: f32 = 5.0;

/// Notifications the quest session raises for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A level became current (after navigation, restart, or session start).
    LevelEntered { module: usize, level: usize, id: LevelId },
    /// A level was completed for the first time this session.
    LeveledUp { id: LevelId, stars: u32, total: u32 },
    /// Advance was requested from the final level.
    QuestFinished { stars: u32, levels_completed: usize },
    Restarted,
    CelebrationEnded,
}

impl QuestEvent {
    /// Flatten into the fixed-size record the bridge hands to JS.
    /// Level ids do not fit; the snapshot carries them.
    pub fn to_game_event(&self) -> GameEvent {
        match self {
            QuestEvent::LevelEntered { module, level, .. } => GameEvent {
                kind: EVENT_LEVEL_ENTERED,
                a: *module as f32,
                b: *level as f32,
                c: 0.0,
            },
            QuestEvent::LeveledUp { stars, total, .. } => GameEvent {
                kind: EVENT_LEVELED_UP,
                a: *stars as f32,
                b: *total as f32,
                c: 0.0,
            },
            QuestEvent::QuestFinished { stars, levels_completed } => GameEvent {
                kind: EVENT_QUEST_FINISHED,
                a: *stars as f32,
                b: *levels_completed as f32,
                c: 0.0,
            },
            QuestEvent::Restarted => GameEvent {
                kind: EVENT_RESTARTED,
                ..GameEvent::default()
            },
            QuestEvent::CelebrationEnded => GameEvent {
                kind: EVENT_CELEBRATION_ENDED,
                ..GameEvent::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sound_cue_ids_are_stable() {
        assert_eq!(SoundEvent::from(SoundCue::Pop), SoundEvent(1));
        assert_eq!(SoundEvent::from(SoundCue::Fanfare), SoundEvent(12));
    }

    #[test]
    fn leveled_up_packs_stars_and_total() {
        let ev = QuestEvent::LeveledUp {
            id: LevelId::from("1.2"),
            stars: 300,
            total: 450,
        };
        let packed = ev.to_game_event();
        assert_eq!(packed.kind, EVENT_LEVELED_UP);
        assert_eq!(packed.a, 300.0);
        assert_eq!(packed.b, 450.0);
    }

    #[test]
    fn game_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<GameEvent>(), GameEvent::FLOATS * 4);
    }
}
