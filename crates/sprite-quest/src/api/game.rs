use std::time::Duration;

use crate::api::types::{SoundCue, SoundEvent};
use crate::input::queue::InputEvent;

/// Signals a mini-game sends back to the quest session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSignal {
    /// The win condition was met. The session marks the level complete.
    Won,
    /// The learner pressed the game's own "next" control.
    NextRequested,
}

/// The contract every mini-game must fulfill.
///
/// A mini-game owns its play state and internal timing. It talks to the
/// outside world only through the `GameContext`: sound cues out, and the
/// `Won` / `NextRequested` signals back to the session.
pub trait MiniGame {
    /// Short identifier used in logs and in the snapshot.
    fn name(&self) -> &'static str;

    /// Called once when the game becomes the mounted level's game.
    fn mount(&mut self, _ctx: &mut GameContext) {}

    /// React to one learner input.
    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent);

    /// Advance internal animation and timers.
    fn update(&mut self, _ctx: &mut GameContext, _dt: Duration) {}

    /// The in-game "play again" control: back to the initial play state.
    /// A win already reported is not reported again.
    fn reset(&mut self, ctx: &mut GameContext);

    /// Read-only view of the play state for the presentation layer.
    fn view(&self) -> serde_json::Value;
}

/// Mutable channel between the session and the mounted mini-game.
#[derive(Debug, Default)]
pub struct GameContext {
    sounds: Vec<SoundEvent>,
    signals: Vec<GameSignal>,
    level_completed: bool,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a sound cue to be forwarded to the audio layer.
    pub fn play(&mut self, cue: SoundCue) {
        self.sounds.push(cue.into());
    }

    /// Report that the win condition was met.
    pub fn signal_win(&mut self) {
        self.signals.push(GameSignal::Won);
    }

    /// Ask the session to move on to the next level.
    pub fn request_next(&mut self) {
        self.signals.push(GameSignal::NextRequested);
    }

    /// Whether the mounted level is already in the completed set.
    pub fn level_completed(&self) -> bool {
        self.level_completed
    }

    pub(crate) fn set_level_completed(&mut self, completed: bool) {
        self.level_completed = completed;
    }

    pub(crate) fn drain_signals(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.signals)
    }

    #[cfg(test)]
    pub(crate) fn sounds(&self) -> &[SoundEvent] {
        &self.sounds
    }

    pub(crate) fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }

    /// Drop everything left over from the previous level.
    pub(crate) fn clear(&mut self) {
        self.sounds.clear();
        self.signals.clear();
        self.level_completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_drain_in_order() {
        let mut ctx = GameContext::new();
        ctx.signal_win();
        ctx.request_next();
        assert_eq!(
            ctx.drain_signals(),
            vec![GameSignal::Won, GameSignal::NextRequested]
        );
        assert!(ctx.drain_signals().is_empty());
    }

    #[test]
    fn clear_resets_completion_flag() {
        let mut ctx = GameContext::new();
        ctx.set_level_completed(true);
        ctx.play(SoundCue::Pop);
        ctx.clear();
        assert!(!ctx.level_completed());
        assert!(ctx.sounds().is_empty());
    }
}
