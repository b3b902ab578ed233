use std::time::Duration;

use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::core::timers::Scheduler;
use crate::input::queue::InputEvent;

use super::{
    option_index, CUSTOM_NEXT, CUSTOM_SELECT_BACKDROP, CUSTOM_SELECT_MOTION, CUSTOM_SELECT_PHRASE,
    CUSTOM_SELECT_SOUND, CUSTOM_TAP_SPRITE,
};

/// Taps needed to finish the story.
pub const GOAL: u32 = 3;
const ANIMATION_TIME: Duration = Duration::from_millis(1200);
const WIN_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    Jump,
    Spin,
    Shake,
}

impl Motion {
    const ALL: [Motion; 3] = [Motion::Jump, Motion::Spin, Motion::Shake];

    fn cue(self) -> SoundCue {
        match self {
            Motion::Jump => SoundCue::Jump,
            Motion::Spin => SoundCue::Spin,
            Motion::Shake => SoundCue::Shake,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Voice {
    Meow,
    Boing,
    Magic,
    Tada,
}

impl Voice {
    const ALL: [Voice; 4] = [Voice::Meow, Voice::Boing, Voice::Magic, Voice::Tada];

    fn cue(self) -> SoundCue {
        match self {
            Voice::Meow => SoundCue::Meow,
            Voice::Boing => SoundCue::Boing,
            Voice::Magic => SoundCue::Magic,
            Voice::Tada => SoundCue::Tada,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backdrop {
    Space,
    Park,
    Ocean,
}

impl Backdrop {
    const ALL: [Backdrop; 3] = [Backdrop::Space, Backdrop::Park, Backdrop::Ocean];
}

/// Speech bubble choices: (text, icon).
pub const PHRASES: [(&str, &str); 5] = [
    ("Hello world!", "👋"),
    ("Once upon a time...", "📖"),
    ("Let's code!", "💻"),
    ("I love stars!", "⭐"),
    ("The end.", "🏁"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    EndAnimation,
    Win,
}

#[derive(Serialize)]
struct EventsView {
    motion: Motion,
    voice: Voice,
    phrase: &'static str,
    phrase_icon: &'static str,
    backdrop: Backdrop,
    animating: bool,
    bubble: bool,
    count: u32,
    goal: u32,
    fact_visible: bool,
}

/// "When this sprite is clicked" rule builder: pick a motion, a sound and a
/// phrase, then tap the sprite until the story is told.
pub struct EventsGame {
    motion: Motion,
    voice: Voice,
    phrase: usize,
    backdrop: Backdrop,
    animating: bool,
    bubble: bool,
    count: u32,
    fact_visible: bool,
    won: bool,
    timers: Scheduler<Pending>,
}

impl EventsGame {
    pub fn new() -> Self {
        Self {
            motion: Motion::Jump,
            voice: Voice::Meow,
            phrase: 0,
            backdrop: Backdrop::Space,
            animating: false,
            bubble: false,
            count: 0,
            fact_visible: false,
            won: false,
            timers: Scheduler::new(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn fact_visible(&self) -> bool {
        self.fact_visible
    }

    fn tap(&mut self, ctx: &mut GameContext) {
        if self.animating || self.fact_visible {
            return;
        }
        self.animating = true;
        ctx.play(self.voice.cue());
        ctx.play(self.motion.cue());
        self.bubble = true;

        self.count = (self.count + 1).min(GOAL);
        if self.count == GOAL {
            self.timers.schedule(WIN_DELAY, Pending::Win);
        }
        self.timers.schedule(ANIMATION_TIME, Pending::EndAnimation);
    }

    fn select<T: Copy>(options: &[T], a: f32, ctx: &mut GameContext) -> Option<T> {
        let choice = option_index(a).and_then(|i| options.get(i).copied());
        if choice.is_some() {
            ctx.play(SoundCue::Pop);
        }
        choice
    }
}

impl Default for EventsGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for EventsGame {
    fn name(&self) -> &'static str {
        "events"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, a, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_TAP_SPRITE => self.tap(ctx),
            CUSTOM_SELECT_MOTION => {
                if let Some(motion) = Self::select(&Motion::ALL, a, ctx) {
                    self.motion = motion;
                }
            }
            CUSTOM_SELECT_SOUND => {
                if let Some(voice) = Self::select(&Voice::ALL, a, ctx) {
                    self.voice = voice;
                }
            }
            CUSTOM_SELECT_PHRASE => {
                let indices: Vec<usize> = (0..PHRASES.len()).collect();
                if let Some(phrase) = Self::select(&indices, a, ctx) {
                    self.phrase = phrase;
                }
            }
            CUSTOM_SELECT_BACKDROP => {
                if let Some(backdrop) = Self::select(&Backdrop::ALL, a, ctx) {
                    self.backdrop = backdrop;
                }
            }
            CUSTOM_NEXT if ctx.level_completed() => {
                ctx.play(SoundCue::Pop);
                ctx.request_next();
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: Duration) {
        for pending in self.timers.tick(dt) {
            match pending {
                Pending::EndAnimation => {
                    self.animating = false;
                    self.bubble = false;
                }
                Pending::Win => {
                    ctx.play(SoundCue::Success);
                    self.fact_visible = true;
                    if !self.won {
                        self.won = true;
                        ctx.signal_win();
                    }
                }
            }
        }
    }

    fn reset(&mut self, ctx: &mut GameContext) {
        ctx.play(SoundCue::Pop);
        self.timers.clear();
        self.count = 0;
        self.fact_visible = false;
        self.animating = false;
        self.bubble = false;
    }

    fn view(&self) -> serde_json::Value {
        let (phrase, phrase_icon) = PHRASES[self.phrase];
        let view = EventsView {
            motion: self.motion,
            voice: self.voice,
            phrase,
            phrase_icon,
            backdrop: self.backdrop,
            animating: self.animating,
            bubble: self.bubble,
            count: self.count,
            goal: GOAL,
            fact_visible: self.fact_visible,
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}
