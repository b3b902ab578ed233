use std::time::Duration;

use glam::Vec2;
use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::core::timers::Scheduler;
use crate::input::queue::InputEvent;

use super::{option_index, CUSTOM_ADD_STEP, CUSTOM_NEXT, CUSTOM_START_SHOW};

pub const MAX_STEPS: usize = 6;

// Positions are percentages of the stage.
const HOME: Vec2 = Vec2::new(50.0, 50.0);
const SHOW_START_X: f32 = 20.0;
const MOVE_STEP: f32 = 15.0;
const MAX_X: f32 = 85.0;

const CURTAIN_TIME: Duration = Duration::from_millis(500);
const MOVE_TIME: Duration = Duration::from_millis(600);
const TRICK_TIME: Duration = Duration::from_millis(1000);
const PAUSE_TIME: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Move,
    Jump,
    Spin,
}

impl Step {
    const ALL: [Step; 3] = [Step::Move, Step::Jump, Step::Spin];

    fn duration(self) -> Duration {
        match self {
            Step::Move => MOVE_TIME,
            Step::Jump | Step::Spin => TRICK_TIME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Perform(usize),
    EndStep(usize),
}

#[derive(Serialize)]
struct CreativeView<'a> {
    steps: &'a [Step],
    max_steps: usize,
    playing: bool,
    jumping: bool,
    spinning: bool,
    sprite: Vec2,
}

/// Show builder: queue motion steps, then watch the sprite perform them.
pub struct CreativeGame {
    steps: Vec<Step>,
    playing: bool,
    jumping: bool,
    spinning: bool,
    sprite: Vec2,
    won: bool,
    timers: Scheduler<Pending>,
}

impl CreativeGame {
    pub fn new() -> Self {
        Self {
            steps: Vec::with_capacity(MAX_STEPS),
            playing: false,
            jumping: false,
            spinning: false,
            sprite: HOME,
            won: false,
            timers: Scheduler::new(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn sprite(&self) -> Vec2 {
        self.sprite
    }

    fn add_step(&mut self, ctx: &mut GameContext, a: f32) {
        let Some(step) = option_index(a).and_then(|i| Step::ALL.get(i).copied()) else {
            return;
        };
        if self.steps.len() >= MAX_STEPS || self.playing {
            return;
        }
        ctx.play(SoundCue::Pop);
        self.steps.push(step);
    }

    fn start_show(&mut self, ctx: &mut GameContext) {
        if self.steps.is_empty() || self.playing {
            return;
        }
        self.playing = true;
        ctx.play(SoundCue::Fanfare);
        self.sprite = Vec2::new(SHOW_START_X, HOME.y);
        self.timers.schedule(CURTAIN_TIME, Pending::Perform(0));
    }

    fn perform(&mut self, ctx: &mut GameContext, index: usize) {
        let Some(&step) = self.steps.get(index) else {
            self.playing = false;
            if !self.won {
                self.won = true;
                ctx.signal_win();
            }
            return;
        };
        match step {
            Step::Move => self.sprite.x = (self.sprite.x + MOVE_STEP).min(MAX_X),
            Step::Jump => self.jumping = true,
            Step::Spin => self.spinning = true,
        }
        self.timers.schedule(step.duration(), Pending::EndStep(index));
    }
}

impl Default for CreativeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for CreativeGame {
    fn name(&self) -> &'static str {
        "creative"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, a, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_ADD_STEP => self.add_step(ctx, a),
            CUSTOM_START_SHOW => self.start_show(ctx),
            CUSTOM_NEXT if ctx.level_completed() && !self.playing => {
                ctx.play(SoundCue::Pop);
                ctx.request_next();
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: Duration) {
        for pending in self.timers.tick(dt) {
            match pending {
                Pending::Perform(index) => self.perform(ctx, index),
                Pending::EndStep(index) => {
                    self.jumping = false;
                    self.spinning = false;
                    self.timers.schedule(PAUSE_TIME, Pending::Perform(index + 1));
                }
            }
        }
    }

    /// Clears the recipe and puts the sprite back home.
    fn reset(&mut self, _ctx: &mut GameContext) {
        self.timers.clear();
        self.steps.clear();
        self.playing = false;
        self.jumping = false;
        self.spinning = false;
        self.sprite = HOME;
    }

    fn view(&self) -> serde_json::Value {
        let view = CreativeView {
            steps: &self.steps,
            max_steps: MAX_STEPS,
            playing: self.playing,
            jumping: self.jumping,
            spinning: self.spinning,
            sprite: self.sprite,
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}
