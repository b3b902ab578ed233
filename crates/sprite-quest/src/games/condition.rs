use glam::Vec2;
use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::input::queue::InputEvent;

use super::CUSTOM_NEXT;

/// Where the treat rests, below the sprite at the stage centre.
pub const TREAT_START: Vec2 = Vec2::new(0.0, 150.0);
/// The sprite senses the treat once it is closer than this.
pub const SENSE_RADIUS: f32 = 60.0;
/// How close a pointer-down must land to pick the treat up.
const GRAB_RADIUS: f32 = 48.0;

#[derive(Serialize)]
struct ConditionView {
    treat: Vec2,
    dragging: bool,
    happy: bool,
    distance: f32,
}

/// "If touching treat then be happy": drag the treat to the sprite.
pub struct ConditionGame {
    treat: Vec2,
    dragging: bool,
    happy: bool,
    won: bool,
}

impl ConditionGame {
    pub fn new() -> Self {
        Self {
            treat: TREAT_START,
            dragging: false,
            happy: false,
            won: false,
        }
    }

    pub fn treat(&self) -> Vec2 {
        self.treat
    }

    pub fn is_happy(&self) -> bool {
        self.happy
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn sense(&mut self, ctx: &mut GameContext) {
        if self.happy || self.treat.length() >= SENSE_RADIUS {
            return;
        }
        ctx.play(SoundCue::Success);
        self.happy = true;
        self.dragging = false;
        if !self.won {
            self.won = true;
            ctx.signal_win();
        }
    }
}

impl Default for ConditionGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for ConditionGame {
    fn name(&self) -> &'static str {
        "condition"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                if !self.happy && Vec2::new(x, y).distance(self.treat) <= GRAB_RADIUS {
                    self.dragging = true;
                }
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging && !self.happy {
                    self.treat = Vec2::new(x, y);
                    self.sense(ctx);
                }
            }
            InputEvent::PointerUp { .. } => self.dragging = false,
            InputEvent::Custom { kind: CUSTOM_NEXT, .. } if ctx.level_completed() => {
                ctx.play(SoundCue::Pop);
                ctx.request_next();
            }
            InputEvent::Custom { .. } => {}
        }
    }

    fn reset(&mut self, ctx: &mut GameContext) {
        ctx.play(SoundCue::Pop);
        self.treat = TREAT_START;
        self.dragging = false;
        self.happy = false;
    }

    fn view(&self) -> serde_json::Value {
        let view = ConditionView {
            treat: self.treat,
            dragging: self.dragging,
            happy: self.happy,
            distance: self.treat.length(),
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}
