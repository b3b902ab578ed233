use std::time::Duration;

use glam::IVec2;
use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::core::rng::Rng;
use crate::core::timers::Scheduler;
use crate::input::queue::InputEvent;

use super::{CUSTOM_HINT, CUSTOM_LAUNCH, CUSTOM_NEXT, CUSTOM_SET_X, CUSTOM_SET_Y};

const SPIN_TIME: Duration = Duration::from_millis(700);
const HIT_FEEDBACK_TIME: Duration = Duration::from_millis(1800);
const MISS_FEEDBACK_TIME: Duration = Duration::from_millis(1000);
const SHAKE_TIME: Duration = Duration::from_millis(500);

/// Where the sprite sits before the first launch.
const SPRITE_START: IVec2 = IVec2::new(4, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Land,
    StopShake,
    ClearFeedback { respawn: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    TargetAcquired,
    CalibrationFailed,
}

#[derive(Serialize)]
struct CoordinateView {
    target: IVec2,
    sprite: IVec2,
    input_x: Option<i32>,
    input_y: Option<i32>,
    hint: Option<String>,
    spinning: bool,
    shaking: bool,
    feedback: Option<Feedback>,
    hits: u32,
}

/// Treasure hunt on a coordinate grid: type X and Y, launch the sprite,
/// land on the hidden target.
pub struct CoordinateGame {
    rng: Rng,
    target: IVec2,
    sprite: IVec2,
    input_x: Option<i32>,
    input_y: Option<i32>,
    hint_visible: bool,
    spinning: bool,
    shaking: bool,
    feedback: Option<Feedback>,
    hits: u32,
    won: bool,
    timers: Scheduler<Pending>,
}

impl CoordinateGame {
    pub fn new(seed: u64) -> Self {
        let mut game = Self {
            rng: Rng::new(seed),
            target: IVec2::ZERO,
            sprite: SPRITE_START,
            input_x: None,
            input_y: None,
            hint_visible: false,
            spinning: false,
            shaking: false,
            feedback: None,
            hits: 0,
            won: false,
            timers: Scheduler::new(),
        };
        game.spawn_target();
        game
    }

    pub fn target(&self) -> IVec2 {
        self.target
    }

    pub fn sprite(&self) -> IVec2 {
        self.sprite
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Hint text such as "2 Left, 3 Up".
    pub fn hint(&self) -> String {
        let horizontal = if self.target.x >= 0 { "Right" } else { "Left" };
        let vertical = if self.target.y >= 0 { "Up" } else { "Down" };
        format!(
            "{} {}, {} {}",
            self.target.x.abs(),
            horizontal,
            self.target.y.abs(),
            vertical
        )
    }

    /// New target: x in [-4, 3], y in [-3, 2]. Clears the typed values.
    fn spawn_target(&mut self) {
        self.target = IVec2::new(self.rng.range(-4, 4), self.rng.range(-3, 3));
        self.input_x = None;
        self.input_y = None;
        self.hint_visible = false;
    }

    fn launch(&mut self, ctx: &mut GameContext) {
        ctx.play(SoundCue::Pop);
        if self.spinning {
            return;
        }
        let (Some(x), Some(y)) = (self.input_x, self.input_y) else {
            return;
        };
        self.spinning = true;
        self.sprite = IVec2::new(x, y);
        self.timers.schedule(SPIN_TIME, Pending::Land);
    }

    fn land(&mut self, ctx: &mut GameContext) {
        self.spinning = false;
        ctx.play(SoundCue::Spin);

        if self.sprite == self.target {
            ctx.play(SoundCue::Success);
            self.feedback = Some(Feedback::TargetAcquired);
            self.hits += 1;
            if !self.won {
                self.won = true;
                ctx.signal_win();
            }
            self.timers
                .schedule(HIT_FEEDBACK_TIME, Pending::ClearFeedback { respawn: true });
        } else {
            ctx.play(SoundCue::Miss);
            self.feedback = Some(Feedback::CalibrationFailed);
            self.shaking = true;
            self.timers.schedule(SHAKE_TIME, Pending::StopShake);
            self.timers
                .schedule(MISS_FEEDBACK_TIME, Pending::ClearFeedback { respawn: false });
        }
    }
}

fn typed_number(a: f32) -> Option<i32> {
    if a.is_finite() {
        Some(a.trunc() as i32)
    } else {
        None
    }
}

impl MiniGame for CoordinateGame {
    fn name(&self) -> &'static str {
        "coordinate"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, a, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_SET_X => self.input_x = typed_number(a),
            CUSTOM_SET_Y => self.input_y = typed_number(a),
            CUSTOM_LAUNCH => self.launch(ctx),
            CUSTOM_HINT => {
                if !self.hint_visible {
                    ctx.play(SoundCue::Pop);
                }
                self.hint_visible = true;
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
                Pending::Land => self.land(ctx),
                Pending::StopShake => self.shaking = false,
                Pending::ClearFeedback { respawn } => {
                    self.feedback = None;
                    if respawn {
                        self.spawn_target();
                    }
                }
            }
        }
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.timers.clear();
        self.spinning = false;
        self.shaking = false;
        self.feedback = None;
        self.sprite = SPRITE_START;
        self.spawn_target();
    }

    fn view(&self) -> serde_json::Value {
        let view = CoordinateView {
            target: self.target,
            sprite: self.sprite,
            input_x: self.input_x,
            input_y: self.input_y,
            hint: self.hint_visible.then(|| self.hint()),
            spinning: self.spinning,
            shaking: self.shaking,
            feedback: self.feedback,
            hits: self.hits,
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}
