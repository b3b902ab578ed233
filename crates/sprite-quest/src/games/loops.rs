use std::time::Duration;

use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::core::timers::Scheduler;
use crate::input::queue::InputEvent;

use super::{CUSTOM_NEXT, CUSTOM_RUN, CUSTOM_SET_REPEAT};

pub const MAX_REPEAT: u32 = 10;
const JUMP_TIME: Duration = Duration::from_millis(800);
const SETTLE_TIME: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Jump(u32),
    StopJumping,
    Settle,
}

#[derive(Serialize)]
struct LoopView {
    times: u32,
    current_step: u32,
    playing: bool,
    done: bool,
}

/// "Repeat N times: jump". The cat jumps once per loop iteration.
pub struct LoopGame {
    times: u32,
    current_step: u32,
    playing: bool,
    done: bool,
    won: bool,
    timers: Scheduler<Pending>,
}

impl LoopGame {
    pub fn new() -> Self {
        Self {
            times: 0,
            current_step: 0,
            playing: false,
            done: false,
            won: false,
            timers: Scheduler::new(),
        }
    }

    pub fn times(&self) -> u32 {
        self.times
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn set_times(&mut self, ctx: &mut GameContext, a: f32) {
        if !a.is_finite() {
            return;
        }
        ctx.play(SoundCue::Pop);
        self.times = a.clamp(0.0, MAX_REPEAT as f32) as u32;
    }

    fn run(&mut self, ctx: &mut GameContext) {
        if self.playing {
            return;
        }
        if self.times == 0 {
            ctx.play(SoundCue::Miss);
            return;
        }
        ctx.play(SoundCue::Pop);
        self.playing = true;
        self.done = false;
        self.jump(ctx, 1);
    }

    fn jump(&mut self, ctx: &mut GameContext, step: u32) {
        self.current_step = step;
        ctx.play(SoundCue::Jump);
        let next = if step < self.times {
            Pending::Jump(step + 1)
        } else {
            Pending::StopJumping
        };
        self.timers.schedule(JUMP_TIME, next);
    }
}

impl Default for LoopGame {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for LoopGame {
    fn name(&self) -> &'static str {
        "loop"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, a, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_SET_REPEAT => self.set_times(ctx, a),
            CUSTOM_RUN => self.run(ctx),
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
                Pending::Jump(step) => self.jump(ctx, step),
                Pending::StopJumping => {
                    self.playing = false;
                    self.timers.schedule(SETTLE_TIME, Pending::Settle);
                }
                Pending::Settle => {
                    self.done = true;
                    ctx.play(SoundCue::Success);
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
        self.playing = false;
        self.done = false;
        self.current_step = 0;
    }

    fn view(&self) -> serde_json::Value {
        let view = LoopView {
            times: self.times,
            current_step: self.current_step,
            playing: self.playing,
            done: self.done,
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SoundEvent;
    use crate::games::testing::{press, run_for, send, wins};

    fn jumps(ctx: &GameContext) -> usize {
        let jump: SoundEvent = SoundCue::Jump.into();
        ctx.sounds().iter().filter(|s| **s == jump).count()
    }

    #[test]
    fn zero_repeats_plays_miss() {
        let mut game = LoopGame::new();
        let mut ctx = GameContext::new();

        press(&mut game, &mut ctx, CUSTOM_RUN);
        let expected: Vec<SoundEvent> = vec![SoundCue::Miss.into()];
        assert_eq!(ctx.sounds(), expected.as_slice());
        assert!(!game.is_playing());
        run_for(&mut game, &mut ctx, 2000);
        assert_eq!(wins(&mut ctx), 0);
    }

    #[test]
    fn three_repeats_jump_then_settle_then_win() {
        let mut game = LoopGame::new();
        let mut ctx = GameContext::new();

        send(&mut game, &mut ctx, CUSTOM_SET_REPEAT, 3.0);
        press(&mut game, &mut ctx, CUSTOM_RUN);
        assert_eq!(game.current_step(), 1);

        run_for(&mut game, &mut ctx, 1600);
        assert_eq!(game.current_step(), 3);
        assert!(game.is_playing());

        run_for(&mut game, &mut ctx, 800);
        assert!(!game.is_playing());
        assert!(!game.is_done());
        assert_eq!(wins(&mut ctx), 0);

        run_for(&mut game, &mut ctx, 200);
        assert!(game.is_done());
        assert_eq!(wins(&mut ctx), 1);
        assert_eq!(jumps(&ctx), 3);
    }

    #[test]
    fn run_while_playing_is_ignored() {
        let mut game = LoopGame::new();
        let mut ctx = GameContext::new();

        send(&mut game, &mut ctx, CUSTOM_SET_REPEAT, 2.0);
        press(&mut game, &mut ctx, CUSTOM_RUN);
        run_for(&mut game, &mut ctx, 400);
        press(&mut game, &mut ctx, CUSTOM_RUN);
        run_for(&mut game, &mut ctx, 3000);

        assert_eq!(jumps(&ctx), 2);
        assert_eq!(wins(&mut ctx), 1);
    }

    #[test]
    fn repeat_count_is_clamped() {
        let mut game = LoopGame::new();
        let mut ctx = GameContext::new();

        send(&mut game, &mut ctx, CUSTOM_SET_REPEAT, 25.0);
        assert_eq!(game.times(), MAX_REPEAT);
        send(&mut game, &mut ctx, CUSTOM_SET_REPEAT, -3.0);
        assert_eq!(game.times(), 0);
    }

    #[test]
    fn reset_cancels_the_run() {
        let mut game = LoopGame::new();
        let mut ctx = GameContext::new();

        send(&mut game, &mut ctx, CUSTOM_SET_REPEAT, 2.0);
        press(&mut game, &mut ctx, CUSTOM_RUN);
        run_for(&mut game, &mut ctx, 500);
        game.reset(&mut ctx);
        run_for(&mut game, &mut ctx, 5000);

        assert_eq!(wins(&mut ctx), 0);
        assert_eq!(game.current_step(), 0);
        assert_eq!(game.times(), 2);
    }
}
