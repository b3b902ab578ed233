use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::input::queue::InputEvent;

use super::{CUSTOM_CLICK_STAR, CUSTOM_COLLECT_COIN, CUSTOM_MOVE_CAT, CUSTOM_NEXT};

pub const COINS_NEEDED: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct PartyView {
    moved: bool,
    clicked: bool,
    coins: u32,
    done: bool,
}

/// Move the cat, click the star, and collect three coins, in any order.
#[derive(Debug, Default)]
pub struct PartyPlayground {
    state: PartyView,
    won: bool,
}

impl PartyPlayground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coins(&self) -> u32 {
        self.state.coins
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }

    fn check_win(&mut self, ctx: &mut GameContext) {
        let s = &mut self.state;
        if s.moved && s.clicked && s.coins >= COINS_NEEDED && !s.done {
            s.done = true;
            if !self.won {
                self.won = true;
                ctx.signal_win();
            }
        }
    }
}

impl MiniGame for PartyPlayground {
    fn name(&self) -> &'static str {
        "party"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_MOVE_CAT => self.state.moved = true,
            CUSTOM_CLICK_STAR => self.state.clicked = true,
            CUSTOM_COLLECT_COIN => self.state.coins = self.state.coins.saturating_add(1),
            CUSTOM_NEXT if self.state.done || ctx.level_completed() => {
                ctx.play(SoundCue::Pop);
                ctx.request_next();
                return;
            }
            _ => return,
        }
        self.check_win(ctx);
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.state = PartyView::default();
    }

    fn view(&self) -> serde_json::Value {
        serde_json::to_value(self.state).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::{press, wins};

    #[test]
    fn all_three_goals_win_in_any_order() {
        let mut game = PartyPlayground::new();
        let mut ctx = GameContext::new();

        for _ in 0..COINS_NEEDED {
            press(&mut game, &mut ctx, CUSTOM_COLLECT_COIN);
        }
        press(&mut game, &mut ctx, CUSTOM_CLICK_STAR);
        assert_eq!(wins(&mut ctx), 0);

        press(&mut game, &mut ctx, CUSTOM_MOVE_CAT);
        assert_eq!(wins(&mut ctx), 1);
        assert!(game.is_done());
    }

    #[test]
    fn extra_coins_do_not_rewin() {
        let mut game = PartyPlayground::new();
        let mut ctx = GameContext::new();

        press(&mut game, &mut ctx, CUSTOM_MOVE_CAT);
        press(&mut game, &mut ctx, CUSTOM_CLICK_STAR);
        for _ in 0..6 {
            press(&mut game, &mut ctx, CUSTOM_COLLECT_COIN);
        }
        assert_eq!(game.coins(), 6);
        assert_eq!(wins(&mut ctx), 1);
    }

    #[test]
    fn coin_count_saturates() {
        let mut game = PartyPlayground::new();
        let mut ctx = GameContext::new();

        game.state.coins = u32::MAX - 1;
        for _ in 0..3 {
            press(&mut game, &mut ctx, CUSTOM_COLLECT_COIN);
        }
        assert_eq!(game.coins(), u32::MAX);
    }

    #[test]
    fn next_is_available_once_done() {
        let mut game = PartyPlayground::new();
        let mut ctx = GameContext::new();

        press(&mut game, &mut ctx, CUSTOM_NEXT);
        assert!(ctx.drain_signals().is_empty());

        press(&mut game, &mut ctx, CUSTOM_MOVE_CAT);
        press(&mut game, &mut ctx, CUSTOM_CLICK_STAR);
        for _ in 0..COINS_NEEDED {
            press(&mut game, &mut ctx, CUSTOM_COLLECT_COIN);
        }
        wins(&mut ctx);
        press(&mut game, &mut ctx, CUSTOM_NEXT);
        assert_eq!(
            ctx.drain_signals(),
            vec![crate::api::game::GameSignal::NextRequested]
        );
    }
}
