use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::input::queue::InputEvent;

use super::{CUSTOM_DROP_BLOCK, CUSTOM_NEXT};

/// Blocks needed for a finished stack.
pub const GOAL: usize = 5;

const COLORS: [&str; 5] = ["red", "blue", "yellow", "green", "purple"];
const EMOJIS: [&str; 6] = ["📦", "🎁", "🧸", "🎨", "🧱", "🍭"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopMode {
    /// Stack exactly to the goal; drops stop once it is reached.
    Logic,
    /// Free-form stacking for the finale levels.
    Final,
    /// Free-form stacking, playground flavour.
    Playground,
}

impl WorkshopMode {
    /// Final and playground modes keep accepting drops after the win.
    pub fn is_creative(self) -> bool {
        !matches!(self, WorkshopMode::Logic)
    }

    pub fn title(self) -> &'static str {
        if self.is_creative() {
            "Music Maker"
        } else {
            "Stack the Toys!"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Block {
    pub color: &'static str,
    pub emoji: &'static str,
}

#[derive(Serialize)]
struct WorkshopView<'a> {
    mode: WorkshopMode,
    title: &'static str,
    blocks: &'a [Block],
    goal: usize,
    finished: bool,
}

/// Block-stacking workshop. Every drop adds the next block in the cycle.
pub struct Workshop {
    mode: WorkshopMode,
    blocks: Vec<Block>,
    finished: bool,
    won: bool,
}

impl Workshop {
    pub fn new(mode: WorkshopMode) -> Self {
        Self {
            mode,
            blocks: Vec::new(),
            finished: false,
            won: false,
        }
    }

    pub fn mode(&self) -> WorkshopMode {
        self.mode
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn drop_block(&mut self, ctx: &mut GameContext) {
        if self.finished && !self.mode.is_creative() {
            log::warn!("workshop: drop ignored, stack already finished");
            return;
        }
        ctx.play(SoundCue::Pop);

        let n = self.blocks.len();
        self.blocks.push(Block {
            color: COLORS[n % COLORS.len()],
            emoji: EMOJIS[n % EMOJIS.len()],
        });

        if self.blocks.len() >= GOAL {
            self.finished = true;
            ctx.play(SoundCue::Success);
            if !self.won {
                self.won = true;
                ctx.signal_win();
            }
        }
    }
}

impl MiniGame for Workshop {
    fn name(&self) -> &'static str {
        "workshop"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_DROP_BLOCK => self.drop_block(ctx),
            CUSTOM_NEXT if ctx.level_completed() => {
                ctx.play(SoundCue::Pop);
                ctx.request_next();
            }
            _ => {}
        }
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.blocks.clear();
        self.finished = false;
    }

    fn view(&self) -> serde_json::Value {
        let view = WorkshopView {
            mode: self.mode,
            title: self.mode.title(),
            blocks: &self.blocks,
            goal: GOAL,
            finished: self.finished,
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}
