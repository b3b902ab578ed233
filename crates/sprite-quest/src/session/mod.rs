//! Quest session: the progression engine, the dispatcher, the session timers
//! and the mounted mini-game, driven by explicit `tick` calls.

pub mod config;

use std::time::Duration;

use serde::Serialize;

use crate::api::game::{GameContext, GameSignal, MiniGame};
use crate::api::types::{LevelId, QuestEvent, SoundCue, SoundEvent};
use crate::catalog::level::LevelKind;
use crate::catalog::Catalog;
use crate::core::progress::{Advance, ProgressionEngine};
use crate::core::timers::Scheduler;
use crate::dispatch::{self, Mount};
use crate::games::CUSTOM_RESTART;
use crate::input::queue::{InputEvent, InputQueue};

pub use config::{AdvanceMode, QuestConfig};

/// How long the star counter pulses after a level-up.
const STAR_PULSE_TIME: Duration = Duration::from_millis(1000);

/// Session-level timers. `Advance` is tied to the level it was scheduled
/// for and is cancelled whenever another level is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionTimer {
    Advance { level: LevelId },
    EndCelebration,
    EndStarPulse,
}

impl SessionTimer {
    fn is_level_bound(&self) -> bool {
        matches!(self, SessionTimer::Advance { .. })
    }
}

/// Shown instead of the stage once the quest is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestSummary {
    pub stars: u32,
    pub levels_completed: usize,
    pub total_levels: usize,
}

/// One row of the current module's level list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    pub id: LevelId,
    pub title: String,
    pub completed: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub name: &'static str,
    pub state: serde_json::Value,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestSnapshot {
    pub module_index: usize,
    pub level_index: usize,
    pub module_id: String,
    pub module_title: String,
    pub level_id: LevelId,
    pub level_title: String,
    pub level_description: String,
    pub level_kind: LevelKind,
    pub level_stars: u32,
    pub levels: Vec<LevelEntry>,
    pub star_total: u32,
    pub completed: Vec<LevelId>,
    pub is_first: bool,
    pub is_last: bool,
    pub quest_finished: bool,
    pub celebrating: bool,
    pub star_pulse: bool,
    pub welcome_open: bool,
    pub summary: Option<QuestSummary>,
    /// Lesson text when the current level is informational.
    pub lesson: Option<String>,
    pub game: Option<GameSnapshot>,
}

pub struct QuestSession {
    engine: ProgressionEngine,
    config: QuestConfig,
    timers: Scheduler<SessionTimer>,
    input: InputQueue,
    game: Option<Box<dyn MiniGame>>,
    ctx: GameContext,
    events: Vec<QuestEvent>,
    sounds: Vec<SoundEvent>,
    celebrating: bool,
    star_pulse: bool,
    welcome_open: bool,
    /// Bumped on every level entry. Work queued under an older value is stale.
    generation: u64,
}

impl QuestSession {
    /// Start a session at the first level with the welcome modal open.
    pub fn new(catalog: Catalog, config: QuestConfig) -> Self {
        let mut session = Self {
            engine: ProgressionEngine::new(catalog),
            config,
            timers: Scheduler::new(),
            input: InputQueue::new(),
            game: None,
            ctx: GameContext::new(),
            events: Vec::new(),
            sounds: Vec::new(),
            celebrating: false,
            star_pulse: false,
            welcome_open: true,
            generation: 0,
        };
        session.enter_current_level();
        session
    }

    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn is_welcome_open(&self) -> bool {
        self.welcome_open
    }

    /// Name of the mounted mini-game, if the current level has one.
    pub fn game_name(&self) -> Option<&'static str> {
        self.game.as_ref().map(|game| game.name())
    }

    /// Queue a learner input for the mounted game. Applied on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.engine.quest_finished() {
            log::warn!("input ignored, quest is finished");
            return;
        }
        self.input.push(event);
    }

    /// Advance the session by `dt`: run the game and the session timers,
    /// then route the input queued during the frame. Input queued before a
    /// level change is dropped.
    pub fn tick(&mut self, dt: Duration) {
        let generation = self.generation;

        if let Some(game) = self.game.as_mut() {
            game.update(&mut self.ctx, dt);
        }
        self.apply_game_output();

        for timer in self.timers.tick(dt) {
            self.handle_timer(timer);
        }

        for event in self.input.drain() {
            if self.generation != generation || self.engine.quest_finished() {
                break;
            }
            if let Some(game) = self.game.as_mut() {
                match event {
                    InputEvent::Custom {
                        kind: CUSTOM_RESTART,
                        ..
                    } => game.reset(&mut self.ctx),
                    _ => game.handle_input(&mut self.ctx, &event),
                }
            }
            self.apply_game_output();
        }
    }

    /// Move on to the next level. From the last level this finishes the
    /// quest. Ignored once the quest is finished.
    pub fn next(&mut self) {
        if self.engine.quest_finished() {
            log::warn!("next ignored, quest is finished");
            return;
        }
        self.sounds.push(SoundCue::Pop.into());
        match self.engine.advance() {
            Advance::Moved => self.enter_current_level(),
            Advance::Finished => self.finish_quest(),
            Advance::AlreadyFinished => {}
        }
    }

    /// Step back one level. Returns false at the very first level or once
    /// the quest is finished.
    pub fn previous(&mut self) -> bool {
        if self.engine.quest_finished() {
            log::warn!("previous ignored, quest is finished");
            return false;
        }
        self.sounds.push(SoundCue::Pop.into());
        if !self.engine.retreat() {
            return false;
        }
        self.enter_current_level();
        true
    }

    /// Jump to a level of the current module, as the level list does.
    /// Returns false when the index is out of range, the level is already
    /// current, or the quest is finished.
    pub fn select_level(&mut self, level: usize) -> bool {
        if self.engine.quest_finished() {
            log::warn!("select_level ignored, quest is finished");
            return false;
        }
        let (module, current) = self.engine.position();
        if level == current {
            return false;
        }
        if !self.engine.catalog().contains(module, level) {
            log::warn!("select_level({}) is outside module {}", level, module);
            return false;
        }
        self.sounds.push(SoundCue::Pop.into());
        self.engine.jump_to(module, level);
        self.enter_current_level();
        true
    }

    /// Start over from the first level with nothing completed.
    pub fn restart(&mut self) {
        log::info!("quest restarted");
        self.engine.restart();
        self.timers.clear();
        self.star_pulse = false;

        self.sounds.push(SoundCue::Fanfare.into());
        self.events.push(QuestEvent::Restarted);
        self.welcome_open = true;
        self.start_celebration(self.config.restart_celebration());
        self.enter_current_level();
    }

    pub fn dismiss_welcome(&mut self) {
        if self.welcome_open {
            self.welcome_open = false;
            self.sounds.push(SoundCue::Pop.into());
        }
    }

    /// Stars, completed levels and level count, once the quest is finished.
    pub fn summary(&self) -> Option<QuestSummary> {
        self.engine.quest_finished().then(|| QuestSummary {
            stars: self.engine.star_total(),
            levels_completed: self.engine.completed_count(),
            total_levels: self.engine.catalog().level_count(),
        })
    }

    pub fn snapshot(&self) -> QuestSnapshot {
        let (module_index, level_index) = self.engine.position();
        let module = self.engine.current_module();
        let level = self.engine.current_level();

        let levels = module
            .levels
            .iter()
            .enumerate()
            .map(|(i, entry)| LevelEntry {
                id: entry.id.clone(),
                title: entry.short_title().to_owned(),
                completed: self.engine.is_completed(&entry.id),
                current: i == level_index,
            })
            .collect();

        QuestSnapshot {
            module_index,
            level_index,
            module_id: module.id.clone(),
            module_title: module.title.clone(),
            level_id: level.id.clone(),
            level_title: level.title.clone(),
            level_description: level.description.clone(),
            level_kind: level.kind,
            level_stars: level.stars,
            levels,
            star_total: self.engine.star_total(),
            completed: self.engine.progress().completed().iter().cloned().collect(),
            is_first: self.engine.is_first(),
            is_last: self.engine.is_last(),
            quest_finished: self.engine.quest_finished(),
            celebrating: self.celebrating,
            star_pulse: self.star_pulse,
            welcome_open: self.welcome_open,
            summary: self.summary(),
            lesson: (level.kind == LevelKind::Informational).then(|| level.content.clone()),
            game: self.game.as_ref().map(|game| GameSnapshot {
                name: game.name(),
                state: game.view(),
            }),
        }
    }

    pub fn drain_events(&mut self) -> Vec<QuestEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sounds)
    }

    /// Make the engine's current level the live one: drop the previous
    /// level's timers and game, then mount a game or apply the lesson policy.
    fn enter_current_level(&mut self) {
        self.generation += 1;
        self.timers.cancel_where(SessionTimer::is_level_bound);
        self.input.drain();
        self.ctx.clear();
        self.game = None;

        let (module, index) = self.engine.position();
        let level = self.engine.current_level();
        let id = level.id.clone();
        log::debug!("entering level {} at ({}, {})", id, module, index);
        self.events.push(QuestEvent::LevelEntered {
            module,
            level: index,
            id: id.clone(),
        });

        match dispatch::resolve(level) {
            Ok(Mount::Lesson) => {
                self.record_completion();
                self.timers.schedule(
                    self.config.informational_delay(),
                    SessionTimer::Advance { level: id },
                );
            }
            Ok(Mount::Game(tag)) => {
                let seed = self.config.rng_seed.wrapping_add(self.generation);
                let mut game = tag.mount(seed);
                self.ctx.set_level_completed(self.engine.is_completed(&id));
                game.mount(&mut self.ctx);
                self.game = Some(game);
                self.apply_game_output();
            }
            Err(e) => log::warn!("level {} has no game: {}", id, e),
        }
    }

    /// Forward the mounted game's sounds and act on its signals. Signals
    /// left over after a level change belong to the old game and are dropped.
    fn apply_game_output(&mut self) {
        self.sounds.extend(self.ctx.drain_sounds());

        let generation = self.generation;
        for signal in self.ctx.drain_signals() {
            if self.generation != generation || self.engine.quest_finished() {
                break;
            }
            match signal {
                GameSignal::Won => self.on_win(),
                GameSignal::NextRequested => self.next(),
            }
        }
    }

    fn on_win(&mut self) {
        self.record_completion();
        if self.config.advance_mode == AdvanceMode::AfterCompletion {
            let level = self.engine.current_level().id.clone();
            let pending = SessionTimer::Advance { level };
            if !self.timers.any(|t| *t == pending) {
                self.timers
                    .schedule(self.config.auto_advance_delay(), pending);
            }
        }
    }

    /// Mark the current level complete. Only the first completion of a
    /// level counts; repeats are absorbed silently.
    fn record_completion(&mut self) {
        let Some(up) = self.engine.mark_complete() else {
            return;
        };
        log::info!(
            "level {} complete: +{} stars ({} total)",
            up.id,
            up.stars,
            up.total
        );
        self.sounds.push(SoundCue::Fanfare.into());
        self.events.push(QuestEvent::LeveledUp {
            id: up.id,
            stars: up.stars,
            total: up.total,
        });
        self.ctx.set_level_completed(true);
        self.start_celebration(self.config.celebration());

        self.timers.cancel_where(|t| *t == SessionTimer::EndStarPulse);
        self.star_pulse = true;
        self.timers.schedule(STAR_PULSE_TIME, SessionTimer::EndStarPulse);
    }

    fn start_celebration(&mut self, duration: Duration) {
        self.timers.cancel_where(|t| *t == SessionTimer::EndCelebration);
        self.celebrating = true;
        self.timers.schedule(duration, SessionTimer::EndCelebration);
    }

    fn finish_quest(&mut self) {
        log::info!(
            "quest finished: {} stars, {} levels",
            self.engine.star_total(),
            self.engine.completed_count()
        );
        self.timers.cancel_where(SessionTimer::is_level_bound);
        self.input.drain();
        self.game = None;
        self.ctx.clear();
        self.events.push(QuestEvent::QuestFinished {
            stars: self.engine.star_total(),
            levels_completed: self.engine.completed_count(),
        });
    }

    fn handle_timer(&mut self, timer: SessionTimer) {
        match timer {
            SessionTimer::Advance { level } => {
                if self.engine.quest_finished() || self.engine.current_level().id != level {
                    log::debug!("stale advance for level {} dropped", level);
                    return;
                }
                self.next();
            }
            SessionTimer::EndCelebration => {
                self.celebrating = false;
                self.events.push(QuestEvent::CelebrationEnded);
            }
            SessionTimer::EndStarPulse => self.star_pulse = false,
        }
    }
}
