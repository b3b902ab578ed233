use std::collections::BTreeSet;

use serde::Serialize;

use crate::api::types::LevelId;
use crate::catalog::level::{Level, Module};
use crate::catalog::Catalog;

/// The one mutable piece of quest state. Only `ProgressionEngine` mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    module_index: usize,
    level_index: usize,
    completed: BTreeSet<LevelId>,
    star_total: u32,
    quest_finished: bool,
}

impl Progress {
    pub fn module_index(&self) -> usize {
        self.module_index
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn completed(&self) -> &BTreeSet<LevelId> {
        &self.completed
    }

    pub fn star_total(&self) -> u32 {
        self.star_total
    }

    pub fn quest_finished(&self) -> bool {
        self.quest_finished
    }
}

/// Returned by `mark_complete` the first time a level is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub id: LevelId,
    pub stars: u32,
    /// Star total after this level was counted.
    pub total: u32,
}

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next level (possibly in the next module).
    Moved,
    /// Advanced past the last level: the quest is now finished.
    Finished,
    /// The quest was already finished; nothing changed.
    AlreadyFinished,
}

/// Position tracking, completion and star accounting over a catalog.
///
/// Every operation is total over valid input and keeps the coordinates
/// inside the catalog.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    catalog: Catalog,
    progress: Progress,
}

impl ProgressionEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            progress: Progress::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// `(module_index, level_index)` of the current level.
    pub fn position(&self) -> (usize, usize) {
        (self.progress.module_index, self.progress.level_index)
    }

    pub fn current_module(&self) -> &Module {
        &self.catalog.modules()[self.progress.module_index]
    }

    pub fn current_level(&self) -> &Level {
        &self.current_module().levels[self.progress.level_index]
    }

    pub fn is_completed(&self, id: &LevelId) -> bool {
        self.progress.completed.contains(id)
    }

    pub fn completed_count(&self) -> usize {
        self.progress.completed.len()
    }

    pub fn star_total(&self) -> u32 {
        self.progress.star_total
    }

    pub fn quest_finished(&self) -> bool {
        self.progress.quest_finished
    }

    /// At the first level of the first module (nothing to retreat to).
    pub fn is_first(&self) -> bool {
        self.position() == (0, 0)
    }

    /// At the last level of the last module.
    pub fn is_last(&self) -> bool {
        let (m, l) = self.position();
        m + 1 == self.catalog.len() && l + 1 == self.current_module().len()
    }

    /// Record the current level as completed. The first call for a level
    /// adds its stars and returns the level-up; later calls change nothing.
    pub fn mark_complete(&mut self) -> Option<LevelUp> {
        let level = self.current_level();
        if self.progress.completed.contains(&level.id) {
            return None;
        }
        let id = level.id.clone();
        let stars = level.stars;

        self.progress.completed.insert(id.clone());
        self.progress.star_total += stars;
        Some(LevelUp {
            id,
            stars,
            total: self.progress.star_total,
        })
    }

    /// Move to the next level, crossing into the next module when needed.
    /// From the very last level this finishes the quest instead; once
    /// finished, only `restart` moves the position forward again.
    /// Never marks anything complete.
    pub fn advance(&mut self) -> Advance {
        if self.progress.quest_finished {
            return Advance::AlreadyFinished;
        }
        let (m, l) = self.position();
        if l + 1 < self.current_module().len() {
            self.progress.level_index = l + 1;
            Advance::Moved
        } else if m + 1 < self.catalog.len() {
            self.progress.module_index = m + 1;
            self.progress.level_index = 0;
            Advance::Moved
        } else {
            self.progress.quest_finished = true;
            Advance::Finished
        }
    }

    /// Move to the previous level, crossing back into the previous module's
    /// last level when needed. Returns false at `(0, 0)`, where it is a no-op.
    pub fn retreat(&mut self) -> bool {
        let (m, l) = self.position();
        if l > 0 {
            self.progress.level_index = l - 1;
            true
        } else if m > 0 {
            let previous = &self.catalog.modules()[m - 1];
            self.progress.module_index = m - 1;
            self.progress.level_index = previous.len() - 1;
            true
        } else {
            false
        }
    }

    /// Jump straight to a level. Completion and the finished flag are left
    /// alone.
    ///
    /// # Panics
    ///
    /// If `(module, level)` is outside the catalog. Callers validate
    /// learner-supplied indices before calling.
    pub fn jump_to(&mut self, module: usize, level: usize) {
        assert!(
            self.catalog.contains(module, level),
            "jump_to({}, {}) is outside the catalog",
            module,
            level
        );
        self.progress.module_index = module;
        self.progress.level_index = level;
    }

    /// Forget everything: back to the first level with nothing completed.
    pub fn restart(&mut self) {
        self.progress = Progress::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::level::LevelKind;
    use crate::core::rng::Rng;

    fn level(id: &str, stars: u32) -> Level {
        Level::new(id, id, "", LevelKind::Project, "COORDINATE_GAME", stars)
    }

    /// One module, A (300) and B (150).
    fn two_level_engine() -> ProgressionEngine {
        let catalog = Catalog::new(vec![Module::new(
            "m1",
            "One",
            vec![level("A", 300), level("B", 150)],
        )])
        .unwrap();
        ProgressionEngine::new(catalog)
    }

    /// Modules of sizes 2, 1, 3.
    fn three_module_engine() -> ProgressionEngine {
        let catalog = Catalog::new(vec![
            Module::new("m1", "One", vec![level("a1", 10), level("a2", 20)]),
            Module::new("m2", "Two", vec![level("b1", 30)]),
            Module::new("m3", "Three", vec![level("c1", 40), level("c2", 50), level("c3", 60)]),
        ])
        .unwrap();
        ProgressionEngine::new(catalog)
    }

    fn completed_ids(engine: &ProgressionEngine) -> Vec<&str> {
        engine.progress().completed().iter().map(LevelId::as_str).collect()
    }

    fn stars_of_completed(engine: &ProgressionEngine) -> u32 {
        engine
            .catalog()
            .levels()
            .filter(|l| engine.is_completed(&l.id))
            .map(|l| l.stars)
            .sum()
    }

    #[test]
    fn fresh_engine_starts_at_origin() {
        let engine = two_level_engine();
        assert_eq!(engine.position(), (0, 0));
        assert_eq!(engine.completed_count(), 0);
        assert_eq!(engine.star_total(), 0);
        assert!(!engine.quest_finished());
        assert!(engine.is_first());
    }

    #[test]
    fn two_level_scenario() {
        let mut engine = two_level_engine();

        let up = engine.mark_complete().unwrap();
        assert_eq!(up.id, LevelId::from("A"));
        assert_eq!(up.total, 300);
        assert_eq!(completed_ids(&engine), vec!["A"]);
        assert_eq!(engine.star_total(), 300);

        assert_eq!(engine.advance(), Advance::Moved);
        assert_eq!(engine.current_level().id, LevelId::from("B"));

        engine.mark_complete();
        assert_eq!(completed_ids(&engine), vec!["A", "B"]);
        assert_eq!(engine.star_total(), 450);

        assert_eq!(engine.advance(), Advance::Finished);
        assert!(engine.quest_finished());
        assert_eq!(engine.current_level().id, LevelId::from("B"));
    }

    #[test]
    fn retreat_scenario() {
        let mut engine = two_level_engine();
        engine.advance();
        assert!(engine.retreat());
        assert_eq!(engine.current_level().id, LevelId::from("A"));
        assert!(!engine.retreat());
        assert_eq!(engine.current_level().id, LevelId::from("A"));
    }

    #[test]
    fn restart_matches_fresh_engine() {
        let mut engine = two_level_engine();
        engine.mark_complete();
        engine.advance();
        engine.mark_complete();
        engine.advance();
        assert!(engine.quest_finished());

        engine.restart();
        assert_eq!(engine.progress(), two_level_engine().progress());
        assert_eq!(engine.current_level().id, LevelId::from("A"));
        assert_eq!(engine.star_total(), 0);
        assert!(!engine.quest_finished());
    }

    #[test]
    fn mark_complete_twice_counts_once() {
        let mut engine = two_level_engine();
        assert!(engine.mark_complete().is_some());
        assert!(engine.mark_complete().is_none());
        assert_eq!(engine.completed_count(), 1);
        assert_eq!(engine.star_total(), 300);
    }

    #[test]
    fn completion_survives_revisits() {
        let mut engine = two_level_engine();
        engine.mark_complete();
        engine.advance();
        engine.retreat();
        assert!(engine.mark_complete().is_none());
        assert_eq!(engine.star_total(), 300);
    }

    #[test]
    fn advance_crosses_modules() {
        let mut engine = three_module_engine();
        engine.advance();
        assert_eq!(engine.position(), (0, 1));
        engine.advance();
        assert_eq!(engine.position(), (1, 0));
        engine.advance();
        assert_eq!(engine.position(), (2, 0));
    }

    #[test]
    fn retreat_lands_on_last_level_of_previous_module() {
        let mut engine = three_module_engine();
        engine.jump_to(2, 0);
        engine.retreat();
        assert_eq!(engine.position(), (1, 0));
        engine.retreat();
        assert_eq!(engine.position(), (0, 1));
    }

    #[test]
    fn quest_finishes_only_from_the_last_level() {
        let mut engine = three_module_engine();
        let total = engine.catalog().level_count();

        for step in 1..total {
            assert_eq!(engine.advance(), Advance::Moved, "step {}", step);
            assert!(!engine.quest_finished(), "finished early at step {}", step);
        }
        assert!(engine.is_last());
        assert_eq!(engine.advance(), Advance::Finished);
        assert!(engine.quest_finished());
    }

    #[test]
    fn finished_quest_ignores_further_advances() {
        let mut engine = two_level_engine();
        engine.advance();
        engine.advance();
        assert!(engine.quest_finished());

        engine.retreat();
        assert_eq!(engine.advance(), Advance::AlreadyFinished);
        assert_eq!(engine.position(), (0, 0));
        assert!(engine.quest_finished());
    }

    #[test]
    fn retreat_never_touches_finished_flag() {
        let mut engine = two_level_engine();
        engine.advance();
        engine.advance();
        engine.retreat();
        assert!(engine.quest_finished());
    }

    #[test]
    fn jump_to_keeps_completion() {
        let mut engine = three_module_engine();
        engine.mark_complete();
        engine.jump_to(2, 2);
        assert_eq!(engine.current_level().id, LevelId::from("c3"));
        assert_eq!(engine.completed_count(), 1);
        assert!(!engine.quest_finished());
    }

    #[test]
    #[should_panic(expected = "outside the catalog")]
    fn jump_out_of_bounds_panics() {
        let mut engine = three_module_engine();
        engine.jump_to(1, 1);
    }

    #[test]
    fn random_walks_stay_in_bounds_and_keep_star_invariant() {
        let mut rng = Rng::new(2024);
        for _ in 0..50 {
            let mut engine = three_module_engine();
            for _ in 0..200 {
                let before = engine.position();
                match rng.next_int(4) {
                    0 => {
                        let finished = engine.quest_finished();
                        engine.advance();
                        assert!(engine.position() >= before, "advance moved backwards");
                        if finished {
                            assert_eq!(engine.position(), before);
                        }
                    }
                    1 => {
                        engine.retreat();
                        assert!(engine.position() <= before, "retreat moved forwards");
                    }
                    _ => {
                        engine.mark_complete();
                    }
                }
                let (m, l) = engine.position();
                assert!(engine.catalog().contains(m, l), "out of bounds at {:?}", (m, l));
                assert_eq!(engine.star_total(), stars_of_completed(&engine));
            }
        }
    }
}
