//! Level dispatcher: maps a level's content tag to the mini-game that
//! plays it. Pure lookup; the catalog runs `parse` on every tag at load time
//! so an unknown tag never reaches navigation.

use crate::api::game::MiniGame;
use crate::catalog::level::{Level, LevelKind};
use crate::error::CatalogError;
use crate::games::{
    ConditionGame, CoordinateGame, CreativeGame, EventsGame, LoopGame, PartyPlayground, QuizGame,
    QuizSet, Workshop, WorkshopMode,
};

/// A recognised content tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTag {
    Coordinates,
    Events,
    Loop,
    Condition,
    Workshop(WorkshopMode),
    Creative,
    Party,
    Quiz(QuizSet),
}

/// Every tag string the dispatcher accepts, with what it maps to.
pub const KNOWN_TAGS: &[(&str, ContentTag)] = &[
    ("COORDINATE_GAME", ContentTag::Coordinates),
    ("EVENTS_GAME", ContentTag::Events),
    ("LOOP_GAME_EASY", ContentTag::Loop),
    ("CONDITION_GAME_EASY", ContentTag::Condition),
    ("LOGIC_GAME_EASY", ContentTag::Workshop(WorkshopMode::Logic)),
    ("MAZE_GAME_EASY", ContentTag::Workshop(WorkshopMode::Logic)),
    ("FINAL_GAME_EASY", ContentTag::Workshop(WorkshopMode::Final)),
    ("FINAL_GAME_EXPERT", ContentTag::Workshop(WorkshopMode::Final)),
    ("PLAYGROUND_EASY", ContentTag::Workshop(WorkshopMode::Playground)),
    ("CREATIVE_GAME", ContentTag::Creative),
    ("PARTY_PLAYGROUND", ContentTag::Party),
    ("QUIZ_COORDINATES", ContentTag::Quiz(QuizSet::Coordinates)),
    ("QUIZ_EVENTS", ContentTag::Quiz(QuizSet::Events)),
    ("QUIZ_MODULE_3", ContentTag::Quiz(QuizSet::Loops)),
    ("QUIZ_CONDITIONS", ContentTag::Quiz(QuizSet::Conditions)),
    ("QUIZ_MODULE_5", ContentTag::Quiz(QuizSet::Loops)),
    ("QUIZ_MODULE_6", ContentTag::Quiz(QuizSet::Loops)),
];

impl ContentTag {
    pub fn parse(tag: &str) -> Option<Self> {
        KNOWN_TAGS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, content)| *content)
    }

    pub fn is_quiz(self) -> bool {
        matches!(self, ContentTag::Quiz(_))
    }

    /// Build a fresh game for this tag. `seed` feeds games with random setups.
    pub fn mount(self, seed: u64) -> Box<dyn MiniGame> {
        match self {
            ContentTag::Coordinates => Box::new(CoordinateGame::new(seed)),
            ContentTag::Events => Box::new(EventsGame::new()),
            ContentTag::Loop => Box::new(LoopGame::new()),
            ContentTag::Condition => Box::new(ConditionGame::new()),
            ContentTag::Workshop(mode) => Box::new(Workshop::new(mode)),
            ContentTag::Creative => Box::new(CreativeGame::new()),
            ContentTag::Party => Box::new(PartyPlayground::new()),
            ContentTag::Quiz(set) => Box::new(QuizGame::new(set)),
        }
    }
}

/// What becomes of a level when it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mount {
    /// Informational level: lesson text only, no game.
    Lesson,
    Game(ContentTag),
}

pub fn resolve(level: &Level) -> Result<Mount, CatalogError> {
    if level.kind == LevelKind::Informational {
        return Ok(Mount::Lesson);
    }
    ContentTag::parse(&level.content)
        .map(Mount::Game)
        .ok_or_else(|| CatalogError::UnknownContent {
            level: level.id.clone(),
            tag: level.content.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn parses_every_known_tag() {
        for (name, tag) in KNOWN_TAGS {
            assert_eq!(ContentTag::parse(name), Some(*tag));
        }
        assert_eq!(ContentTag::parse("COORDINATE_GAME "), None);
        assert_eq!(ContentTag::parse("quiz_events"), None);
    }

    #[test]
    fn aliases_share_a_game() {
        assert_eq!(
            ContentTag::parse("MAZE_GAME_EASY"),
            ContentTag::parse("LOGIC_GAME_EASY")
        );
        assert_eq!(
            ContentTag::parse("FINAL_GAME_EXPERT"),
            Some(ContentTag::Workshop(WorkshopMode::Final))
        );
    }

    #[test]
    fn review_quizzes_use_the_loops_questions() {
        for tag in ["QUIZ_MODULE_3", "QUIZ_MODULE_5", "QUIZ_MODULE_6"] {
            assert_eq!(
                ContentTag::parse(tag),
                Some(ContentTag::Quiz(QuizSet::Loops)),
                "{}",
                tag
            );
        }

        let game = ContentTag::parse("QUIZ_MODULE_6").unwrap().mount(1);
        assert_eq!(
            game.view()["question"]["prompt"],
            "What color is the 'Again' (Repeat) block?"
        );
    }

    #[test]
    fn mounts_the_expected_game() {
        let names: Vec<&str> = KNOWN_TAGS
            .iter()
            .map(|(_, tag)| tag.mount(1).name())
            .collect();
        assert_eq!(names[0], "coordinate");
        assert_eq!(names[3], "condition");
        assert_eq!(names[8], "workshop");
        assert_eq!(names[10], "party");
        assert!(names[11..].iter().all(|n| *n == "quiz"));
    }

    #[test]
    fn informational_levels_resolve_to_lessons() {
        let lesson = Level::new(
            "0.1",
            "Intro",
            "",
            LevelKind::Informational,
            "Sprites are characters on the stage.",
            0,
        );
        assert_eq!(resolve(&lesson).unwrap(), Mount::Lesson);
    }

    #[test]
    fn every_builtin_level_resolves() {
        let catalog = Catalog::builtin().unwrap();
        for level in catalog.levels() {
            assert!(matches!(resolve(level), Ok(Mount::Game(_))), "{}", level.id);
        }
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let level = Level::new("9.9", "?", "", LevelKind::Project, "SPRITE_DANCE", 10);
        assert!(matches!(
            resolve(&level),
            Err(CatalogError::UnknownContent { .. })
        ));
    }
}
