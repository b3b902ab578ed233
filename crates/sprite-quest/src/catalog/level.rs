use serde::{Deserialize, Serialize};

use crate::api::types::LevelId;

/// What a level asks of the learner. Serialized with the tags the
/// curriculum data uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    /// Read-only lesson content. Completes and advances on its own.
    #[serde(rename = "content")]
    Informational,
    /// An interactive mini-game.
    #[serde(rename = "project")]
    Project,
    /// A multiple-choice quiz.
    #[serde(rename = "quiz")]
    Quiz,
}

/// One unit of content. Immutable once part of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: LevelKind,
    /// Content reference. A dispatcher tag for projects and quizzes, the
    /// lesson text for informational levels.
    pub content: String,
    #[serde(default)]
    pub stars: u32,
}

impl Level {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        kind: LevelKind,
        content: &str,
        stars: u32,
    ) -> Self {
        Self {
            id: LevelId::from(id),
            title: title.to_owned(),
            description: description.to_owned(),
            kind,
            content: content.to_owned(),
            stars,
        }
    }

    /// Title without its "Level N: " prefix, as shown in the level list.
    pub fn short_title(&self) -> &str {
        match self.title.split_once(": ") {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.title,
        }
    }
}

/// A named group of levels, traversed in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(rename = "lessons", alias = "levels")]
    pub levels: Vec<Level>,
}

impl Module {
    pub fn new(id: &str, title: &str, levels: Vec<Level>) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            levels,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_title_strips_level_prefix() {
        let level = Level::new("1.2", "Level 1: Treasure Hunt", "", LevelKind::Project, "COORDINATE_GAME", 300);
        assert_eq!(level.short_title(), "Treasure Hunt");

        let plain = Level::new("x", "Welcome", "", LevelKind::Informational, "Hi", 0);
        assert_eq!(plain.short_title(), "Welcome");
    }

    #[test]
    fn parse_level_with_curriculum_field_names() {
        let json = r#"{
            "id": "3.2",
            "title": "Level 2: Robot Loop Game",
            "description": "Show off your robot skills!",
            "type": "quiz",
            "status": "AVAILABLE",
            "stars": 150,
            "content": "QUIZ_MODULE_3"
        }"#;
        let level: Level = serde_json::from_str(json).unwrap();
        assert_eq!(level.id, LevelId::from("3.2"));
        assert_eq!(level.kind, LevelKind::Quiz);
        assert_eq!(level.stars, 150);
    }

    #[test]
    fn module_accepts_levels_alias() {
        let json = r#"{ "id": "m", "title": "M", "levels": [
            { "id": "a", "title": "A", "type": "content", "content": "Read me" }
        ] }"#;
        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.len(), 1);
        assert_eq!(module.levels[0].stars, 0);
    }
}
