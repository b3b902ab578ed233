//! The static curriculum: modules of levels, validated once at startup.

pub mod curriculum;
pub mod level;

use std::collections::HashSet;

use serde::Serialize;

use crate::api::types::LevelId;
use crate::dispatch::ContentTag;
use crate::error::CatalogError;
use level::{Level, LevelKind, Module};

/// The full curriculum. Construction validates it; afterwards it is
/// read-only for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    /// Build a catalog, refusing anything the session could not run:
    /// no modules, an empty module, a repeated level id, a content tag
    /// the dispatcher does not know, or a tag that contradicts the level kind.
    pub fn new(modules: Vec<Module>) -> Result<Self, CatalogError> {
        if modules.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut seen: HashSet<&LevelId> = HashSet::new();
        for module in &modules {
            if module.is_empty() {
                return Err(CatalogError::EmptyModule {
                    module: module.id.clone(),
                });
            }
            for level in &module.levels {
                if !seen.insert(&level.id) {
                    return Err(CatalogError::DuplicateLevelId {
                        id: level.id.clone(),
                    });
                }
                validate_content(level)?;
            }
        }

        Ok(Self { modules })
    }

    /// Parse a catalog from a JSON array of modules (the curriculum data
    /// format) and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let modules: Vec<Module> = serde_json::from_str(json)?;
        Self::new(modules)
    }

    /// The compiled-in Sprite Quest curriculum.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(curriculum::sprite_quest())
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn level(&self, module: usize, level: usize) -> Option<&Level> {
        self.modules.get(module)?.levels.get(level)
    }

    /// Whether `(module, level)` addresses a level.
    pub fn contains(&self, module: usize, level: usize) -> bool {
        self.level(module, level).is_some()
    }

    /// Coordinates of the level with this id.
    pub fn position_of(&self, id: &LevelId) -> Option<(usize, usize)> {
        self.modules.iter().enumerate().find_map(|(m, module)| {
            module
                .levels
                .iter()
                .position(|level| &level.id == id)
                .map(|l| (m, l))
        })
    }

    pub fn levels(&self) -> impl Iterator<Item = &Level> {
        self.modules.iter().flat_map(|module| module.levels.iter())
    }

    pub fn level_count(&self) -> usize {
        self.modules.iter().map(Module::len).sum()
    }

    /// Stars available across the whole curriculum.
    pub fn total_stars(&self) -> u32 {
        self.levels().map(|level| level.stars).sum()
    }
}

fn validate_content(level: &Level) -> Result<(), CatalogError> {
    if level.kind == LevelKind::Informational {
        return Ok(());
    }
    let tag = ContentTag::parse(&level.content).ok_or_else(|| CatalogError::UnknownContent {
        level: level.id.clone(),
        tag: level.content.clone(),
    })?;
    if tag.is_quiz() != (level.kind == LevelKind::Quiz) {
        return Err(CatalogError::KindMismatch {
            level: level.id.clone(),
            kind: level.kind,
            tag: level.content.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, stars: u32) -> Level {
        Level::new(id, id, "", LevelKind::Project, "COORDINATE_GAME", stars)
    }

    #[test]
    fn builtin_curriculum_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.level_count(), 10);
        assert_eq!(catalog.total_stars(), 2550);
        assert_eq!(catalog.position_of(&LevelId::from("3.3")), Some((2, 2)));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn rejects_empty_module() {
        let modules = vec![
            Module::new("m1", "One", vec![project("a", 1)]),
            Module::new("m2", "Two", Vec::new()),
        ];
        match Catalog::new(modules) {
            Err(CatalogError::EmptyModule { module }) => assert_eq!(module, "m2"),
            other => panic!("expected EmptyModule, got {:?}", other),
        }
    }

    #[test]
    fn rejects_duplicate_ids_across_modules() {
        let modules = vec![
            Module::new("m1", "One", vec![project("a", 1)]),
            Module::new("m2", "Two", vec![project("b", 1), project("a", 2)]),
        ];
        match Catalog::new(modules) {
            Err(CatalogError::DuplicateLevelId { id }) => assert_eq!(id, LevelId::from("a")),
            other => panic!("expected DuplicateLevelId, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_content_tag() {
        let level = Level::new("a", "A", "", LevelKind::Project, "ROCKET_GAME", 10);
        let result = Catalog::new(vec![Module::new("m", "M", vec![level])]);
        match result {
            Err(CatalogError::UnknownContent { tag, .. }) => assert_eq!(tag, "ROCKET_GAME"),
            other => panic!("expected UnknownContent, got {:?}", other),
        }
    }

    #[test]
    fn rejects_quiz_tag_on_project_level() {
        let level = Level::new("a", "A", "", LevelKind::Project, "QUIZ_EVENTS", 10);
        let result = Catalog::new(vec![Module::new("m", "M", vec![level])]);
        assert!(matches!(result, Err(CatalogError::KindMismatch { .. })));
    }

    #[test]
    fn informational_content_is_not_dispatched() {
        let level = Level::new("intro", "Intro", "", LevelKind::Informational, "Sprites are characters.", 50);
        assert!(Catalog::new(vec![Module::new("m", "M", vec![level])]).is_ok());
    }

    #[test]
    fn parse_catalog_json() {
        let json = r#"[
            { "id": "module-1", "title": "Moving Around", "lessons": [
                { "id": "1.2", "title": "Level 1: Treasure Hunt", "type": "project", "stars": 300, "content": "COORDINATE_GAME" },
                { "id": "1.3", "title": "Level 2: Secret Map Game", "type": "quiz", "stars": 150, "content": "QUIZ_COORDINATES" }
            ] }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.level_count(), 2);
        assert_eq!(catalog.level(0, 1).unwrap().stars, 150);
        assert!(!catalog.contains(0, 2));
        assert!(!catalog.contains(1, 0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
    }
}
