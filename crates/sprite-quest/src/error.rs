use thiserror::Error;

use crate::api::types::LevelId;
use crate::catalog::level::LevelKind;

/// Reasons a catalog is refused at construction time.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no modules")]
    EmptyCatalog,

    #[error("module '{module}' has no levels")]
    EmptyModule { module: String },

    #[error("level id '{id}' is used more than once")]
    DuplicateLevelId { id: LevelId },

    #[error("level '{level}' references unknown content '{tag}'")]
    UnknownContent { level: LevelId, tag: String },

    #[error("level '{level}' is a {kind:?} level but content '{tag}' belongs to another kind")]
    KindMismatch {
        level: LevelId,
        kind: LevelKind,
        tag: String,
    },

    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a quest configuration is refused.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config field '{field}' must be greater than zero")]
    ZeroCapacity { field: &'static str },
}
