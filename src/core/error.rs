use thiserror::Error;

use crate::domain::entity::EntityId;

/// Recoverable API misuse. Simulation itself never fails; out-of-range grid
/// access and degenerate geometry have defined results instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("entity {0:?} does not exist (destroyed or never spawned)")]
    InvalidHandle(EntityId),

    #[error("entity {child:?} already has parent {parent:?}")]
    AlreadyParented { child: EntityId, parent: EntityId },

    #[error("entity {child:?} is not a child of {parent:?}")]
    NotAChild { parent: EntityId, child: EntityId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle { parent: EntityId, child: EntityId },

    #[error("invalid simulation config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
