//! # Scene Error Types

use slotforge_core::PoolError;
use thiserror::Error;

/// Errors raised while driving scenes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No scene is registered under this name.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// Two scenes were registered under the same name.
    #[error("duplicate scene name: {0}")]
    DuplicateScene(String),

    /// A frame was stepped with no scene active.
    #[error("no scene is active")]
    NoActiveScene,

    /// A storage operation inside a scene failed.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
