//! Engine-wide error taxonomy
//!
//! Every failure the core can report is local and synchronous: a violated
//! contract is surfaced at the call that violated it and is never retried.

use crate::config::ConfigError;
use crate::ecs::EntityId;
use crate::events::Signal;
use thiserror::Error;

/// Errors raised by the engine core
#[derive(Error, Debug)]
pub enum EngineError {
    /// A parameter at a public boundary is out of its accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required collaborator or definition is missing
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Unsubscribe was called for a signal nobody ever subscribed to
    #[error("Unknown signal: {0:?}")]
    UnknownSignal(Signal),

    /// The entity id is not live in this scene
    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Configuration could not be loaded or saved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidArgument`]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Shorthand for an [`EngineError::InvalidOperation`]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}
