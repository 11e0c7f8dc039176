//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the engine, scene and logging
//! - **Foundation**: Low-level utilities (colour, time, logging)
//! - **ECS**: Entity-Component-System implementation

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::ecs;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    SceneConfig,
    LoggingConfig,
    Config,
    ConfigError,
    ConfigFormat,
};
