//! # Unified Configuration System
//!
//! Consolidates the configuration structures used by the engine into a
//! single, coherent system.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Window title, logical screen size, frame rate
//! - **Scene Config**: Background colour/image and display clearing
//! - **Logging Config**: Default log filter

use serde::{Serialize, Deserialize};

use crate::foundation::colour::Colour;

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// # Engine Configuration
///
/// Core engine behavior shared by every scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Game title
    pub title: String,
    /// Logical screen width in pixels
    pub screen_width: u32,
    /// Logical screen height in pixels
    pub screen_height: u32,
    /// Target frames per second for the host loop
    pub target_fps: u32,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            screen_width: 960,
            screen_height: 540,
            target_fps: 60,
        }
    }

    /// Set the logical screen size
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Title cannot be empty".to_string());
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(format!(
                "Screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if self.target_fps == 0 {
            return Err("Target FPS must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new("Sprite Engine Game")
    }
}

/// # Scene Configuration
///
/// What the drawing surface does before drawing entities each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Colour the display is cleared to
    pub background_colour: Colour,
    /// Optional image drawn behind everything
    pub background_image: Option<String>,
    /// Whether the display is cleared every frame
    pub clear_display: bool,
}

impl SceneConfig {
    /// Set the background colour
    pub fn with_background_colour(mut self, colour: Colour) -> Self {
        self.background_colour = colour;
        self
    }

    /// Set the background image
    pub fn with_background_image(mut self, path: impl Into<String>) -> Self {
        self.background_image = Some(path.into());
        self
    }

    /// Enable or disable clearing the display
    pub fn with_clear_display(mut self, clear: bool) -> Self {
        self.clear_display = clear;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background_colour: Colour::BLACK,
            background_image: None,
            clear_display: true,
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "sprite_engine=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Scene defaults
    pub scene: SceneConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            engine: EngineConfig::new(title),
            scene: SceneConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Config for ApplicationConfig {}
