//! Drawing surface abstraction
//!
//! The engine never rasterises anything itself. A host backend implements
//! [`DrawingSurface`] and receives entity and tile map registrations plus
//! one `draw_all` call per frame.

use crate::core::config::SceneConfig;
use crate::ecs::{Entity, EntityId, World};
use crate::foundation::colour::Colour;
use crate::tilemap::{TileMap, TileMapId};
use std::time::Duration;

/// How the frame is cleared before entities are drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    /// Clear colour
    pub colour: Colour,
    /// Image drawn behind everything, if any
    pub image: Option<String>,
    /// Whether to clear the display before drawing
    pub clear_display: bool,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            colour: Colour::BLACK,
            image: None,
            clear_display: true,
        }
    }
}

impl From<&SceneConfig> for Background {
    fn from(config: &SceneConfig) -> Self {
        Self {
            colour: config.background_colour,
            image: config.background_image.clone(),
            clear_display: config.clear_display,
        }
    }
}

/// Rendering backend implemented by the host
pub trait DrawingSurface {
    /// Start drawing `entity`; called once per registration
    fn add_entity(&mut self, id: EntityId, entity: &Entity);

    /// Stop drawing the entity
    fn remove_entity(&mut self, id: EntityId);

    /// Start drawing `tilemap`
    fn add_tilemap(&mut self, id: TileMapId, tilemap: &TileMap);

    /// Stop drawing the tile map
    fn remove_tilemap(&mut self, id: TileMapId);

    /// Render one frame of every registered entity and tile map
    fn draw_all(&mut self, world: &World, background: &Background, elapsed: Duration);
}
