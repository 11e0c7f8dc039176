//! Collision component for entities that block movement
//!
//! Entities carrying this component are resolved against solid tiles and
//! against each other by the movement system. The box is offset from the
//! entity position so a sprite can have a tighter hitbox than its image.

use crate::ecs::{Entity, EntityId};
use crate::error::{EngineError, EngineResult};
use crate::physics::{Aabb, Axis};
use crate::tilemap::TileMapId;
use std::fmt;
use std::rc::Rc;

/// What a moving entity collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionTarget {
    /// Another entity with a collision component
    Entity(EntityId),
    /// A solid tile
    Tile {
        /// Tilemap the tile belongs to
        tilemap: TileMapId,
        /// Grid column
        column: i32,
        /// Grid row
        row: i32,
    },
}

/// Callback invoked on the owning entity after a collision was resolved
pub type CollideCallback = Rc<dyn Fn(&mut Entity, CollisionTarget, Axis)>;

/// Solid collision box
#[derive(Clone)]
pub struct CollisionComponent {
    /// Box width in pixels
    pub width: f32,
    /// Box height in pixels
    pub height: f32,
    /// Horizontal offset from the entity position
    pub x_offset: f32,
    /// Vertical offset from the entity position
    pub y_offset: f32,
    /// Keep moving along the free axis when blocked diagonally
    pub slide_on_collide: bool,
    on_collide: Option<CollideCallback>,
}

impl CollisionComponent {
    /// Create a collision box of the given size
    ///
    /// Sizes must be positive and finite.
    pub fn new(width: f32, height: f32) -> EngineResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::invalid_argument(format!(
                "collision box must have a positive size, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            x_offset: 0.0,
            y_offset: 0.0,
            slide_on_collide: false,
            on_collide: None,
        })
    }

    /// Offset the box from the entity position
    #[must_use]
    pub fn with_offset(mut self, x_offset: f32, y_offset: f32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Enable or disable sliding along obstacles
    #[must_use]
    pub fn with_slide_on_collide(mut self, slide: bool) -> Self {
        self.slide_on_collide = slide;
        self
    }

    /// Set the collision callback
    #[must_use]
    pub fn with_on_collide(
        mut self,
        callback: impl Fn(&mut Entity, CollisionTarget, Axis) + 'static,
    ) -> Self {
        self.on_collide = Some(Rc::new(callback));
        self
    }

    /// The collision callback, if any
    pub fn on_collide(&self) -> Option<CollideCallback> {
        self.on_collide.clone()
    }

    /// The box in scene space for an entity at `(x, y)`
    pub fn bounds_at(&self, x: f32, y: f32) -> Aabb {
        Aabb::new(x + self.x_offset, y + self.y_offset, self.width, self.height)
    }
}

impl fmt::Debug for CollisionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionComponent")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("x_offset", &self.x_offset)
            .field("y_offset", &self.y_offset)
            .field("slide_on_collide", &self.slide_on_collide)
            .field("on_collide", &self.on_collide.is_some())
            .finish()
    }
}
