//! Cursor hover detection
//!
//! Treats the cursor as a 1x1 box and reports enter/exit transitions for
//! entities with an [`OverlapComponent`]. One set records which entities the
//! cursor is currently over.

use crate::ecs::components::OverlapComponent;
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use crate::physics::Aabb;
use std::collections::HashSet;
use std::time::Duration;

/// Fires mouse enter/exit callbacks
#[derive(Debug, Default)]
pub struct MouseOverlapSystem {
    entities: Vec<EntityId>,
    hovered: HashSet<EntityId>,
}

impl MouseOverlapSystem {
    /// Create a mouse overlap system
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cursor is currently over `id`
    pub fn is_hovered(&self, id: EntityId) -> bool {
        self.hovered.contains(&id)
    }
}

impl System for MouseOverlapSystem {
    fn name(&self) -> &'static str {
        "mouse_overlap"
    }

    fn on_add_entity(&mut self, id: EntityId, entity: &Entity) {
        if entity.has::<OverlapComponent>() && !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|&other| other != id);
        self.hovered.remove(&id);
    }

    fn on_update(&mut self, world: &mut World, frame: &FrameContext<'_>, _elapsed: Duration) {
        let (mouse_x, mouse_y) = frame.mouse.mouse_coordinates();
        let cursor = Aabb::new(mouse_x as f32, mouse_y as f32, 1.0, 1.0);

        for &id in &self.entities {
            let Some(entity) = world.entity_mut(id) else {
                continue;
            };
            let Some(overlap) = entity.get::<OverlapComponent>() else {
                continue;
            };

            let over = overlap.bounds_at(entity.x, entity.y).overlaps(&cursor);
            let callback = if over && self.hovered.insert(id) {
                overlap.on_mouse_enter()
            } else if !over && self.hovered.remove(&id) {
                overlap.on_mouse_exit()
            } else {
                None
            };

            if let Some(callback) = callback {
                callback(entity);
            }
        }
    }
}
