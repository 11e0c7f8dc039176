//! Tween system
//!
//! Advances [`TweenComponent`]s. A finished tween is detached before its
//! completion callback runs, so the callback may attach a new one.

use crate::ecs::components::TweenComponent;
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use std::time::Duration;

/// Drives position tweens
#[derive(Debug, Default)]
pub struct TweenSystem {
    entities: Vec<EntityId>,
}

impl TweenSystem {
    /// Create a tween system
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for TweenSystem {
    fn name(&self) -> &'static str {
        "tween"
    }

    // Tweens are usually attached after the entity joins, so track everyone
    fn on_add_entity(&mut self, id: EntityId, _entity: &Entity) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|&other| other != id);
    }

    fn on_update(&mut self, world: &mut World, _frame: &FrameContext<'_>, elapsed: Duration) {
        for &id in &self.entities {
            let Some(entity) = world.entity_mut(id) else {
                continue;
            };
            let Some(tween) = entity.get_mut::<TweenComponent>() else {
                continue;
            };

            let (x, y) = tween.advance(elapsed);
            let finished = tween.is_finished();
            entity.move_to(x, y);

            if finished {
                let callback = entity.remove::<TweenComponent>().and_then(|tween| tween.on_complete());
                log::trace!("{id:?} finished tween at ({x}, {y})");
                if let Some(callback) = callback {
                    callback(entity);
                }
            }
        }
    }
}
