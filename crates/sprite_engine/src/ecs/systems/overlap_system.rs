//! Pairwise overlap detection
//!
//! Every frame each tracked entity's overlap area is tested against every
//! other tracked entity's area (ordered pairs, so both sides are notified).
//! Only transitions fire callbacks.

use crate::ecs::components::OverlapComponent;
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use crate::physics::Aabb;
use std::time::Duration;

/// Detects overlap start/stop between entities with an [`OverlapComponent`]
#[derive(Debug, Default)]
pub struct OverlapSystem {
    entities: Vec<EntityId>,
    removed: Vec<EntityId>,
}

impl OverlapSystem {
    /// Create an overlap system
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of tracked entities
    pub fn tracked(&self) -> &[EntityId] {
        &self.entities
    }

    fn area(world: &World, id: EntityId) -> Option<Aabb> {
        let entity = world.entity(id)?;
        let overlap = entity.get::<OverlapComponent>()?;
        Some(overlap.bounds_at(entity.x, entity.y))
    }

    /// Drop ids of removed entities from every recorded set, silently
    fn purge_removed(&mut self, world: &mut World) {
        if self.removed.is_empty() {
            return;
        }
        for &id in &self.entities {
            if let Some(overlap) = world.entity_mut(id).and_then(Entity::get_mut::<OverlapComponent>) {
                for removed in &self.removed {
                    overlap.forget(*removed);
                }
            }
        }
        self.removed.clear();
    }
}

impl System for OverlapSystem {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn on_add_entity(&mut self, id: EntityId, entity: &Entity) {
        if entity.has::<OverlapComponent>() && !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        if let Some(index) = self.entities.iter().position(|&other| other == id) {
            self.entities.remove(index);
            self.removed.push(id);
        }
    }

    fn on_update(&mut self, world: &mut World, _frame: &FrameContext<'_>, _elapsed: Duration) {
        self.purge_removed(world);

        for &me in &self.entities {
            for &target in &self.entities {
                if me == target {
                    continue;
                }
                let (Some(my_area), Some(target_area)) = (Self::area(world, me), Self::area(world, target)) else {
                    continue;
                };
                let overlapping = my_area.overlaps(&target_area);

                let Some(entity) = world.entity_mut(me) else {
                    continue;
                };
                let callback = entity.get_mut::<OverlapComponent>().and_then(|overlap| {
                    if overlapping {
                        overlap.started_overlapping(target)
                    } else {
                        overlap.stopped_overlapping(target)
                    }
                });
                if let Some(callback) = callback {
                    log::trace!("{me:?} {} overlapping {target:?}", if overlapping { "started" } else { "stopped" });
                    callback(entity, target);
                }
            }
        }
    }
}
