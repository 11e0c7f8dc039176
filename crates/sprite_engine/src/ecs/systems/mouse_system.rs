//! Click dispatch
//!
//! Subscribes to `MouseClicked` when constructed. Each click is delivered on
//! the next update to every tracked entity whose clickable area contains the
//! cursor; edges count as inside.

use crate::ecs::components::MouseComponent;
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use crate::events::{EventBus, EventCallback, EventData, Signal};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Delivers clicks to mouse components
pub struct MouseSystem {
    bus: Rc<EventBus>,
    entities: Vec<EntityId>,
    pending_clicks: Rc<Cell<u32>>,
    subscription: EventCallback,
}

impl MouseSystem {
    /// Create the system and subscribe it to `bus`
    pub fn new(bus: Rc<EventBus>) -> Self {
        let pending_clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pending_clicks);
        let subscription: EventCallback = Rc::new(move |_: Option<&EventData>| {
            counter.set(counter.get() + 1);
        });
        bus.subscribe(Signal::MouseClicked, Rc::clone(&subscription));

        Self {
            bus,
            entities: Vec::new(),
            pending_clicks,
            subscription,
        }
    }

    /// Ids of tracked entities
    pub fn tracked(&self) -> &[EntityId] {
        &self.entities
    }
}

impl System for MouseSystem {
    fn name(&self) -> &'static str {
        "mouse"
    }

    fn on_add_entity(&mut self, id: EntityId, entity: &Entity) {
        if entity.has::<MouseComponent>() && !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|&other| other != id);
    }

    fn on_update(&mut self, world: &mut World, frame: &FrameContext<'_>, _elapsed: Duration) {
        let clicks = self.pending_clicks.replace(0);
        if clicks == 0 {
            return;
        }

        let (mouse_x, mouse_y) = frame.mouse.mouse_coordinates();
        for _ in 0..clicks {
            for &id in &self.entities {
                let Some(entity) = world.entity_mut(id) else {
                    continue;
                };
                let callback = entity.get::<MouseComponent>().and_then(|mouse| {
                    mouse
                        .bounds_at(entity.x, entity.y)
                        .contains_inclusive(mouse_x as f32, mouse_y as f32)
                        .then(|| mouse.on_click())
                        .flatten()
                });
                if let Some(callback) = callback {
                    log::trace!("{id:?} clicked at ({mouse_x}, {mouse_y})");
                    callback(entity, mouse_x, mouse_y);
                }
            }
        }
    }
}

impl Drop for MouseSystem {
    fn drop(&mut self) {
        if let Err(err) = self.bus.unsubscribe(Signal::MouseClicked, &self.subscription) {
            log::debug!("Mouse system unsubscribe skipped: {err}");
        }
    }
}
