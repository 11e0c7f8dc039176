//! Audio system
//!
//! Registers entities carrying an [`AudioComponent`] with the host player
//! and polls the player once per frame.

use crate::audio::AudioPlayer;
use crate::ecs::components::AudioComponent;
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use std::time::Duration;

/// Bridges audio components to an [`AudioPlayer`]
pub struct AudioSystem {
    player: Box<dyn AudioPlayer>,
    entities: Vec<EntityId>,
}

impl AudioSystem {
    /// Create an audio system driving `player`
    pub fn new(player: Box<dyn AudioPlayer>) -> Self {
        Self {
            player,
            entities: Vec::new(),
        }
    }

    /// Ids of registered entities
    pub fn tracked(&self) -> &[EntityId] {
        &self.entities
    }
}

impl System for AudioSystem {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn on_add_entity(&mut self, id: EntityId, entity: &Entity) {
        if entity.has::<AudioComponent>() && !self.entities.contains(&id) {
            self.entities.push(id);
            self.player.add_entity(id, entity);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        if let Some(index) = self.entities.iter().position(|&other| other == id) {
            self.entities.remove(index);
            self.player.remove_entity(id);
        }
    }

    fn on_update(&mut self, world: &mut World, _frame: &FrameContext<'_>, _elapsed: Duration) {
        self.player.on_update(world);
    }
}
