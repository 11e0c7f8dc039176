//! Audio playback abstraction
//!
//! Single-threaded: the host player is driven from the scene update and
//! reads [`AudioComponent`](crate::ecs::components::AudioComponent) state
//! straight out of the world.

use crate::ecs::{Entity, EntityId, World};

/// Audio backend implemented by the host
pub trait AudioPlayer {
    /// Load the sound of an entity carrying an audio component
    fn add_entity(&mut self, id: EntityId, entity: &Entity);

    /// Release the sound of a removed entity
    fn remove_entity(&mut self, id: EntityId);

    /// Start pending playback requests, apply volume and pitch changes
    fn on_update(&mut self, world: &mut World);
}
