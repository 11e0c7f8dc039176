//! System trait
//!
//! A system tracks the entities it cares about by id and processes them once
//! per frame. The scene announces every entity added to or removed from it;
//! each system decides membership for itself on add.

use super::entity::{Entity, EntityId};
use super::world::World;
use crate::input::{KeyboardProvider, MouseProvider};
use crate::tilemap::{TileMap, TileMapId};
use std::time::Duration;

/// Per-frame view of the host input providers
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Keyboard state for this frame
    pub keyboard: &'a dyn KeyboardProvider,
    /// Mouse state for this frame
    pub mouse: &'a dyn MouseProvider,
}

/// Per-frame processing over a subset of entities
pub trait System {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// An entity joined the scene
    fn on_add_entity(&mut self, id: EntityId, entity: &Entity);

    /// An entity left the scene; forget it if tracked
    fn on_remove_entity(&mut self, id: EntityId);

    /// A tile map joined the scene
    fn on_add_tilemap(&mut self, _id: TileMapId, _tilemap: &TileMap) {}

    /// A tile map left the scene
    fn on_remove_tilemap(&mut self, _id: TileMapId) {}

    /// Process one frame
    fn on_update(&mut self, world: &mut World, frame: &FrameContext<'_>, elapsed: Duration);
}
