//! ECS World implementation
//!
//! The world owns every live entity and tile map of a scene. Systems never
//! hold entities; they remember ids and look them up here on each update.

use super::entity::{Entity, EntityId};
use crate::tilemap::{TileMap, TileMapId};
use slotmap::SlotMap;

/// Entity and tile map storage for one scene
#[derive(Debug, Default)]
pub struct World {
    entities: SlotMap<EntityId, Entity>,
    entity_order: Vec<EntityId>,
    tilemaps: SlotMap<TileMapId, TileMap>,
    tilemap_order: Vec<TileMapId>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity` and return its id
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        self.entity_order.push(id);
        id
    }

    /// Remove and return the entity with `id`
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(id)?;
        self.entity_order.retain(|&other| other != id);
        Some(entity)
    }

    /// Whether `id` is live
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// The entity with `id`
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutable access to the entity with `id`
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Live entity ids in insertion order
    pub fn entity_ids(&self) -> &[EntityId] {
        &self.entity_order
    }

    /// Live entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entity_order
            .iter()
            .filter_map(move |&id| self.entities.get(id).map(|entity| (id, entity)))
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// First entity, in insertion order, whose name is `name`
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities()
            .find(|(_, entity)| entity.name.as_deref() == Some(name))
            .map(|(id, _)| id)
    }

    /// Take ownership of `tilemap` and return its id
    pub fn insert_tilemap(&mut self, tilemap: TileMap) -> TileMapId {
        let id = self.tilemaps.insert(tilemap);
        self.tilemap_order.push(id);
        id
    }

    /// Remove and return the tile map with `id`
    pub fn remove_tilemap(&mut self, id: TileMapId) -> Option<TileMap> {
        let tilemap = self.tilemaps.remove(id)?;
        self.tilemap_order.retain(|&other| other != id);
        Some(tilemap)
    }

    /// The tile map with `id`
    pub fn tilemap(&self, id: TileMapId) -> Option<&TileMap> {
        self.tilemaps.get(id)
    }

    /// Mutable access to the tile map with `id`
    pub fn tilemap_mut(&mut self, id: TileMapId) -> Option<&mut TileMap> {
        self.tilemaps.get_mut(id)
    }

    /// Live tile map ids in insertion order
    pub fn tilemap_ids(&self) -> &[TileMapId] {
        &self.tilemap_order
    }

    /// Live tile maps in insertion order
    pub fn tilemaps(&self) -> impl Iterator<Item = (TileMapId, &TileMap)> + '_ {
        self.tilemap_order
            .iter()
            .filter_map(move |&id| self.tilemaps.get(id).map(|tilemap| (id, tilemap)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut world = World::new();
        let a = world.insert(Entity::named("a", 0.0, 0.0));
        let b = world.insert(Entity::named("b", 0.0, 0.0));
        let c = world.insert(Entity::named("c", 0.0, 0.0));

        assert_eq!(world.remove(b).and_then(|e| e.name), Some("b".to_owned()));
        assert_eq!(world.entity_ids(), &[a, c]);
        assert!(!world.contains(b));
        assert!(world.remove(b).is_none());
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_find_by_name() {
        let mut world = World::new();
        world.insert(Entity::new(0.0, 0.0));
        let player = world.insert(Entity::named("player", 10.0, 20.0));
        assert_eq!(world.find_by_name("player"), Some(player));
        assert_eq!(world.find_by_name("enemy"), None);
    }

    #[test]
    fn test_tilemaps_are_owned() {
        let mut world = World::new();
        let id = world.insert_tilemap(TileMap::new(2, 2, "t.png", 8, 8).unwrap());
        assert_eq!(world.tilemap_ids(), &[id]);
        assert_eq!(world.tilemap(id).map(TileMap::map_width), Some(2));
        assert!(world.remove_tilemap(id).is_some());
        assert!(world.tilemaps().next().is_none());
    }
}
