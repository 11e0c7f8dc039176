//! Drawing system
//!
//! Registers drawable entities and every tile map with the host surface and
//! asks it to draw once per frame. A scene cannot run without one.

use crate::ecs::component::ComponentKind;
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use crate::render::{Background, DrawingSurface};
use crate::tilemap::{TileMap, TileMapId};
use std::time::Duration;

const DRAWABLE: [ComponentKind; 3] = [
    ComponentKind::Sprite,
    ComponentKind::TextLabel,
    ComponentKind::ColourBlock,
];

/// Bridges drawable components to a [`DrawingSurface`]
pub struct DrawingSystem {
    surface: Box<dyn DrawingSurface>,
    entities: Vec<EntityId>,
    tilemaps: Vec<TileMapId>,
}

impl DrawingSystem {
    /// Create a drawing system rendering to `surface`
    pub fn new(surface: Box<dyn DrawingSurface>) -> Self {
        Self {
            surface,
            entities: Vec::new(),
            tilemaps: Vec::new(),
        }
    }

    /// Ids of registered entities
    pub fn tracked(&self) -> &[EntityId] {
        &self.entities
    }

    /// Render one frame
    pub fn on_draw(&mut self, world: &World, background: &Background, elapsed: Duration) {
        self.surface.draw_all(world, background, elapsed);
    }
}

impl System for DrawingSystem {
    fn name(&self) -> &'static str {
        "drawing"
    }

    fn on_add_entity(&mut self, id: EntityId, entity: &Entity) {
        let drawable = DRAWABLE.iter().any(|&kind| entity.has_kind(kind));
        if drawable && !self.entities.contains(&id) {
            self.entities.push(id);
            self.surface.add_entity(id, entity);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        if let Some(index) = self.entities.iter().position(|&other| other == id) {
            self.entities.remove(index);
            self.surface.remove_entity(id);
        }
    }

    fn on_add_tilemap(&mut self, id: TileMapId, tilemap: &TileMap) {
        if !self.tilemaps.contains(&id) {
            self.tilemaps.push(id);
            self.surface.add_tilemap(id, tilemap);
        }
    }

    fn on_remove_tilemap(&mut self, id: TileMapId) {
        if let Some(index) = self.tilemaps.iter().position(|&other| other == id) {
            self.tilemaps.remove(index);
            self.surface.remove_tilemap(id);
        }
    }

    fn on_update(&mut self, _world: &mut World, _frame: &FrameContext<'_>, _elapsed: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{ColourBlockComponent, SpriteComponent};
    use crate::foundation::colour::Colour;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingSurface(Rc<RefCell<Vec<String>>>);

    impl DrawingSurface for RecordingSurface {
        fn add_entity(&mut self, _id: EntityId, entity: &Entity) {
            self.0.borrow_mut().push(format!("add {}", entity.name.as_deref().unwrap_or("?")));
        }

        fn remove_entity(&mut self, _id: EntityId) {
            self.0.borrow_mut().push("remove".to_owned());
        }

        fn add_tilemap(&mut self, _id: TileMapId, tilemap: &TileMap) {
            self.0.borrow_mut().push(format!("tilemap {}", tilemap.image_file()));
        }

        fn remove_tilemap(&mut self, _id: TileMapId) {
            self.0.borrow_mut().push("untilemap".to_owned());
        }

        fn draw_all(&mut self, world: &World, background: &Background, _elapsed: Duration) {
            self.0
                .borrow_mut()
                .push(format!("draw {} on {:?}", world.entity_count(), background.colour));
        }
    }

    #[test]
    fn test_only_drawables_are_registered() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut system = DrawingSystem::new(Box::new(RecordingSurface(Rc::clone(&log))));
        let mut world = World::new();

        let hero = world.insert(Entity::named("hero", 0.0, 0.0).with(SpriteComponent::new("hero.png")));
        let block = world.insert(Entity::named("block", 0.0, 0.0).with(ColourBlockComponent::new(Colour::WHITE, 4, 4)));
        let ghost = world.insert(Entity::named("ghost", 0.0, 0.0));
        for id in [hero, block, ghost] {
            system.on_add_entity(id, world.entity(id).unwrap());
        }
        system.on_remove_entity(ghost);
        system.on_remove_entity(hero);

        let map = world.insert_tilemap(TileMap::new(1, 1, "tiles.png", 8, 8).unwrap());
        system.on_add_tilemap(map, world.tilemap(map).unwrap());
        system.on_remove_tilemap(map);
        system.on_remove_tilemap(map);

        system.on_draw(&world, &Background::default(), Duration::ZERO);

        assert_eq!(system.tracked(), &[block]);
        assert_eq!(
            *log.borrow(),
            vec![
                "add hero".to_owned(),
                "add block".to_owned(),
                "remove".to_owned(),
                "tilemap tiles.png".to_owned(),
                "untilemap".to_owned(),
                format!("draw 3 on {:?}", Colour::BLACK),
            ]
        );
    }
}
