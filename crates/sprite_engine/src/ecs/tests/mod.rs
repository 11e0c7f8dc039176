//! Integration tests: scenes running the full system roster


use crate::ecs::{Entity, EntityId, World};
use crate::input::{Action, KeyboardProvider};
use crate::render::{Background, DrawingSurface};
use crate::tilemap::{TileMap, TileMapId};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shared log written by the fakes below
pub(crate) type Log = Rc<RefCell<Vec<String>>>;

/// Drawing surface that records every call
pub(crate) struct RecordingSurface {
    pub log: Log,
}

impl DrawingSurface for RecordingSurface {
    fn add_entity(&mut self, _id: EntityId, entity: &Entity) {
        self.log
            .borrow_mut()
            .push(format!("add {}", entity.name.as_deref().unwrap_or("?")));
    }

    fn remove_entity(&mut self, _id: EntityId) {
        self.log.borrow_mut().push("remove".to_owned());
    }

    fn add_tilemap(&mut self, _id: TileMapId, tilemap: &TileMap) {
        self.log.borrow_mut().push(format!("tilemap {}", tilemap.image_file()));
    }

    fn remove_tilemap(&mut self, _id: TileMapId) {
        self.log.borrow_mut().push("untilemap".to_owned());
    }

    fn draw_all(&mut self, world: &World, background: &Background, _elapsed: Duration) {
        self.log.borrow_mut().push(format!(
            "draw {} clear={}",
            world.entity_count(),
            background.clear_display
        ));
    }
}

/// Keyboard whose held actions are set by the test
#[derive(Clone, Default)]
pub(crate) struct ScriptedKeyboard {
    pub held: Rc<RefCell<Vec<Action>>>,
}

impl KeyboardProvider for ScriptedKeyboard {
    fn is_action_down(&self, action: Action) -> bool {
        self.held.borrow().contains(&action)
    }

    fn update(&mut self) {}
}
