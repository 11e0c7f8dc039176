//! The [`Scene`] type

use crate::core::config::SceneConfig;
use crate::ecs::{Entity, EntityId, FrameContext, SceneSystem, World};
use crate::error::{EngineError, EngineResult};
use crate::events::EventBus;
use crate::input::{KeyboardProvider, MouseProvider, NoInput};
use crate::render::Background;
use crate::tilemap::{TileMap, TileMapId};
use std::rc::Rc;
use std::time::Duration;

/// Game logic run after the systems each frame
pub type UpdateHook = Box<dyn FnMut(&mut Scene, Duration)>;

/// One running level or screen
pub struct Scene {
    world: World,
    systems: Vec<SceneSystem>,
    bus: Rc<EventBus>,
    keyboard: Box<dyn KeyboardProvider>,
    mouse: Box<dyn MouseProvider>,
    background: Background,
    initialized: bool,
    update_hook: Option<UpdateHook>,
}

impl Scene {
    /// Create an uninitialised scene with its own event bus
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            world: World::new(),
            systems: Vec::new(),
            bus: EventBus::new(),
            keyboard: Box::new(NoInput),
            mouse: Box::new(NoInput),
            background: Background::from(config),
            initialized: false,
            update_hook: None,
        }
    }

    /// The scene's event bus, for systems and input providers
    pub fn event_bus(&self) -> Rc<EventBus> {
        Rc::clone(&self.bus)
    }

    /// Whether [`Scene::initialize`] has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Install the systems and input providers
    ///
    /// Fails if the scene is already initialised or `systems` holds no
    /// drawing system. Queued entities and tile maps are then announced to
    /// every system in insertion order.
    pub fn initialize(
        &mut self,
        systems: Vec<SceneSystem>,
        mouse: Box<dyn MouseProvider>,
        keyboard: Box<dyn KeyboardProvider>,
    ) -> EngineResult<()> {
        if self.initialized {
            return Err(EngineError::invalid_operation("scene is already initialized"));
        }
        if !systems.iter().any(SceneSystem::is_drawing) {
            return Err(EngineError::invalid_operation(
                "a scene requires a drawing system",
            ));
        }

        self.systems = systems;
        self.mouse = mouse;
        self.keyboard = keyboard;
        self.initialized = true;

        for (id, entity) in self.world.entities() {
            for system in &mut self.systems {
                system.as_system_mut().on_add_entity(id, entity);
            }
        }
        for (id, tilemap) in self.world.tilemaps() {
            for system in &mut self.systems {
                system.as_system_mut().on_add_tilemap(id, tilemap);
            }
        }

        log::info!(
            "Scene initialized with {} system(s), {} queued entit(ies)",
            self.systems.len(),
            self.world.entity_count()
        );
        Ok(())
    }

    /// Take ownership of `entity`; systems see it now or on initialisation
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.world.insert(entity);
        if let Some(entity) = self.world.entity(id) {
            for system in &mut self.systems {
                system.as_system_mut().on_add_entity(id, entity);
            }
        }
        log::debug!("Added {id:?}");
        id
    }

    /// Remove the entity from every system and hand it back
    pub fn remove_entity(&mut self, id: EntityId) -> EngineResult<Entity> {
        if !self.world.contains(id) {
            return Err(EngineError::EntityNotFound(id));
        }
        for system in &mut self.systems {
            system.as_system_mut().on_remove_entity(id);
        }
        log::debug!("Removed {id:?}");
        self.world.remove(id).ok_or(EngineError::EntityNotFound(id))
    }

    /// Take ownership of `tilemap`
    pub fn add_tilemap(&mut self, tilemap: TileMap) -> TileMapId {
        let id = self.world.insert_tilemap(tilemap);
        if let Some(tilemap) = self.world.tilemap(id) {
            for system in &mut self.systems {
                system.as_system_mut().on_add_tilemap(id, tilemap);
            }
        }
        id
    }

    /// Remove the tile map and hand it back
    pub fn remove_tilemap(&mut self, id: TileMapId) -> EngineResult<TileMap> {
        if self.world.tilemap(id).is_none() {
            return Err(EngineError::invalid_argument(format!("{id:?} is not in this scene")));
        }
        for system in &mut self.systems {
            system.as_system_mut().on_remove_tilemap(id);
        }
        self.world
            .remove_tilemap(id)
            .ok_or_else(|| EngineError::invalid_argument(format!("{id:?} is not in this scene")))
    }

    /// The entity with `id`
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.world.entity(id)
    }

    /// Mutable access to the entity with `id`
    ///
    /// Components attached or removed here do not change which systems
    /// track the entity.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.world.entity_mut(id)
    }

    /// Read access to everything the scene owns
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to a tile map
    pub fn tilemap_mut(&mut self, id: TileMapId) -> Option<&mut TileMap> {
        self.world.tilemap_mut(id)
    }

    /// Current keyboard provider
    pub fn keyboard(&self) -> &dyn KeyboardProvider {
        self.keyboard.as_ref()
    }

    /// Current mouse provider
    pub fn mouse(&self) -> &dyn MouseProvider {
        self.mouse.as_ref()
    }

    /// How each frame is cleared
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Change how each frame is cleared
    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    /// Install the per-frame game logic, replacing any previous hook
    pub fn set_update_hook(&mut self, hook: impl FnMut(&mut Scene, Duration) + 'static) {
        self.update_hook = Some(Box::new(hook));
    }

    /// Step one frame: poll input, run systems in order, then the hook
    pub fn on_update(&mut self, elapsed: Duration) {
        if !self.initialized {
            log::debug!("Scene update skipped: not initialized");
            return;
        }

        self.keyboard.update();
        self.mouse.update();

        let frame = FrameContext {
            keyboard: self.keyboard.as_ref(),
            mouse: self.mouse.as_ref(),
        };
        for system in &mut self.systems {
            system.as_system_mut().on_update(&mut self.world, &frame, elapsed);
        }

        if let Some(mut hook) = self.update_hook.take() {
            hook(self, elapsed);
            // Keep a hook installed from inside the hook
            if self.update_hook.is_none() {
                self.update_hook = Some(hook);
            }
        }
    }

    /// Draw one frame through the drawing system
    pub fn on_draw(&mut self, elapsed: Duration) {
        let Some(drawing) = self.systems.iter_mut().find_map(SceneSystem::as_drawing_mut) else {
            log::debug!("Scene draw skipped: not initialized");
            return;
        };
        drawing.on_draw(&self.world, &self.background, elapsed);
    }

    /// Tear the scene down
    ///
    /// Every entity and tile map is removed from every system, the systems
    /// are dropped and the bus loses all subscriptions.
    pub fn dispose(&mut self) {
        for &id in self.world.entity_ids() {
            for system in &mut self.systems {
                system.as_system_mut().on_remove_entity(id);
            }
        }
        for &id in self.world.tilemap_ids() {
            for system in &mut self.systems {
                system.as_system_mut().on_remove_tilemap(id);
            }
        }

        self.systems.clear();
        self.bus.dispose();
        self.world = World::new();
        self.update_hook = None;
        self.keyboard = Box::new(NoInput);
        self.mouse = Box::new(NoInput);
        self.initialized = false;
        log::info!("Scene disposed");
    }
}
