//! # Sprite Engine
//!
//! The core of a frame-stepped 2D game engine: entities with components,
//! systems that process them, tile maps, and a scene that schedules it all.
//! Rendering, audio and input devices are supplied by the host through
//! small traits.
//!
//! ## Features
//!
//! - **ECS**: Entities own a closed set of components; systems track ids
//! - **Collision**: Swept AABB resolution against entities and solid tiles,
//!   with optional sliding
//! - **Triggers**: Overlap and mouse-hover start/stop callbacks
//! - **Events**: Signal-keyed publish/subscribe bus for input
//! - **Config**: TOML or RON application config
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//! use std::time::Duration;
//!
//! struct NullSurface;
//!
//! impl DrawingSurface for NullSurface {
//!     fn add_entity(&mut self, _id: EntityId, _entity: &Entity) {}
//!     fn remove_entity(&mut self, _id: EntityId) {}
//!     fn add_tilemap(&mut self, _id: TileMapId, _tilemap: &TileMap) {}
//!     fn remove_tilemap(&mut self, _id: TileMapId) {}
//!     fn draw_all(&mut self, _world: &World, _background: &Background, _elapsed: Duration) {}
//! }
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut scene = Scene::new(&SceneConfig::default());
//!     let mut player = Entity::named("player", 0.0, 0.0).with(CollisionComponent::new(16.0, 16.0)?);
//!     player.set_velocity(60.0, 0.0);
//!     scene.add_entity(player);
//!
//!     scene.initialize(
//!         vec![MovementSystem::new().into(), DrawingSystem::new(Box::new(NullSurface)).into()],
//!         Box::new(NoInput),
//!         Box::new(NoInput),
//!     )?;
//!
//!     let mut timer = Timer::fixed_rate(60);
//!     for _ in 0..60 {
//!         let elapsed = timer.tick();
//!         scene.on_update(elapsed);
//!         scene.on_draw(elapsed);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod config;
pub mod core;
pub mod ecs;
pub mod error;
pub mod events;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod tilemap;

pub use error::{EngineError, EngineResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::AudioPlayer,
        core::config::{ApplicationConfig, Config, EngineConfig, LoggingConfig, SceneConfig},
        ecs::components::{
            AudioComponent, CollisionComponent, CollisionTarget, ColourBlockComponent,
            FourWayMovementComponent, KeyboardComponent, MouseComponent, OverlapComponent,
            SpriteComponent, TextLabelComponent, TweenComponent,
        },
        ecs::systems::{
            AudioSystem, DrawingSystem, KeyboardSystem, MouseOverlapSystem, MouseSystem,
            MovementSystem, OverlapSystem, TweenSystem,
        },
        ecs::{Entity, EntityId, SceneSystem, World},
        error::{EngineError, EngineResult},
        events::{EventBus, EventCallback, EventData, Signal},
        foundation::{
            colour::Colour,
            time::{Stopwatch, Timer},
        },
        input::{Action, KeyboardProvider, MouseProvider, NoInput},
        physics::{Aabb, Axis},
        render::{Background, DrawingSurface},
        scene::Scene,
        tilemap::{TileDefinition, TileMap, TileMapId},
    };
}
