//! Entity-Component-System implementation
//!
//! Entities own their components; the [`World`] owns the entities; systems
//! remember entity ids and process them through the world each frame.

pub mod component;
pub mod components;
pub mod entity;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentKind, ComponentSlot};
pub use entity::{Entity, EntityId};
pub use system::{FrameContext, System};
pub use systems::SceneSystem;
pub use world::World;
