//! Entity implementation
//!
//! An entity is a position, a velocity and a table holding at most one
//! component per [`ComponentKind`]. Entities are created freestanding and
//! become live when a scene takes ownership of them.

use super::component::{Component, ComponentKind, ComponentSlot};
use std::collections::HashMap;
use std::fmt;

slotmap::new_key_type! {
    /// Identifier of an entity owned by a scene
    pub struct EntityId;
}

/// A game object: position, velocity and components
#[derive(Clone, Default)]
pub struct Entity {
    /// Left edge in scene pixels
    ///
    /// Movement commits whole pixels only; the fraction is carried into the
    /// next frame's delta.
    pub x: f32,
    /// Top edge in scene pixels
    pub y: f32,
    /// Horizontal velocity in pixels per second
    pub velocity_x: f32,
    /// Vertical velocity in pixels per second
    pub velocity_y: f32,
    /// Optional label for debugging and lookup
    pub name: Option<String>,
    intended_move_delta_x: f32,
    intended_move_delta_y: f32,
    sub_pixel_x: f32,
    sub_pixel_y: f32,
    components: HashMap<ComponentKind, Component>,
}

impl Entity {
    /// Create an entity at `(x, y)` with no components
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Create a named entity at `(x, y)`
    pub fn named(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(x, y)
        }
    }

    /// Attach a component, replacing any existing component of the same kind
    pub fn set<T: ComponentSlot>(&mut self, component: T) -> &mut Self {
        self.components.remove(&T::KIND);
        self.components.insert(T::KIND, component.into_component());
        self
    }

    /// Builder form of [`Entity::set`]
    #[must_use]
    pub fn with<T: ComponentSlot>(mut self, component: T) -> Self {
        self.set(component);
        self
    }

    /// Detach and return the component of kind `T`, if any
    pub fn remove<T: ComponentSlot>(&mut self) -> Option<T> {
        self.components.remove(&T::KIND).and_then(T::from_owned)
    }

    /// The component of kind `T`, if attached
    pub fn get<T: ComponentSlot>(&self) -> Option<&T> {
        self.components.get(&T::KIND).and_then(T::from_ref)
    }

    /// Mutable access to the component of kind `T`, if attached
    pub fn get_mut<T: ComponentSlot>(&mut self) -> Option<&mut T> {
        self.components.get_mut(&T::KIND).and_then(T::from_mut)
    }

    /// Whether a component of kind `T` is attached
    pub fn has<T: ComponentSlot>(&self) -> bool {
        self.components.contains_key(&T::KIND)
    }

    /// Whether any component of `kind` is attached
    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// Kinds of all attached components
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.keys().copied()
    }

    /// Teleport to `(x, y)`, bypassing velocity, collision and tweens
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Set both velocity components
    pub fn set_velocity(&mut self, velocity_x: f32, velocity_y: f32) {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
    }

    /// Horizontal position rounded to a whole pixel
    pub fn pixel_x(&self) -> i32 {
        self.x.round() as i32
    }

    /// Vertical position rounded to a whole pixel
    pub fn pixel_y(&self) -> i32 {
        self.y.round() as i32
    }

    /// Movement accumulated for the frame being resolved
    pub fn intended_move_delta(&self) -> (f32, f32) {
        (self.intended_move_delta_x, self.intended_move_delta_y)
    }

    pub(crate) fn set_intended_move_delta(&mut self, delta_x: f32, delta_y: f32) {
        self.intended_move_delta_x = delta_x;
        self.intended_move_delta_y = delta_y;
    }

    /// Add this frame's travel plus any carried sub-pixel remainder
    pub(crate) fn accumulate_intended_move(&mut self, seconds: f32) {
        self.intended_move_delta_x += self.velocity_x * seconds + std::mem::take(&mut self.sub_pixel_x);
        self.intended_move_delta_y += self.velocity_y * seconds + std::mem::take(&mut self.sub_pixel_y);
    }

    /// Commit the whole-pixel part of the delta and clear it
    pub(crate) fn apply_intended_move(&mut self) {
        let whole_x = self.intended_move_delta_x.trunc();
        let whole_y = self.intended_move_delta_y.trunc();
        self.x += whole_x;
        self.y += whole_y;
        self.sub_pixel_x = self.intended_move_delta_x - whole_x;
        self.sub_pixel_y = self.intended_move_delta_y - whole_y;
        self.intended_move_delta_x = 0.0;
        self.intended_move_delta_y = 0.0;
    }

    pub(crate) fn has_intended_move(&self) -> bool {
        self.intended_move_delta_x != 0.0 || self.intended_move_delta_y != 0.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("velocity_x", &self.velocity_x)
            .field("velocity_y", &self.velocity_y)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CollisionComponent, KeyboardComponent, SpriteComponent};

    #[test]
    fn test_set_replaces_component_of_same_kind() {
        let mut entity = Entity::new(0.0, 0.0);
        entity.set(CollisionComponent::new(10.0, 10.0).unwrap());
        entity.set(CollisionComponent::new(20.0, 30.0).unwrap());

        let collision = entity.get::<CollisionComponent>().unwrap();
        assert_eq!(collision.width, 20.0);
        assert_eq!(collision.height, 30.0);
        assert_eq!(entity.component_kinds().count(), 1);
    }

    #[test]
    fn test_missing_component_is_none() {
        let entity = Entity::new(0.0, 0.0).with(SpriteComponent::new("hero.png"));
        assert!(entity.get::<KeyboardComponent>().is_none());
        assert!(entity.has::<SpriteComponent>());
    }

    #[test]
    fn test_remove_clears_slot() {
        let mut entity = Entity::new(0.0, 0.0).with(SpriteComponent::new("hero.png"));
        let removed = entity.remove::<SpriteComponent>().unwrap();
        assert_eq!(removed.image_file, "hero.png");
        assert!(!entity.has::<SpriteComponent>());
        assert!(entity.remove::<SpriteComponent>().is_none());
    }

    #[test]
    fn test_move_to_is_a_teleport() {
        let mut entity = Entity::new(5.0, 5.0);
        entity.set_velocity(100.0, 0.0);
        entity.move_to(-40.0, 12.5);
        assert_eq!((entity.x, entity.y), (-40.0, 12.5));
        assert_eq!(entity.velocity_x, 100.0);
        assert_eq!(entity.intended_move_delta(), (0.0, 0.0));
        assert_eq!((entity.pixel_x(), entity.pixel_y()), (-40, 13));
    }

    #[test]
    fn test_intended_move_accumulates_and_applies() {
        let mut entity = Entity::new(0.0, 0.0);
        entity.set_velocity(10.0, -4.0);
        entity.accumulate_intended_move(0.5);
        entity.accumulate_intended_move(0.5);
        assert_eq!(entity.intended_move_delta(), (10.0, -4.0));

        entity.apply_intended_move();
        assert_eq!((entity.x, entity.y), (10.0, -4.0));
        assert!(!entity.has_intended_move());
    }

    #[test]
    fn test_movement_commits_whole_pixels_and_carries_fraction() {
        let mut entity = Entity::new(0.0, 0.0);
        entity.set_velocity(10.0, -10.0);

        let mut positions = Vec::new();
        for _ in 0..4 {
            entity.accumulate_intended_move(0.25);
            entity.apply_intended_move();
            positions.push((entity.x, entity.y));
        }

        assert_eq!(positions, vec![(2.0, -2.0), (5.0, -5.0), (7.0, -7.0), (10.0, -10.0)]);
        assert!(!entity.has_intended_move());
    }
}
