//! Movement and collision resolution
//!
//! Each frame the movement system:
//! 1. Steers four-way movers from the held actions
//! 2. Accumulates `velocity * elapsed` into every entity's intended delta
//! 3. Clamps the intended delta of collidable movers against solid tiles and
//!    other collidable entities, in two passes over the same delta
//! 4. Applies the delta to position and clears it
//!
//! The second pass catches residual overlap introduced when sliding restores
//! a delta that the first pass had clamped.
//!
//! Obstacles are treated as stationary while a mover is resolved against
//! them. Touching boxes do not collide.

use crate::ecs::components::{CollisionComponent, CollisionTarget, FourWayMovementComponent};
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use crate::physics::{Aabb, Axis};
use crate::tilemap::{TileMap, TileMapId};
use std::time::Duration;

const RESOLUTION_PASSES: usize = 2;

/// A collidable entity's state as seen by the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mover {
    /// Collision box at the current position
    pub bounds: Aabb,
    /// Velocity in pixels per second
    pub velocity: (f32, f32),
    /// Movement intended for this frame
    pub delta: (f32, f32),
    /// Whether the blocked mover may keep its delta on the free axis
    pub slide_on_collide: bool,
}

impl Mover {
    fn of(entity: &Entity) -> Option<Self> {
        let collision = entity.get::<CollisionComponent>()?;
        Some(Self {
            bounds: collision.bounds_at(entity.x, entity.y),
            velocity: (entity.velocity_x, entity.velocity_y),
            delta: entity.intended_move_delta(),
            slide_on_collide: collision.slide_on_collide,
        })
    }

    /// Point on the leading edge of the box after the intended move
    ///
    /// Moving right samples the right edge, moving left the left edge, and
    /// an axis without movement keeps the top-left corner.
    pub fn leading_point(&self) -> (f32, f32) {
        let (dx, dy) = self.delta;
        let x = if dx > 0.0 {
            self.bounds.right() + dx
        } else {
            self.bounds.x + dx
        };
        let y = if dy > 0.0 {
            self.bounds.bottom() + dy
        } else {
            self.bounds.y + dy
        };
        (x, y)
    }

    /// Tile map cell under [`Mover::leading_point`]
    ///
    /// Right and bottom edges are exclusive, so on a moving axis the cell
    /// holding the box's last pixel is used.
    pub fn leading_cell(&self, tilemap: &TileMap) -> (i32, i32) {
        let (px, py) = self.leading_point();
        let (column, row) = tilemap.tile_at(px, py);
        let (last_column, last_row) = tilemap.tile_ending_at(px, py);
        (
            if self.delta.0 > 0.0 { last_column } else { column },
            if self.delta.1 > 0.0 { last_row } else { row },
        )
    }
}

/// Clamped movement after hitting an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Allowed horizontal movement
    pub delta_x: f32,
    /// Allowed vertical movement
    pub delta_y: f32,
    /// The axis that constrained the move
    pub axis: Axis,
}

/// Clamp `mover`'s intended delta so it stops on contact with `obstacle`
///
/// Returns `None` when the move does not reach the obstacle.
pub fn resolve_aabb(mover: &Mover, obstacle: &Aabb) -> Option<Resolution> {
    let (delta_x, delta_y) = mover.delta;
    if delta_x == 0.0 && delta_y == 0.0 {
        return None;
    }
    if !mover.bounds.translated(delta_x, delta_y).overlaps(obstacle) {
        return None;
    }

    let (gap_x, gap_y) = mover.bounds.gap_to(obstacle);
    // A mover with no velocity travels along its delta
    let (velocity_x, velocity_y) = if mover.velocity == (0.0, 0.0) {
        mover.delta
    } else {
        mover.velocity
    };

    let resolution = match (velocity_x != 0.0, velocity_y != 0.0) {
        (true, false) => Resolution {
            delta_x: contact_delta(gap_x, velocity_x),
            delta_y,
            axis: Axis::X,
        },
        (false, true) => Resolution {
            delta_x,
            delta_y: contact_delta(gap_y, velocity_y),
            axis: Axis::Y,
        },
        _ => resolve_diagonal(mover, obstacle, (gap_x, gap_y), (velocity_x, velocity_y)),
    };
    Some(resolution)
}

fn resolve_diagonal(mover: &Mover, obstacle: &Aabb, gap: (f32, f32), velocity: (f32, f32)) -> Resolution {
    let (delta_x, delta_y) = mover.delta;

    // Only an axis the boxes do not already share can close
    let time_x = (!mover.bounds.overlaps_x(obstacle)).then(|| (gap.0 / velocity.0).abs());
    let time_y = (!mover.bounds.overlaps_y(obstacle)).then(|| (gap.1 / velocity.1).abs());

    let (shortest, axis) = match (time_x, time_y) {
        (Some(tx), Some(ty)) if ty < tx => (ty, Axis::Y),
        (Some(tx), _) => (tx, Axis::X),
        (None, Some(ty)) => (ty, Axis::Y),
        (None, None) => (0.0, Axis::X),
    };

    let clamped_x = if axis == Axis::X && time_x.is_some() {
        contact_delta(gap.0, velocity.0)
    } else {
        scaled_delta(shortest, velocity.0, delta_x)
    };
    let clamped_y = if axis == Axis::Y {
        contact_delta(gap.1, velocity.1)
    } else {
        scaled_delta(shortest, velocity.1, delta_y)
    };

    let mut resolution = Resolution {
        delta_x: clamped_x,
        delta_y: clamped_y,
        axis,
    };

    if mover.slide_on_collide {
        match axis {
            Axis::X => {
                if !mover.bounds.translated(clamped_x, delta_y).overlaps(obstacle) {
                    resolution.delta_y = delta_y;
                }
            }
            Axis::Y => {
                if !mover.bounds.translated(delta_x, clamped_y).overlaps(obstacle) {
                    resolution.delta_x = delta_x;
                }
            }
        }
    }

    resolution
}

/// Movement on one axis up to contact; exactly the gap when closing it
fn contact_delta(gap: f32, velocity: f32) -> f32 {
    if gap * velocity > 0.0 {
        gap
    } else {
        (gap / velocity).abs() * velocity
    }
}

/// Movement on one axis after `time` seconds, never longer than `current`
fn scaled_delta(time: f32, velocity: f32, current: f32) -> f32 {
    let delta = time * velocity;
    if delta.abs() > current.abs() {
        current
    } else {
        delta
    }
}

/// Moves entities and resolves collisions
#[derive(Debug, Default)]
pub struct MovementSystem {
    entities: Vec<EntityId>,
}

impl MovementSystem {
    /// Create a movement system
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of tracked entities
    pub fn tracked(&self) -> &[EntityId] {
        &self.entities
    }

    fn process_movement(&self, world: &mut World) {
        let collidable: Vec<EntityId> = self
            .entities
            .iter()
            .copied()
            .filter(|&id| world.entity(id).is_some_and(Entity::has::<CollisionComponent>))
            .collect();
        let tilemaps = world.tilemap_ids().to_vec();

        for &id in &collidable {
            if !world.entity(id).is_some_and(Entity::has_intended_move) {
                continue;
            }

            for &tilemap in &tilemaps {
                Self::resolve_against_tilemap(world, id, tilemap);
            }

            for &other in &collidable {
                if other != id {
                    Self::resolve_against_entity(world, id, other);
                }
            }
        }
    }

    fn resolve_against_tilemap(world: &mut World, id: EntityId, tilemap_id: TileMapId) {
        let Some(mover) = world.entity(id).and_then(Mover::of) else {
            return;
        };
        let Some(tilemap) = world.tilemap(tilemap_id) else {
            return;
        };

        let (column, row) = mover.leading_cell(tilemap);
        let Some(tile) = tilemap.solid_box_at(column, row) else {
            return;
        };
        let Some(resolution) = resolve_aabb(&mover, &tile) else {
            return;
        };

        log::trace!("{id:?} hit tile ({column}, {row}) on {}", resolution.axis);
        let target = CollisionTarget::Tile {
            tilemap: tilemap_id,
            column,
            row,
        };
        if let Some(entity) = world.entity_mut(id) {
            apply_resolution(entity, &resolution, target);
        }
    }

    fn resolve_against_entity(world: &mut World, id: EntityId, other: EntityId) {
        let Some(mover) = world.entity(id).and_then(Mover::of) else {
            return;
        };
        let Some(obstacle) = world.entity(other).and_then(Mover::of) else {
            return;
        };
        let Some(resolution) = resolve_aabb(&mover, &obstacle.bounds) else {
            return;
        };

        log::trace!("{id:?} hit {other:?} on {}", resolution.axis);
        if let Some(entity) = world.entity_mut(id) {
            apply_resolution(entity, &resolution, CollisionTarget::Entity(other));
        }
        if let Some(entity) = world.entity_mut(other) {
            notify_collision(entity, CollisionTarget::Entity(id), resolution.axis);
        }
    }
}

fn apply_resolution(entity: &mut Entity, resolution: &Resolution, target: CollisionTarget) {
    entity.set_intended_move_delta(resolution.delta_x, resolution.delta_y);
    notify_collision(entity, target, resolution.axis);
}

fn notify_collision(entity: &mut Entity, target: CollisionTarget, axis: Axis) {
    let callback = entity
        .get::<CollisionComponent>()
        .and_then(CollisionComponent::on_collide);
    if let Some(callback) = callback {
        callback(entity, target, axis);
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn on_add_entity(&mut self, id: EntityId, _entity: &Entity) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|&other| other != id);
    }

    fn on_update(&mut self, world: &mut World, frame: &FrameContext<'_>, elapsed: Duration) {
        let seconds = elapsed.as_secs_f32();

        // Step 1: steer and accumulate
        for &id in &self.entities {
            let Some(entity) = world.entity_mut(id) else {
                continue;
            };
            let steering = entity
                .get::<FourWayMovementComponent>()
                .map(|movement| movement.velocity_from(frame.keyboard));
            if let Some((velocity_x, velocity_y)) = steering {
                entity.set_velocity(velocity_x, velocity_y);
            }
            if entity.velocity_x != 0.0 || entity.velocity_y != 0.0 {
                entity.accumulate_intended_move(seconds);
            }
        }

        // Step 2: resolve collisions against the accumulated delta
        for _ in 0..RESOLUTION_PASSES {
            self.process_movement(world);
        }

        // Step 3: commit
        for &id in &self.entities {
            if let Some(entity) = world.entity_mut(id) {
                entity.apply_intended_move();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Action, KeyboardProvider, NoInput};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Hits = Rc<RefCell<Vec<(CollisionTarget, Axis)>>>;

    fn recording_box(width: f32, height: f32, hits: &Hits) -> CollisionComponent {
        let hits = Rc::clone(hits);
        CollisionComponent::new(width, height)
            .unwrap()
            .with_on_collide(move |_: &mut Entity, target: CollisionTarget, axis: Axis| {
                hits.borrow_mut().push((target, axis));
            })
    }

    fn add(world: &mut World, system: &mut MovementSystem, entity: Entity) -> EntityId {
        let id = world.insert(entity);
        if let Some(entity) = world.entity(id) {
            system.on_add_entity(id, entity);
        }
        id
    }

    fn step(system: &mut MovementSystem, world: &mut World, keyboard: &dyn KeyboardProvider, seconds: f32) {
        let frame = FrameContext {
            keyboard,
            mouse: &NoInput,
        };
        system.on_update(world, &frame, Duration::from_secs_f32(seconds));
    }

    fn moving(x: f32, y: f32, velocity: (f32, f32), collision: CollisionComponent) -> Entity {
        let mut entity = Entity::new(x, y).with(collision);
        entity.set_velocity(velocity.0, velocity.1);
        entity
    }

    #[test]
    fn test_zero_velocity_never_moves() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let id = add(&mut world, &mut system, Entity::new(7.0, -3.0));

        for seconds in [0.0, 0.016, 1.0, 30.0] {
            step(&mut system, &mut world, &NoInput, seconds);
        }
        let entity = world.entity(id).unwrap();
        assert_eq!((entity.x, entity.y), (7.0, -3.0));
    }

    #[test]
    fn test_free_travel_without_obstacle_in_path() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let mover = add(&mut world, &mut system, moving(0.0, 0.0, (50.0, 0.0), CollisionComponent::new(32.0, 32.0).unwrap()));
        add(&mut world, &mut system, Entity::new(200.0, 0.0).with(CollisionComponent::new(32.0, 32.0).unwrap()));

        step(&mut system, &mut world, &NoInput, 1.0);
        assert_eq!(world.entity(mover).unwrap().x, 50.0);
        assert_eq!(world.entity(mover).unwrap().intended_move_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_lands_exactly_on_obstacle_edge() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let mover_hits = Hits::default();
        let wall_hits = Hits::default();

        let mover = add(&mut world, &mut system, moving(0.0, 0.0, (16.0, 0.0), recording_box(32.0, 32.0, &mover_hits)));
        let wall = add(&mut world, &mut system, Entity::new(40.0, 0.0).with(recording_box(32.0, 32.0, &wall_hits)));

        step(&mut system, &mut world, &NoInput, 1.0);

        let entity = world.entity(mover).unwrap();
        assert_eq!(entity.x + 32.0, 40.0);
        assert_eq!(*mover_hits.borrow(), vec![(CollisionTarget::Entity(wall), Axis::X)]);
        assert_eq!(*wall_hits.borrow(), vec![(CollisionTarget::Entity(mover), Axis::X)]);
    }

    #[test]
    fn test_blocked_when_already_touching() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let hits = Hits::default();

        let mover = add(&mut world, &mut system, moving(100.0, 100.0, (100.0, 0.0), recording_box(32.0, 32.0, &hits)));
        let wall = add(&mut world, &mut system, Entity::new(132.0, 100.0).with(CollisionComponent::new(32.0, 32.0).unwrap()));

        step(&mut system, &mut world, &NoInput, 1.0);

        assert_eq!(world.entity(mover).unwrap().x, 100.0);
        assert_eq!(*hits.borrow(), vec![(CollisionTarget::Entity(wall), Axis::X)]);
    }

    #[test]
    fn test_corner_tie_resolves_to_x() {
        let mover = Mover {
            bounds: Aabb::new(0.0, 0.0, 10.0, 10.0),
            velocity: (10.0, 10.0),
            delta: (10.0, 10.0),
            slide_on_collide: false,
        };
        let corner = Aabb::new(15.0, 15.0, 10.0, 10.0);

        let resolution = resolve_aabb(&mover, &corner).unwrap();
        assert_eq!(resolution.axis, Axis::X);
        assert_eq!((resolution.delta_x, resolution.delta_y), (5.0, 5.0));
    }

    #[test]
    fn test_shorter_time_picks_primary_axis() {
        let mover = Mover {
            bounds: Aabb::new(0.0, 0.0, 10.0, 10.0),
            velocity: (10.0, 10.0),
            delta: (10.0, 10.0),
            slide_on_collide: false,
        };
        let obstacle = Aabb::new(18.0, 12.0, 10.0, 10.0);

        let resolution = resolve_aabb(&mover, &obstacle).unwrap();
        assert_eq!(resolution.axis, Axis::Y);
        assert_eq!((resolution.delta_x, resolution.delta_y), (2.0, 2.0));
    }

    #[test]
    fn test_slide_along_wall_keeps_free_axis() {
        let wall = Aabb::new(15.0, -100.0, 10.0, 300.0);
        let mut mover = Mover {
            bounds: Aabb::new(0.0, 0.0, 10.0, 10.0),
            velocity: (10.0, 10.0),
            delta: (10.0, 10.0),
            slide_on_collide: false,
        };

        let stuck = resolve_aabb(&mover, &wall).unwrap();
        assert_eq!((stuck.delta_x, stuck.delta_y, stuck.axis), (5.0, 5.0, Axis::X));

        mover.slide_on_collide = true;
        let slid = resolve_aabb(&mover, &wall).unwrap();
        assert_eq!((slid.delta_x, slid.delta_y, slid.axis), (5.0, 10.0, Axis::X));
    }

    #[test]
    fn test_slide_moves_along_wall_in_same_update() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let collision = CollisionComponent::new(10.0, 10.0).unwrap().with_slide_on_collide(true);
        let mover = add(&mut world, &mut system, moving(0.0, 0.0, (10.0, 10.0), collision));
        add(&mut world, &mut system, Entity::new(15.0, -100.0).with(CollisionComponent::new(10.0, 300.0).unwrap()));

        step(&mut system, &mut world, &NoInput, 1.0);

        let entity = world.entity(mover).unwrap();
        assert_eq!((entity.x, entity.y), (5.0, 10.0));
    }

    #[test]
    fn test_no_delta_means_no_test() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let hits = Hits::default();
        add(&mut world, &mut system, Entity::new(0.0, 0.0).with(recording_box(32.0, 32.0, &hits)));
        add(&mut world, &mut system, Entity::new(10.0, 10.0).with(recording_box(32.0, 32.0, &hits)));

        step(&mut system, &mut world, &NoInput, 1.0);
        assert!(hits.borrow().is_empty());
    }

    #[test]
    fn test_solid_tile_blocks_leading_edge() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let hits = Hits::default();

        let mut map = TileMap::new(4, 1, "tiles.png", 16, 16).unwrap();
        map.define("rock", 0, 0, true);
        map.set(2, 0, "rock").unwrap();
        let tilemap = world.insert_tilemap(map);

        let mover = add(&mut world, &mut system, moving(0.0, 0.0, (20.0, 0.0), recording_box(16.0, 16.0, &hits)));
        step(&mut system, &mut world, &NoInput, 1.0);

        assert_eq!(world.entity(mover).unwrap().x, 16.0);
        assert_eq!(
            *hits.borrow(),
            vec![(CollisionTarget::Tile { tilemap, column: 2, row: 0 }, Axis::X)]
        );
    }

    fn room(wall_column: Option<i32>, floor_row: Option<i32>) -> TileMap {
        let mut map = TileMap::new(20, 15, "tiles.png", 16, 16).unwrap();
        map.define("wall", 1, 0, true);
        for row in 0..15 {
            if let Some(column) = wall_column {
                map.set(column, row, "wall").unwrap();
            }
        }
        for column in 0..20 {
            if let Some(row) = floor_row {
                map.set(column, row, "wall").unwrap();
            }
        }
        map
    }

    fn assert_clear_of_solid_tiles(world: &World, id: EntityId, tilemap: TileMapId) {
        let entity = world.entity(id).unwrap();
        let bounds = entity.get::<CollisionComponent>().unwrap().bounds_at(entity.x, entity.y);
        let map = world.tilemap(tilemap).unwrap();
        for (column, row, _, definition) in map.tiles() {
            if definition.is_some_and(|d| d.is_solid) {
                assert!(
                    !bounds.overlaps(&map.cell_bounds(column, row)),
                    "{bounds:?} overlaps solid tile ({column}, {row})"
                );
            }
        }
    }

    #[test]
    fn test_leading_cell_uses_last_pixel_on_positive_axes() {
        let map = TileMap::new(8, 8, "tiles.png", 16, 16).unwrap();
        let falling = Mover {
            bounds: Aabb::new(28.0, 12.0, 16.0, 16.0),
            velocity: (4.0, 4.0),
            delta: (4.0, 4.0),
            slide_on_collide: false,
        };
        assert_eq!(falling.leading_point(), (48.0, 32.0));
        assert_eq!(falling.leading_cell(&map), (2, 1));

        let retreating = Mover {
            bounds: Aabb::new(32.0, 32.0, 16.0, 16.0),
            velocity: (-4.0, 0.0),
            delta: (-4.0, 0.0),
            slide_on_collide: false,
        };
        assert_eq!(retreating.leading_cell(&map), (1, 2));
    }

    #[test]
    fn test_diagonal_mover_slides_down_tile_wall() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let hits = Hits::default();
        let tilemap = world.insert_tilemap(room(Some(19), None));

        let collision = recording_box(16.0, 16.0, &hits).with_slide_on_collide(true);
        let mover = add(&mut world, &mut system, moving(270.0, 20.0, (4.0, 4.0), collision));

        for frame in 1..=20 {
            step(&mut system, &mut world, &NoInput, 1.0);
            assert_clear_of_solid_tiles(&world, mover, tilemap);
            let entity = world.entity(mover).unwrap();
            assert!(entity.x <= 288.0);
            assert_eq!(entity.y, 20.0 + 4.0 * frame as f32);
        }

        let entity = world.entity(mover).unwrap();
        assert_eq!((entity.x, entity.y), (288.0, 100.0));
        assert!(hits
            .borrow()
            .iter()
            .all(|&(target, axis)| axis == Axis::X
                && matches!(target, CollisionTarget::Tile { column: 19, .. })));
        assert!(!hits.borrow().is_empty());
    }

    #[test]
    fn test_mover_settles_flush_in_map_corner() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let tilemap = world.insert_tilemap(room(Some(19), Some(14)));

        let collision = CollisionComponent::new(16.0, 16.0).unwrap().with_slide_on_collide(true);
        let mover = add(&mut world, &mut system, moving(250.0, 170.0, (4.0, 4.0), collision));

        for _ in 0..20 {
            step(&mut system, &mut world, &NoInput, 1.0);
            assert_clear_of_solid_tiles(&world, mover, tilemap);
        }

        let entity = world.entity(mover).unwrap();
        assert_eq!((entity.x, entity.y), (288.0, 208.0));
    }

    #[test]
    fn test_non_solid_tiles_are_ignored() {
        let mut world = World::new();
        let mut system = MovementSystem::new();

        let mut map = TileMap::new(4, 1, "tiles.png", 16, 16).unwrap();
        map.define("grass", 0, 0, false);
        map.fill("grass").unwrap();
        world.insert_tilemap(map);

        let mover = add(&mut world, &mut system, moving(0.0, 0.0, (20.0, 0.0), CollisionComponent::new(16.0, 16.0).unwrap()));
        step(&mut system, &mut world, &NoInput, 1.0);
        assert_eq!(world.entity(mover).unwrap().x, 20.0);
    }

    struct Held(Action);

    impl KeyboardProvider for Held {
        fn is_action_down(&self, action: Action) -> bool {
            action == self.0
        }

        fn update(&mut self) {}
    }

    #[test]
    fn test_four_way_movement_steers_from_keyboard() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let player = Entity::new(0.0, 0.0).with(FourWayMovementComponent::new(50.0).unwrap());
        let id = add(&mut world, &mut system, player);

        step(&mut system, &mut world, &Held(Action::Down), 0.5);
        let entity = world.entity(id).unwrap();
        assert_eq!((entity.x, entity.y), (0.0, 25.0));
        assert_eq!(entity.velocity_y, 50.0);

        step(&mut system, &mut world, &NoInput, 0.5);
        assert_eq!(world.entity(id).unwrap().y, 25.0);
    }

    #[test]
    fn test_removed_entity_is_forgotten() {
        let mut world = World::new();
        let mut system = MovementSystem::new();
        let id = add(&mut world, &mut system, moving(0.0, 0.0, (1.0, 0.0), CollisionComponent::new(1.0, 1.0).unwrap()));

        system.on_remove_entity(id);
        assert!(system.tracked().is_empty());
        step(&mut system, &mut world, &NoInput, 1.0);
        assert_eq!(world.entity(id).unwrap().x, 0.0);
    }
}
