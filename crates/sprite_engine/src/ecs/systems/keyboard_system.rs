//! Action pressed/released dispatch
//!
//! Subscribes to `ActionPressed` and `ActionReleased` when constructed.
//! Broadcasts are queued and delivered to tracked entities at the start of
//! the system's next update, when the world is available. Entities removed
//! in between receive nothing.

use crate::ecs::components::{ActionCallback, FourWayMovementComponent, KeyboardComponent};
use crate::ecs::{Entity, EntityId, FrameContext, System, World};
use crate::events::{EventBus, EventCallback, EventData, Signal};
use crate::input::Action;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

type Inbox = Rc<RefCell<Vec<(Signal, Action)>>>;

/// Delivers action events to keyboard and four-way movement components
pub struct KeyboardSystem {
    bus: Rc<EventBus>,
    entities: Vec<EntityId>,
    inbox: Inbox,
    subscriptions: Vec<(Signal, EventCallback)>,
}

impl KeyboardSystem {
    /// Create the system and subscribe it to `bus`
    pub fn new(bus: Rc<EventBus>) -> Self {
        let inbox = Inbox::default();
        let subscriptions: Vec<(Signal, EventCallback)> = [Signal::ActionPressed, Signal::ActionReleased]
            .into_iter()
            .map(|signal| {
                let inbox = Rc::clone(&inbox);
                let callback: EventCallback = Rc::new(move |data: Option<&EventData>| {
                    match data.and_then(EventData::action) {
                        Some(action) => inbox.borrow_mut().push((signal, action)),
                        None => log::warn!("{signal:?} broadcast without an action"),
                    }
                });
                bus.subscribe(signal, Rc::clone(&callback));
                (signal, callback)
            })
            .collect();

        Self {
            bus,
            entities: Vec::new(),
            inbox,
            subscriptions,
        }
    }

    /// Ids of tracked entities
    pub fn tracked(&self) -> &[EntityId] {
        &self.entities
    }

    fn callbacks_for(entity: &Entity, signal: Signal) -> Vec<ActionCallback> {
        let pick = |keyboard: &KeyboardComponent| match signal {
            Signal::ActionPressed => keyboard.on_action_pressed(),
            _ => keyboard.on_action_released(),
        };

        entity
            .get::<KeyboardComponent>()
            .and_then(pick)
            .into_iter()
            .chain(
                entity
                    .get::<FourWayMovementComponent>()
                    .and_then(|movement| pick(&movement.keyboard)),
            )
            .collect()
    }
}

impl System for KeyboardSystem {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn on_add_entity(&mut self, id: EntityId, entity: &Entity) {
        let listens = entity.has::<KeyboardComponent>() || entity.has::<FourWayMovementComponent>();
        if listens && !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    fn on_remove_entity(&mut self, id: EntityId) {
        self.entities.retain(|&other| other != id);
    }

    fn on_update(&mut self, world: &mut World, _frame: &FrameContext<'_>, _elapsed: Duration) {
        let events = std::mem::take(&mut *self.inbox.borrow_mut());

        for (signal, action) in events {
            for &id in &self.entities {
                let Some(entity) = world.entity_mut(id) else {
                    continue;
                };
                for callback in Self::callbacks_for(entity, signal) {
                    callback(entity, action);
                }
            }
        }
    }
}

impl Drop for KeyboardSystem {
    fn drop(&mut self) {
        for (signal, callback) in &self.subscriptions {
            if let Err(err) = self.bus.unsubscribe(*signal, callback) {
                log::debug!("Keyboard system unsubscribe skipped: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::NoInput;

    fn step(system: &mut KeyboardSystem, world: &mut World) {
        let frame = FrameContext {
            keyboard: &NoInput,
            mouse: &NoInput,
        };
        system.on_update(world, &frame, Duration::ZERO);
    }

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> impl Fn(&mut Entity, Action) + 'static {
        let log = Rc::clone(log);
        move |_: &mut Entity, action: Action| log.borrow_mut().push(format!("{tag}:{action:?}"))
    }

    #[test]
    fn test_pressed_and_released_reach_entities() {
        let bus = EventBus::new();
        let mut system = KeyboardSystem::new(Rc::clone(&bus));
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let keyboard = KeyboardComponent::new()
            .with_on_action_pressed(recorder(&log, "down"))
            .with_on_action_released(recorder(&log, "up"));
        let id = world.insert(Entity::new(0.0, 0.0).with(keyboard));
        system.on_add_entity(id, world.entity(id).unwrap());

        bus.broadcast(Signal::ActionPressed, Some(EventData::Action(Action::Confirm)));
        bus.broadcast(Signal::ActionReleased, Some(EventData::Action(Action::Confirm)));
        assert!(log.borrow().is_empty());

        step(&mut system, &mut world);
        assert_eq!(*log.borrow(), vec!["down:Confirm", "up:Confirm"]);

        step(&mut system, &mut world);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_missing_callback_is_skipped() {
        let bus = EventBus::new();
        let mut system = KeyboardSystem::new(Rc::clone(&bus));
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let silent = world.insert(Entity::new(0.0, 0.0).with(KeyboardComponent::new()));
        let loud = world.insert(
            Entity::new(0.0, 0.0).with(KeyboardComponent::new().with_on_action_released(recorder(&log, "up"))),
        );
        system.on_add_entity(silent, world.entity(silent).unwrap());
        system.on_add_entity(loud, world.entity(loud).unwrap());

        bus.broadcast(Signal::ActionPressed, Some(EventData::Action(Action::Up)));
        bus.broadcast(Signal::ActionReleased, Some(EventData::Action(Action::Up)));
        step(&mut system, &mut world);

        assert_eq!(*log.borrow(), vec!["up:Up"]);
    }

    #[test]
    fn test_four_way_movement_receives_actions() {
        let bus = EventBus::new();
        let mut system = KeyboardSystem::new(Rc::clone(&bus));
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let movement = FourWayMovementComponent::new(10.0)
            .unwrap()
            .with_keyboard(KeyboardComponent::new().with_on_action_pressed(recorder(&log, "move")));
        let id = world.insert(Entity::new(0.0, 0.0).with(movement));
        system.on_add_entity(id, world.entity(id).unwrap());

        bus.broadcast(Signal::ActionPressed, Some(EventData::Action(Action::Left)));
        step(&mut system, &mut world);
        assert_eq!(*log.borrow(), vec!["move:Left"]);
    }

    #[test]
    fn test_removed_entity_gets_no_stale_events() {
        let bus = EventBus::new();
        let mut system = KeyboardSystem::new(Rc::clone(&bus));
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let id = world.insert(
            Entity::new(0.0, 0.0).with(KeyboardComponent::new().with_on_action_pressed(recorder(&log, "down"))),
        );
        system.on_add_entity(id, world.entity(id).unwrap());

        bus.broadcast(Signal::ActionPressed, Some(EventData::Action(Action::Cancel)));
        system.on_remove_entity(id);
        step(&mut system, &mut world);

        assert!(log.borrow().is_empty());
        assert!(system.tracked().is_empty());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        let system = KeyboardSystem::new(Rc::clone(&bus));
        assert_eq!(bus.subscriber_count(Signal::ActionPressed), 1);
        assert_eq!(bus.subscriber_count(Signal::ActionReleased), 1);

        drop(system);
        assert_eq!(bus.subscriber_count(Signal::ActionPressed), 0);
        assert_eq!(bus.subscriber_count(Signal::ActionReleased), 0);
    }
}
