//! Publish/subscribe event bus
//!
//! Key principles:
//! - Handlers register per [`Signal`]; only interested handlers are notified
//! - Dispatch is synchronous and in subscription order
//! - Dispatch iterates a snapshot, so handlers may subscribe, unsubscribe or
//!   broadcast again without disturbing the delivery in flight
//!
//! The bus is shared through `Rc<EventBus>` and passed explicitly to
//! whoever needs it. There is no process-wide "current bus".

use crate::error::{EngineError, EngineResult};
use crate::input::Action;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A bound action went down
    ActionPressed,
    /// A bound action went up
    ActionReleased,
    /// The mouse button was clicked
    MouseClicked,
    /// The mouse button was released
    MouseReleased,
    /// The host switched to another scene
    SceneChanged,
    /// Game-defined signal
    Custom(u32),
}

/// Payload carried by a broadcast
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// The action a key event refers to
    Action(Action),
    /// A position in scene pixels
    Position(i32, i32),
    /// Free-form text
    Text(String),
    /// Game-defined integer payload
    Value(i64),
}

impl EventData {
    /// The action, if this payload carries one
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Action(action) => Some(*action),
            _ => None,
        }
    }

    /// The position, if this payload carries one
    pub fn position(&self) -> Option<(i32, i32)> {
        match self {
            Self::Position(x, y) => Some((*x, *y)),
            _ => None,
        }
    }
}

/// Subscriber callback; identity is the `Rc` allocation
pub type EventCallback = Rc<dyn Fn(Option<&EventData>)>;

/// Signal-keyed publish/subscribe channel
#[derive(Default)]
pub struct EventBus {
    subscribers: RefCell<HashMap<Signal, Vec<EventCallback>>>,
}

impl EventBus {
    /// Create a new, empty bus
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Append `callback` to the subscribers of `signal`
    ///
    /// Subscribing the same callback twice delivers twice.
    pub fn subscribe(&self, signal: Signal, callback: EventCallback) {
        self.subscribers
            .borrow_mut()
            .entry(signal)
            .or_default()
            .push(callback);
    }

    /// Remove the first subscription of `callback` under `signal`
    ///
    /// Fails with [`EngineError::UnknownSignal`] if `signal` was never
    /// subscribed to, even if its list is empty now.
    pub fn unsubscribe(&self, signal: Signal, callback: &EventCallback) -> EngineResult<()> {
        let mut subscribers = self.subscribers.borrow_mut();
        let callbacks = subscribers
            .get_mut(&signal)
            .ok_or(EngineError::UnknownSignal(signal))?;

        if let Some(index) = callbacks.iter().position(|c| Rc::ptr_eq(c, callback)) {
            callbacks.remove(index);
        } else {
            log::warn!("Unsubscribe from {signal:?}: callback was not subscribed");
        }
        Ok(())
    }

    /// Deliver `data` to every subscriber of `signal`, in subscription order
    pub fn broadcast(&self, signal: Signal, data: Option<EventData>) {
        // Snapshot, then release the borrow before running any handler
        let snapshot: Vec<EventCallback> = match self.subscribers.borrow().get(&signal) {
            Some(callbacks) if !callbacks.is_empty() => callbacks.clone(),
            _ => return,
        };

        for callback in snapshot {
            callback(data.as_ref());
        }
    }

    /// Number of callbacks currently subscribed to `signal`
    pub fn subscriber_count(&self, signal: Signal) -> usize {
        self.subscribers.borrow().get(&signal).map_or(0, Vec::len)
    }

    /// Drop every subscription
    pub fn dispose(&self) {
        self.subscribers.borrow_mut().clear();
        log::debug!("Event bus disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, EventCallback) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let callback: EventCallback = Rc::new(move |_: Option<&EventData>| seen.set(seen.get() + 1));
        (count, callback)
    }

    #[test]
    fn test_broadcast_in_subscription_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let order = Rc::clone(&order);
            bus.subscribe(Signal::ActionPressed, Rc::new(move |data: Option<&EventData>| {
                assert_eq!(data.and_then(EventData::action), Some(Action::Confirm));
                order.borrow_mut().push(id);
            }));
        }

        bus.broadcast(Signal::ActionPressed, Some(EventData::Action(Action::Confirm)));
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_broadcast_without_subscribers_is_noop() {
        let bus = EventBus::new();
        bus.broadcast(Signal::MouseClicked, None);
        assert_eq!(bus.subscriber_count(Signal::MouseClicked), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let (count, callback) = counter();

        bus.subscribe(Signal::MouseClicked, Rc::clone(&callback));
        bus.broadcast(Signal::MouseClicked, None);
        bus.unsubscribe(Signal::MouseClicked, &callback).unwrap();
        bus.broadcast(Signal::MouseClicked, None);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe_removes_first_duplicate_only() {
        let bus = EventBus::new();
        let (count, callback) = counter();

        bus.subscribe(Signal::ActionReleased, Rc::clone(&callback));
        bus.subscribe(Signal::ActionReleased, Rc::clone(&callback));
        bus.unsubscribe(Signal::ActionReleased, &callback).unwrap();
        bus.broadcast(Signal::ActionReleased, None);

        assert_eq!(count.get(), 1);
        assert_eq!(bus.subscriber_count(Signal::ActionReleased), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_signal_fails() {
        let bus = EventBus::new();
        let (_, callback) = counter();
        let result = bus.unsubscribe(Signal::Custom(7), &callback);
        assert!(matches!(result, Err(EngineError::UnknownSignal(Signal::Custom(7)))));
    }

    #[test]
    fn test_unsubscribe_emptied_signal_is_still_known() {
        let bus = EventBus::new();
        let (_, callback) = counter();
        bus.subscribe(Signal::SceneChanged, Rc::clone(&callback));
        bus.unsubscribe(Signal::SceneChanged, &callback).unwrap();
        assert!(bus.unsubscribe(Signal::SceneChanged, &callback).is_ok());
    }

    #[test]
    fn test_handler_may_subscribe_during_dispatch() {
        let bus = EventBus::new();
        let (late_count, late) = counter();

        let inner_bus = Rc::clone(&bus);
        bus.subscribe(Signal::Custom(1), Rc::new(move |_: Option<&EventData>| {
            inner_bus.subscribe(Signal::Custom(1), Rc::clone(&late));
        }));

        // The late subscriber is not part of the first snapshot
        bus.broadcast(Signal::Custom(1), None);
        assert_eq!(late_count.get(), 0);

        bus.broadcast(Signal::Custom(1), None);
        assert_eq!(late_count.get(), 1);
    }

    #[test]
    fn test_handler_may_broadcast_recursively() {
        let bus = EventBus::new();
        let (count, callback) = counter();
        bus.subscribe(Signal::Custom(2), callback);

        let inner_bus = Rc::clone(&bus);
        bus.subscribe(Signal::Custom(1), Rc::new(move |_: Option<&EventData>| {
            inner_bus.broadcast(Signal::Custom(2), Some(EventData::Value(3)));
        }));

        bus.broadcast(Signal::Custom(1), None);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dispose_clears_everything() {
        let bus = EventBus::new();
        let (count, callback) = counter();
        bus.subscribe(Signal::ActionPressed, Rc::clone(&callback));
        bus.dispose();
        bus.broadcast(Signal::ActionPressed, None);
        assert_eq!(count.get(), 0);
        assert!(matches!(
            bus.unsubscribe(Signal::ActionPressed, &callback),
            Err(EngineError::UnknownSignal(_))
        ));
    }
}
