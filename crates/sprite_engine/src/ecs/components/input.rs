//! Keyboard and mouse callback components

use crate::ecs::Entity;
use crate::error::{EngineError, EngineResult};
use crate::input::Action;
use crate::physics::Aabb;
use std::fmt;
use std::rc::Rc;

/// Callback receiving the action that changed state
pub type ActionCallback = Rc<dyn Fn(&mut Entity, Action)>;

/// Callback receiving the click position in scene pixels
pub type ClickCallback = Rc<dyn Fn(&mut Entity, i32, i32)>;

/// Action pressed/released callbacks
#[derive(Clone, Default)]
pub struct KeyboardComponent {
    on_action_pressed: Option<ActionCallback>,
    on_action_released: Option<ActionCallback>,
}

impl KeyboardComponent {
    /// Create a component with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback for `ActionPressed`
    #[must_use]
    pub fn with_on_action_pressed(mut self, callback: impl Fn(&mut Entity, Action) + 'static) -> Self {
        self.on_action_pressed = Some(Rc::new(callback));
        self
    }

    /// Set the callback for `ActionReleased`
    #[must_use]
    pub fn with_on_action_released(mut self, callback: impl Fn(&mut Entity, Action) + 'static) -> Self {
        self.on_action_released = Some(Rc::new(callback));
        self
    }

    /// The pressed callback, if any
    pub fn on_action_pressed(&self) -> Option<ActionCallback> {
        self.on_action_pressed.clone()
    }

    /// The released callback, if any
    pub fn on_action_released(&self) -> Option<ActionCallback> {
        self.on_action_released.clone()
    }
}

impl fmt::Debug for KeyboardComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardComponent")
            .field("on_action_pressed", &self.on_action_pressed.is_some())
            .field("on_action_released", &self.on_action_released.is_some())
            .finish()
    }
}

/// Clickable area anchored at the entity position
#[derive(Clone)]
pub struct MouseComponent {
    /// Clickable width in pixels
    pub width: f32,
    /// Clickable height in pixels
    pub height: f32,
    on_click: Option<ClickCallback>,
}

impl MouseComponent {
    /// Create a clickable area; sizes must be non-negative and finite
    pub fn new(width: f32, height: f32) -> EngineResult<Self> {
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(EngineError::invalid_argument(format!(
                "clickable area must have a non-negative size, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            on_click: None,
        })
    }

    /// Set the click callback
    #[must_use]
    pub fn with_on_click(mut self, callback: impl Fn(&mut Entity, i32, i32) + 'static) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }

    /// The click callback, if any
    pub fn on_click(&self) -> Option<ClickCallback> {
        self.on_click.clone()
    }

    /// Clickable area for an entity at `(x, y)`
    pub fn bounds_at(&self, x: f32, y: f32) -> Aabb {
        Aabb::new(x, y, self.width, self.height)
    }
}

impl fmt::Debug for MouseComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseComponent")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}
