//! Overlap component: a non-blocking trigger area
//!
//! The overlap system compares these boxes pairwise every frame and the
//! mouse overlap system compares them with the cursor. Both report only
//! transitions, so callbacks fire once per enter and once per exit.

use crate::ecs::{Entity, EntityId};
use crate::error::{EngineError, EngineResult};
use crate::physics::Aabb;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Callback receiving the other entity of an overlap transition
pub type OverlapCallback = Rc<dyn Fn(&mut Entity, EntityId)>;

/// Callback for cursor enter/exit transitions
pub type HoverCallback = Rc<dyn Fn(&mut Entity)>;

/// Trigger area
#[derive(Clone)]
pub struct OverlapComponent {
    /// Area width in pixels
    pub width: f32,
    /// Area height in pixels
    pub height: f32,
    /// Horizontal offset from the entity position
    pub x_offset: f32,
    /// Vertical offset from the entity position
    pub y_offset: f32,
    overlapping: HashSet<EntityId>,
    on_start_overlap: Option<OverlapCallback>,
    on_stop_overlap: Option<OverlapCallback>,
    on_mouse_enter: Option<HoverCallback>,
    on_mouse_exit: Option<HoverCallback>,
}

impl OverlapComponent {
    /// Create a trigger area; sizes must be positive and finite
    pub fn new(width: f32, height: f32) -> EngineResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EngineError::invalid_argument(format!(
                "overlap area must have a positive size, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            x_offset: 0.0,
            y_offset: 0.0,
            overlapping: HashSet::new(),
            on_start_overlap: None,
            on_stop_overlap: None,
            on_mouse_enter: None,
            on_mouse_exit: None,
        })
    }

    /// Offset the area from the entity position
    #[must_use]
    pub fn with_offset(mut self, x_offset: f32, y_offset: f32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Set the callback for a new overlap
    #[must_use]
    pub fn with_on_start_overlap(mut self, callback: impl Fn(&mut Entity, EntityId) + 'static) -> Self {
        self.on_start_overlap = Some(Rc::new(callback));
        self
    }

    /// Set the callback for an ended overlap
    #[must_use]
    pub fn with_on_stop_overlap(mut self, callback: impl Fn(&mut Entity, EntityId) + 'static) -> Self {
        self.on_stop_overlap = Some(Rc::new(callback));
        self
    }

    /// Set the callback for the cursor entering the area
    #[must_use]
    pub fn with_on_mouse_enter(mut self, callback: impl Fn(&mut Entity) + 'static) -> Self {
        self.on_mouse_enter = Some(Rc::new(callback));
        self
    }

    /// Set the callback for the cursor leaving the area
    #[must_use]
    pub fn with_on_mouse_exit(mut self, callback: impl Fn(&mut Entity) + 'static) -> Self {
        self.on_mouse_exit = Some(Rc::new(callback));
        self
    }

    /// The area in scene space for an entity at `(x, y)`
    pub fn bounds_at(&self, x: f32, y: f32) -> Aabb {
        Aabb::new(x + self.x_offset, y + self.y_offset, self.width, self.height)
    }

    /// Whether an overlap with `target` is currently recorded
    pub fn is_overlapping_with(&self, target: EntityId) -> bool {
        self.overlapping.contains(&target)
    }

    /// Entities currently overlapping this area
    pub fn overlapping(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.overlapping.iter().copied()
    }

    /// Record an overlap with `target`
    ///
    /// Returns the start callback to invoke, or `None` if the overlap was
    /// already recorded or no callback is set.
    pub fn started_overlapping(&mut self, target: EntityId) -> Option<OverlapCallback> {
        if self.overlapping.insert(target) {
            self.on_start_overlap.clone()
        } else {
            None
        }
    }

    /// Forget an overlap with `target`
    ///
    /// Returns the stop callback to invoke, or `None` if no overlap was
    /// recorded or no callback is set.
    pub fn stopped_overlapping(&mut self, target: EntityId) -> Option<OverlapCallback> {
        if self.overlapping.remove(&target) {
            self.on_stop_overlap.clone()
        } else {
            None
        }
    }

    /// Drop `target` from the recorded set without notifying
    pub(crate) fn forget(&mut self, target: EntityId) {
        self.overlapping.remove(&target);
    }

    /// The cursor enter callback, if any
    pub fn on_mouse_enter(&self) -> Option<HoverCallback> {
        self.on_mouse_enter.clone()
    }

    /// The cursor exit callback, if any
    pub fn on_mouse_exit(&self) -> Option<HoverCallback> {
        self.on_mouse_exit.clone()
    }
}

impl fmt::Debug for OverlapComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlapComponent")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("x_offset", &self.x_offset)
            .field("y_offset", &self.y_offset)
            .field("overlapping", &self.overlapping)
            .finish_non_exhaustive()
    }
}
