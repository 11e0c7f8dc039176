//! Input abstractions
//!
//! Device polling is owned by the host. The core only sees logical
//! [`Action`]s and the two provider traits below.

use serde::{Deserialize, Serialize};

/// Logical game actions keys are bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move or navigate up
    Up,
    /// Move or navigate down
    Down,
    /// Move or navigate left
    Left,
    /// Move or navigate right
    Right,
    /// Confirm / interact
    Confirm,
    /// Cancel / back
    Cancel,
    /// Game-defined action
    Custom(u32),
}

/// Keyboard state provider implemented by the host
pub trait KeyboardProvider {
    /// Whether the key(s) bound to `action` are currently held
    fn is_action_down(&self, action: Action) -> bool;

    /// Poll the device; broadcast `ActionPressed`/`ActionReleased` for
    /// state changes since the previous call
    fn update(&mut self);
}

/// Mouse state provider implemented by the host
pub trait MouseProvider {
    /// Cursor position in scene pixels
    fn mouse_coordinates(&self) -> (i32, i32);

    /// Poll the device; broadcast `MouseClicked` on a new click
    fn update(&mut self);
}

/// Provider that never reports input, for scenes without a device
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl KeyboardProvider for NoInput {
    fn is_action_down(&self, _action: Action) -> bool {
        false
    }

    fn update(&mut self) {}
}

impl MouseProvider for NoInput {
    fn mouse_coordinates(&self) -> (i32, i32) {
        (0, 0)
    }

    fn update(&mut self) {}
}
