//! ECS Systems module
//!
//! The system roster is closed: a scene runs some ordered selection of the
//! variants of [`SceneSystem`].

pub mod audio_system;
pub mod drawing_system;
pub mod keyboard_system;
pub mod mouse_overlap_system;
pub mod mouse_system;
pub mod movement_system;
pub mod overlap_system;
pub mod tween_system;

pub use audio_system::AudioSystem;
pub use drawing_system::DrawingSystem;
pub use keyboard_system::KeyboardSystem;
pub use mouse_overlap_system::MouseOverlapSystem;
pub use mouse_system::MouseSystem;
pub use movement_system::{resolve_aabb, Mover, MovementSystem, Resolution};
pub use overlap_system::OverlapSystem;
pub use tween_system::TweenSystem;

use super::System;

/// One system in a scene's update order
pub enum SceneSystem {
    /// Movement and collision resolution
    Movement(MovementSystem),
    /// Entity/entity overlap triggers
    Overlap(OverlapSystem),
    /// Cursor hover triggers
    MouseOverlap(MouseOverlapSystem),
    /// Action callbacks
    Keyboard(KeyboardSystem),
    /// Click callbacks
    Mouse(MouseSystem),
    /// Audio playback bridge
    Audio(AudioSystem),
    /// Drawing bridge
    Drawing(DrawingSystem),
    /// Position tweens
    Tween(TweenSystem),
}

impl SceneSystem {
    /// The variant as a [`System`]
    pub fn as_system_mut(&mut self) -> &mut dyn System {
        match self {
            Self::Movement(system) => system,
            Self::Overlap(system) => system,
            Self::MouseOverlap(system) => system,
            Self::Keyboard(system) => system,
            Self::Mouse(system) => system,
            Self::Audio(system) => system,
            Self::Drawing(system) => system,
            Self::Tween(system) => system,
        }
    }

    /// The drawing system, if this is one
    pub fn as_drawing_mut(&mut self) -> Option<&mut DrawingSystem> {
        match self {
            Self::Drawing(system) => Some(system),
            _ => None,
        }
    }

    /// Whether this is the drawing system
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing(_))
    }
}

macro_rules! scene_system_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for SceneSystem {
                fn from(system: $ty) -> Self {
                    Self::$variant(system)
                }
            }
        )*
    };
}

scene_system_from! {
    Movement => MovementSystem,
    Overlap => OverlapSystem,
    MouseOverlap => MouseOverlapSystem,
    Keyboard => KeyboardSystem,
    Mouse => MouseSystem,
    Audio => AudioSystem,
    Drawing => DrawingSystem,
    Tween => TweenSystem,
}
