//! ECS Components module
//!
//! The closed set of components an entity can carry.

pub mod audio;
pub mod collision;
pub mod drawable;
pub mod input;
pub mod movement;
pub mod overlap;
pub mod tween;

pub use audio::AudioComponent;
pub use collision::{CollideCallback, CollisionComponent, CollisionTarget};
pub use drawable::{ColourBlockComponent, SpriteComponent, TextLabelComponent};
pub use input::{ActionCallback, ClickCallback, KeyboardComponent, MouseComponent};
pub use movement::{DirectionBindings, FourWayMovementComponent};
pub use overlap::{HoverCallback, OverlapCallback, OverlapComponent};
pub use tween::{TweenCallback, TweenComponent};
