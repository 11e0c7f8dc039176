//! Four-way movement component
//!
//! Maps held actions to a velocity every frame. Each axis is driven
//! independently, so holding two directions moves diagonally at `speed`
//! on both axes. Opposite directions held together cancel out.

use super::input::KeyboardComponent;
use crate::error::{EngineError, EngineResult};
use crate::input::{Action, KeyboardProvider};

/// Actions that drive each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionBindings {
    /// Action moving up
    pub up: Action,
    /// Action moving down
    pub down: Action,
    /// Action moving left
    pub left: Action,
    /// Action moving right
    pub right: Action,
}

impl Default for DirectionBindings {
    fn default() -> Self {
        Self {
            up: Action::Up,
            down: Action::Down,
            left: Action::Left,
            right: Action::Right,
        }
    }
}

/// Action-driven movement at a fixed speed
#[derive(Debug, Clone)]
pub struct FourWayMovementComponent {
    /// Speed in pixels per second along each axis
    pub speed: f32,
    /// Which actions steer the entity
    pub bindings: DirectionBindings,
    /// Extra pressed/released callbacks delivered alongside movement
    pub keyboard: KeyboardComponent,
}

impl FourWayMovementComponent {
    /// Create a component moving at `speed` with the default bindings
    pub fn new(speed: f32) -> EngineResult<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "movement speed must be non-negative, got {speed}"
            )));
        }
        Ok(Self {
            speed,
            bindings: DirectionBindings::default(),
            keyboard: KeyboardComponent::new(),
        })
    }

    /// Replace the direction bindings
    #[must_use]
    pub fn with_bindings(mut self, bindings: DirectionBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Attach pressed/released callbacks
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: KeyboardComponent) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Velocity for the actions currently held
    pub fn velocity_from(&self, keyboard: &dyn KeyboardProvider) -> (f32, f32) {
        let axis = |negative: Action, positive: Action| -> f32 {
            let mut direction = 0.0;
            if keyboard.is_action_down(negative) {
                direction -= 1.0;
            }
            if keyboard.is_action_down(positive) {
                direction += 1.0;
            }
            direction * self.speed
        };

        (
            axis(self.bindings.left, self.bindings.right),
            axis(self.bindings.up, self.bindings.down),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Held(Vec<Action>);

    impl KeyboardProvider for Held {
        fn is_action_down(&self, action: Action) -> bool {
            self.0.contains(&action)
        }

        fn update(&mut self) {}
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let movement = FourWayMovementComponent::new(50.0).unwrap();
        let held = Held(vec![Action::Right, Action::Up]);
        assert_eq!(movement.velocity_from(&held), (50.0, -50.0));
    }

    #[test]
    fn test_opposite_actions_cancel() {
        let movement = FourWayMovementComponent::new(50.0).unwrap();
        let held = Held(vec![Action::Left, Action::Right, Action::Down]);
        assert_eq!(movement.velocity_from(&held), (0.0, 50.0));
    }

    #[test]
    fn test_custom_bindings() {
        let movement = FourWayMovementComponent::new(10.0)
            .unwrap()
            .with_bindings(DirectionBindings {
                up: Action::Custom(0),
                down: Action::Custom(1),
                left: Action::Custom(2),
                right: Action::Custom(3),
            });
        assert_eq!(movement.velocity_from(&Held(vec![Action::Right])), (0.0, 0.0));
        assert_eq!(movement.velocity_from(&Held(vec![Action::Custom(3)])), (10.0, 0.0));
    }

    #[test]
    fn test_negative_speed_rejected() {
        assert!(FourWayMovementComponent::new(-1.0).is_err());
    }
}
