//! Linear position tween

use crate::ecs::Entity;
use crate::error::{EngineError, EngineResult};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Callback invoked on the owner once the tween reaches its end
pub type TweenCallback = Rc<dyn Fn(&mut Entity)>;

/// Moves the owner from `start` to `end` over `duration`
#[derive(Clone)]
pub struct TweenComponent {
    /// Start position
    pub start: (f32, f32),
    /// End position
    pub end: (f32, f32),
    duration: Duration,
    elapsed: Duration,
    on_complete: Option<TweenCallback>,
}

impl TweenComponent {
    /// Create a tween; `duration` must be non-zero
    pub fn new(start: (f32, f32), end: (f32, f32), duration: Duration) -> EngineResult<Self> {
        if duration.is_zero() {
            return Err(EngineError::invalid_argument("tween duration must be non-zero"));
        }
        Ok(Self {
            start,
            end,
            duration,
            elapsed: Duration::ZERO,
            on_complete: None,
        })
    }

    /// Set the completion callback
    #[must_use]
    pub fn with_on_complete(mut self, callback: impl Fn(&mut Entity) + 'static) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }

    /// The completion callback, if any
    pub fn on_complete(&self) -> Option<TweenCallback> {
        self.on_complete.clone()
    }

    /// Total tween length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Completed fraction in `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the end position has been reached
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `elapsed` and return the interpolated position
    pub fn advance(&mut self, elapsed: Duration) -> (f32, f32) {
        self.elapsed = (self.elapsed + elapsed).min(self.duration);
        if self.is_finished() {
            return self.end;
        }
        let t = self.progress();
        (
            self.start.0 + (self.end.0 - self.start.0) * t,
            self.start.1 + (self.end.1 - self.start.1) * t,
        )
    }
}

impl fmt::Debug for TweenComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenComponent")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
