//! Frame timing utilities
//!
//! The scene is stepped with an elapsed [`Duration`] per frame. A [`Timer`]
//! produces that value either from the wall clock or as a fixed step, which
//! keeps headless runs and tests deterministic.

use std::time::{Duration, Instant};

/// How a [`Timer`] measures frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Measure real elapsed time between ticks
    WallClock,
    /// Report the same step every tick
    Fixed(Duration),
}

/// Frame timer
pub struct Timer {
    source: TimeSource,
    last_frame: Instant,
    delta: Duration,
    total: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self::with_source(TimeSource::WallClock)
    }

    /// Create a timer that advances by `1 / fps` every tick
    pub fn fixed_rate(fps: u32) -> Self {
        let step = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        Self::with_source(TimeSource::Fixed(step))
    }

    /// Create a timer with an explicit source
    pub fn with_source(source: TimeSource) -> Self {
        Self {
            source,
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            total: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance one frame and return the elapsed time for it
    pub fn tick(&mut self) -> Duration {
        self.delta = match self.source {
            TimeSource::WallClock => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_frame);
                self.last_frame = now;
                elapsed
            }
            TimeSource::Fixed(step) => step,
        };
        self.total += self.delta;
        self.frame_count += 1;
        self.delta
    }

    /// Time reported by the last tick
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Sum of every tick so far
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        let total = self.total.as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let running = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + running
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}
