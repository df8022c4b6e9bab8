//! Drift-corrected real-time pacing
//!
//! The pacer decides, for each timer callback, whether physics steps run and
//! how long to wait before the next callback. Instead of always waiting a
//! fixed delay it reschedules by the residual to the next interval boundary,
//! so timer-resolution jitter and variable rendering cost do not accumulate
//! into cumulative drift.

use std::time::{Duration, Instant};

/// What the loop should do for one timer callback
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub run_steps: bool,      // false only on the very first callback
    pub next_delay: Duration, // wait before the next callback
    pub fps: Option<u32>,     // emitted once per one-second window
}

/// Real-time tick scheduler
///
/// Two states: uninitialized (before the first callback) and running. The
/// first callback only establishes the wall-clock bases and schedules
/// exactly one target interval ahead.
#[derive(Debug)]
pub struct Pacer {
    target_interval_ms: f64,
    fps_window_start: Instant,
    fps_counter: u32,
    first_tick: bool,
}

impl Pacer {
    pub fn new(target_interval_ms: f64) -> Self {
        Self {
            // Sub-millisecond targets are below timer resolution
            target_interval_ms: target_interval_ms.max(1.0),
            fps_window_start: Instant::now(),
            fps_counter: 0,
            first_tick: true,
        }
    }

    pub fn target_interval(&self) -> Duration {
        Duration::from_secs_f64(self.target_interval_ms / 1000.0)
    }

    /// Advance the pacer by one timer callback at wall time `now`
    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.first_tick {
            self.first_tick = false;
            self.fps_window_start = now;
            return Tick {
                run_steps: false,
                next_delay: self.target_interval(),
                fps: None,
            };
        }

        self.fps_counter += 1;

        // Close the one-second fps window before measuring drift, so the
        // residual below is taken against the fresh base
        let mut fps = None;
        if now.duration_since(self.fps_window_start) >= Duration::from_millis(1000) {
            fps = Some(self.fps_counter);
            self.fps_counter = 0;
            self.fps_window_start = now;
        }

        // Residual of the wall clock past the last interval boundary; wait
        // only the remainder instead of a full interval
        let elapsed_ms = now.duration_since(self.fps_window_start).as_secs_f64() * 1000.0;
        let residual = elapsed_ms % self.target_interval_ms;
        let delay_ms = (self.target_interval_ms - residual).max(0.0);

        Tick {
            run_steps: true,
            next_delay: Duration::from_secs_f64(delay_ms / 1000.0),
            fps,
        }
    }
}
