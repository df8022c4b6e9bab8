//! Numerical and runtime parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed physics step size `dt`,
//! - target real-time tick interval,
//! - history sampling stride and capacity

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,                 // fixed physics step (seconds)
    pub frame_interval_ms: f64,  // target tick interval (milliseconds)
    pub history_capacity: usize, // samples kept per energy history
    pub history_stride: u64,     // record every n-th step
}

impl Parameters {
    /// Fixed steps per real-time tick that keep simulated time in lock-step
    /// with wall time, never below the 2-step floor
    pub fn steps_per_tick(&self) -> usize {
        ((self.frame_interval_ms / 1000.0 / self.dt) as usize).max(2)
    }
}
