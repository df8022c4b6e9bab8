//! Fully-initialized runtime simulation context
//!
//! `Simulation` is the owned bundle built from a [`ScenarioConfig`]: the
//! chain state, numerical parameters, the five energy-history buffers, and
//! the command-facing knobs (pending frequency entry, pause and rescale
//! flags, steps per tick). It is constructed once, handed to the run loop by
//! ownership, and mutated only through [`Simulation::apply`] and
//! [`Simulation::tick`] on that one thread.

use tracing::info;

use crate::configuration::config::ScenarioConfig;
use crate::runtime::command::{parse_frequency, Command, CommandError};
use crate::simulation::forces::{Damper, ExternalForce, Spring};
use crate::simulation::history::EnergyHistory;
use crate::simulation::integrator::chain_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Chain};

/// Energy histories tracked by the simulation, one buffer per quantity
#[derive(Debug, Clone)]
pub struct Histories {
    pub body1: EnergyHistory,    // body-1 kinetic + anchor-spring energy
    pub body2: EnergyHistory,    // body-2 kinetic + far-spring energy
    pub coupling: EnergyHistory, // coupling-spring energy
    pub total: EnergyHistory,    // all kinetic and spring terms summed
    pub forcing: EnergyHistory,  // |external force|
}

impl Histories {
    fn new(stride: u64, capacity: usize) -> Self {
        Self {
            body1: EnergyHistory::new(stride, capacity),
            body2: EnergyHistory::new(stride, capacity),
            coupling: EnergyHistory::new(stride, capacity),
            total: EnergyHistory::new(stride, capacity),
            forcing: EnergyHistory::new(stride, capacity),
        }
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.body1.set_capacity(capacity);
        self.body2.set_capacity(capacity);
        self.coupling.set_capacity(capacity);
        self.total.set_capacity(capacity);
        self.forcing.set_capacity(capacity);
    }
}

#[derive(Debug)]
pub struct Simulation {
    pub chain: Chain,
    pub parameters: Parameters,
    pub histories: Histories,
    steps_per_tick: usize,
    pending_frequency: String,
    paused: bool,
    rescale_each_tick: bool,
    running: bool,
}

impl Simulation {
    /// Map a scenario configuration into the runtime bundle
    pub fn from_config(cfg: ScenarioConfig) -> Self {
        let c = cfg.chain;
        let chain = Chain {
            body1: Body::new(c.body1.mass, c.body1.position, c.body1.velocity, c.body1.friction),
            body2: Body::new(c.body2.mass, c.body2.position, c.body2.velocity, c.body2.friction),
            anchor_spring: Spring {
                natural_length: c.anchor_spring.natural_length,
                stiffness: c.anchor_spring.stiffness,
            },
            coupling_spring: Spring {
                natural_length: c.coupling_spring.natural_length,
                stiffness: c.coupling_spring.stiffness,
            },
            far_spring: Spring {
                natural_length: c.far_spring.natural_length,
                stiffness: c.far_spring.stiffness,
            },
            damper1: Damper { coefficient: c.damper1.coefficient },
            damper2: Damper { coefficient: c.damper2.coefficient },
            external: ExternalForce {
                amplitude: cfg.forcing.amplitude,
                angular_frequency: cfg.forcing.frequency,
            },
            bound: c.bound,
            t: 0.0,
        };

        let p = cfg.parameters;
        let parameters = Parameters {
            dt: p.dt,
            frame_interval_ms: p.frame_interval_ms,
            history_capacity: p.history_capacity,
            history_stride: p.history_stride,
        };

        let histories = Histories::new(parameters.history_stride, parameters.history_capacity);
        let steps_per_tick = parameters.steps_per_tick();

        Self {
            chain,
            parameters,
            histories,
            steps_per_tick,
            pending_frequency: String::new(),
            paused: false,
            rescale_each_tick: false,
            running: true,
        }
    }

    /// Run one pacer tick: `steps_per_tick` fixed steps, with every step
    /// offered to each history buffer (the stride gating happens inside)
    ///
    /// Does nothing while paused; the pacer keeps rescheduling regardless.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        let dt = self.parameters.dt;
        for _ in 0..self.steps_per_tick {
            // The drive that moves this step acts at the pre-step time
            let drive = self.chain.external.force(self.chain.t).abs();
            chain_step(&mut self.chain, dt);
            let e = self.chain.energies();
            self.histories.body1.push(e.body1_local());
            self.histories.body2.push(e.body2_local());
            self.histories.coupling.push(e.coupling_spring);
            self.histories.total.push(e.total());
            self.histories.forcing.push(drive);
        }
    }

    /// Apply one discrete command between ticks
    ///
    /// The only fallible case is `CommitFrequency` on a malformed pending
    /// buffer: the previous frequency is kept, the buffer is cleared, and
    /// the error is returned for the collaborator to surface.
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::AppendDigit(c) => {
                if c.is_ascii_digit() || c == '.' {
                    self.pending_frequency.push(c);
                }
            }
            Command::CommitFrequency => {
                let text = std::mem::take(&mut self.pending_frequency);
                let frequency = parse_frequency(&text)?;
                self.chain.external.set_frequency(frequency);
                info!(frequency, "forcing frequency updated");
            }
            Command::TogglePause => self.paused = !self.paused,
            Command::ToggleRescale => self.rescale_each_tick = !self.rescale_each_tick,
            Command::IncreaseHistory => {
                let capacity = grow(self.histories.total.capacity());
                self.histories.set_capacity(capacity);
            }
            Command::DecreaseHistory => {
                let capacity = shrink(self.histories.total.capacity());
                self.histories.set_capacity(capacity);
            }
            Command::IncreaseSteps => self.steps_per_tick = grow(self.steps_per_tick),
            Command::DecreaseSteps => self.steps_per_tick = shrink(self.steps_per_tick),
            Command::Quit => {
                self.running = false;
                info!("quit requested");
            }
        }
        Ok(())
    }

    // ========== Read-only state for the rendering collaborator ==========

    pub fn elapsed(&self) -> f64 {
        self.chain.t
    }

    pub fn frequency(&self) -> f64 {
        self.chain.external.angular_frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.chain.external.amplitude
    }

    pub fn pending_frequency(&self) -> &str {
        &self.pending_frequency
    }

    pub fn steps_per_tick(&self) -> usize {
        self.steps_per_tick
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn rescale_each_tick(&self) -> bool {
        self.rescale_each_tick
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Adjustment ratio shared by the history-capacity and steps-per-tick
/// commands
const ADJUST_RATIO: f64 = 1.1;

/// Multiply by the ratio, rounded up, never below the floor of 2
fn grow(n: usize) -> usize {
    ((n as f64 * ADJUST_RATIO).ceil() as usize).max(2)
}

/// Divide by the ratio, rounded down, never below the floor of 2
fn shrink(n: usize) -> usize {
    ((n as f64 / ADJUST_RATIO).floor() as usize).max(2)
}
