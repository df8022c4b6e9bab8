//! Core state types for the spring-chain simulation
//!
//! Defines the two-mass system:
//! - `Body`  a point mass on a 1D track with its transient acceleration
//! - `Chain` two bodies coupled in series by three springs and two dampers
//!
//! The chain holds the current simulation time `t`.

use crate::simulation::forces::{Damper, ExternalForce, Spring};

#[derive(Debug, Clone)]
pub struct Body {
    pub mass: f64,         // mass
    pub position: f64,     // scalar position along the track
    pub velocity: f64,     // scalar velocity
    pub acceleration: f64, // transient, fully recomputed every step
    pub friction: f64,     // kinetic friction coefficient
}

impl Body {
    pub fn new(mass: f64, position: f64, velocity: f64, friction: f64) -> Self {
        Self {
            mass,
            position,
            velocity,
            acceleration: 0.0,
            friction,
        }
    }

    /// Advance position and velocity by one fixed step, given the pre-summed
    /// net force currently applied to this body
    ///
    /// After the kinematic update, kinetic friction is applied as an impulse
    /// clamp: a fixed-magnitude impulse `m * friction * dt` is subtracted
    /// from the velocity, which snaps exactly to zero once its magnitude
    /// falls below that impulse. The body can stop dead instead of
    /// asymptoting toward rest.
    pub fn integrate(&mut self, applied_force: f64, dt: f64) {
        self.acceleration = applied_force / self.mass;
        self.position += dt * self.velocity + 0.5 * dt * dt * self.acceleration;
        self.velocity += dt * self.acceleration;

        if self.velocity != 0.0 {
            let impulse = self.mass * self.friction * dt;
            if self.velocity.abs() < impulse.abs() {
                self.velocity = 0.0;
            } else {
                self.velocity -= impulse * self.velocity.signum();
            }
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity * self.velocity
    }
}

/// Two bodies coupled in series between two fixed anchors
///
/// Topology: left anchor --anchor_spring-- body1 --coupling_spring-- body2
/// --far_spring-- right anchor, with one damper per body and the external
/// drive acting on body 1. The anchors sit at positions `0` and `bound`.
///
/// `0 < body1.position < body2.position < bound` is the physically intended
/// regime but is not enforced: the bodies may cross each other or the
/// anchors, and the springs then act on negative extensions.
#[derive(Debug, Clone)]
pub struct Chain {
    pub body1: Body,
    pub body2: Body,
    pub anchor_spring: Spring,   // left anchor -> body 1
    pub coupling_spring: Spring, // body 1 <-> body 2
    pub far_spring: Spring,      // body 2 -> right anchor
    pub damper1: Damper,
    pub damper2: Damper,
    pub external: ExternalForce, // periodic drive on body 1
    pub bound: f64,              // separation of the two fixed anchors
    pub t: f64,                  // simulation time
}

impl Chain {
    /// Current extension of the left anchor spring
    pub fn anchor_extension(&self) -> f64 {
        self.body1.position
    }

    /// Current extension of the coupling spring
    pub fn coupling_extension(&self) -> f64 {
        self.body2.position - self.body1.position
    }

    /// Current extension of the right anchor spring
    pub fn far_extension(&self) -> f64 {
        self.bound - self.body2.position
    }

    /// Snapshot of all kinetic and elastic energy terms at the current state
    pub fn energies(&self) -> EnergySnapshot {
        EnergySnapshot {
            kinetic1: self.body1.kinetic_energy(),
            kinetic2: self.body2.kinetic_energy(),
            anchor_spring: self.anchor_spring.energy(self.anchor_extension()),
            coupling_spring: self.coupling_spring.energy(self.coupling_extension()),
            far_spring: self.far_spring.energy(self.far_extension()),
        }
    }
}

/// Per-step energy observations, fed to the history buffers and the view
#[derive(Debug, Clone, Copy)]
pub struct EnergySnapshot {
    pub kinetic1: f64,
    pub kinetic2: f64,
    pub anchor_spring: f64,
    pub coupling_spring: f64,
    pub far_spring: f64,
}

impl EnergySnapshot {
    /// Body-1 local energy: its kinetic term plus the anchor-spring term
    pub fn body1_local(&self) -> f64 {
        self.kinetic1 + self.anchor_spring
    }

    /// Body-2 local energy: its kinetic term plus the far-spring term
    pub fn body2_local(&self) -> f64 {
        self.kinetic2 + self.far_spring
    }

    /// Sum of all kinetic and spring terms
    ///
    /// Damper losses are deliberately absent from this sum, so the tracked
    /// total is only conserved when both damping coefficients are zero.
    pub fn total(&self) -> f64 {
        self.kinetic1 + self.kinetic2 + self.anchor_spring + self.coupling_spring + self.far_spring
    }
}
