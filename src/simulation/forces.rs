//! Force elements for the two-mass chain
//!
//! Three kinds of scalar force contributors:
//! - [`Spring`]        linear Hooke's-law spring, stateless per call
//! - [`Damper`]        linear velocity damper, stateless per call
//! - [`ExternalForce`] sinusoidal drive with a runtime-mutable frequency
//!
//! All of them accept any real input; a negative spring length is simply a
//! valid compressed state.

/// Linear spring with a natural length and Hooke's-law stiffness
#[derive(Debug, Clone)]
pub struct Spring {
    pub natural_length: f64, // extension at which the spring exerts zero force
    pub stiffness: f64,      // Hooke's-law constant
}

impl Spring {
    /// Force exerted on the body at one end of a spring stretched to `length`
    ///
    /// The spring pulls inward. `left_side` selects which end the force is
    /// applied to and flips the reaction direction accordingly:
    /// `true` for the body on the left end of the spring, `false` for the
    /// body on the right end.
    pub fn force(&self, length: f64, left_side: bool) -> f64 {
        (length - self.natural_length) * self.stiffness * if left_side { -1.0 } else { 1.0 }
    }

    /// Elastic potential energy stored at extension `length`
    pub fn energy(&self, length: f64) -> f64 {
        let x = length - self.natural_length;
        0.5 * self.stiffness * x * x
    }
}

/// Linear damper opposing velocity
#[derive(Debug, Clone)]
pub struct Damper {
    pub coefficient: f64, // damping coefficient
}

impl Damper {
    pub fn force(&self, velocity: f64) -> f64 {
        -self.coefficient * velocity
    }

    /// Instantaneous dissipation rate at `velocity`
    ///
    /// Diagnostic only: this quantity is not folded into the total-energy
    /// history, so with nonzero damping the tracked total decays.
    pub fn energy_loss_rate(&self, velocity: f64) -> f64 {
        self.coefficient * velocity * velocity
    }
}

/// Sinusoidal external drive applied to body 1
#[derive(Debug, Clone)]
pub struct ExternalForce {
    pub amplitude: f64,
    pub angular_frequency: f64,
}

impl ExternalForce {
    /// Drive force at absolute simulation time `t`
    pub fn force(&self, t: f64) -> f64 {
        self.amplitude * (self.angular_frequency * t).sin()
    }

    /// Change the drive frequency in place
    ///
    /// Takes effect on the next force evaluation. The sine phase is computed
    /// from absolute time, so a frequency change produces an instantaneous
    /// phase jump rather than a smooth continuation.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.angular_frequency = frequency;
    }
}
