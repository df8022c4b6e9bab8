//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ChainConfig`]      – the two bodies, three springs, two dampers and the anchor separation
//! - [`ForcingConfig`]    – the external sinusoidal drive on body 1
//! - [`ParametersConfig`] – numerical parameters and real-time pacing settings
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! chain:
//!   body1: { mass: 10.0, position: 10.0, velocity: 0.0, friction: 0.0 }
//!   body2: { mass: 10.0, position: 20.0, velocity: 0.0, friction: 0.0 }
//!   anchor_spring:   { natural_length: 10.0, stiffness: 10.0 }
//!   coupling_spring: { natural_length: 10.0, stiffness: 10.0 }
//!   far_spring:      { natural_length: 10.0, stiffness: 10.0 }
//!   damper1: { coefficient: 1.0 }
//!   damper2: { coefficient: 1.0 }
//!   bound: 30.0               # separation of the two fixed anchors
//!
//! forcing:
//!   amplitude: 5.0
//!   frequency: 1.7320508      # angular frequency of the drive
//!
//! parameters:
//!   dt: 0.001                 # fixed physics step (seconds)
//!   frame_interval_ms: 16.0   # target real-time tick interval
//!   history_capacity: 2000    # samples kept per energy history
//!   history_stride: 40        # record every n-th step
//! ```
//!
//! The runtime then maps this configuration into its internal simulation
//! bundle; degenerate values (zero mass, zero dt) are accepted here and
//! surface as the documented numerical edge cases.

use serde::Deserialize;

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub mass: f64,     // mass of the body
    pub position: f64, // initial position along the track
    pub velocity: f64, // initial velocity
    pub friction: f64, // kinetic friction coefficient
}

/// One linear spring
#[derive(Deserialize, Debug, Clone)]
pub struct SpringConfig {
    pub natural_length: f64, // extension at zero force
    pub stiffness: f64,      // Hooke's-law constant
}

/// One linear damper
#[derive(Deserialize, Debug, Clone)]
pub struct DamperConfig {
    pub coefficient: f64, // damping coefficient
}

/// The sinusoidal drive applied to body 1
#[derive(Deserialize, Debug, Clone)]
pub struct ForcingConfig {
    pub amplitude: f64, // force amplitude
    pub frequency: f64, // angular frequency
}

/// Full chain topology: anchor -> body1 -> body2 -> far anchor
#[derive(Deserialize, Debug, Clone)]
pub struct ChainConfig {
    pub body1: BodyConfig,
    pub body2: BodyConfig,
    pub anchor_spring: SpringConfig,   // left anchor -> body 1
    pub coupling_spring: SpringConfig, // body 1 <-> body 2
    pub far_spring: SpringConfig,      // body 2 -> right anchor
    pub damper1: DamperConfig,
    pub damper2: DamperConfig,
    pub bound: f64, // separation of the two fixed anchors
}

/// Global numerical and pacing parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,                 // fixed physics step (seconds)
    pub frame_interval_ms: f64,  // target tick interval (milliseconds)
    pub history_capacity: usize, // bound on buffered energy samples
    pub history_stride: u64,     // record every n-th step
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub chain: ChainConfig,           // bodies, springs, dampers, anchors
    pub forcing: ForcingConfig,       // external drive
    pub parameters: ParametersConfig, // numerics and pacing
}
