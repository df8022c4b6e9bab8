pub mod simulation;
pub mod configuration;
pub mod runtime;
pub mod visualization;

pub use simulation::states::{Body, Chain, EnergySnapshot};
pub use simulation::forces::{Spring, Damper, ExternalForce};
pub use simulation::integrator::chain_step;
pub use simulation::history::EnergyHistory;
pub use simulation::params::Parameters;

pub use runtime::command::{parse_frequency, Command, CommandError};
pub use runtime::pacer::{Pacer, Tick};
pub use runtime::sim::{Histories, Simulation};

pub use configuration::config::{
    BodyConfig, ChainConfig, DamperConfig, ForcingConfig, ParametersConfig, ScenarioConfig,
    SpringConfig,
};

pub use visualization::console::run;
