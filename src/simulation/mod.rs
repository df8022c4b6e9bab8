pub mod forces;
pub mod history;
pub mod integrator;
pub mod params;
pub mod states;
