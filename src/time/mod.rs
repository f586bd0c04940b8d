//! Time integration: stepping schemes and the run driver.

mod scheme;
mod simulation;

pub use scheme::TimeScheme;
pub use simulation::{Simulation, SolveStats, StepSize};
