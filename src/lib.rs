//! # saint-venant
//!
//! A finite-volume solver for the 1D Saint-Venant (shallow water)
//! equations.
//!
//! This crate provides the building blocks of an explicit FV solver:
//! - Mesh representation (uniform and graded interval meshes)
//! - Shallow water equations with bed topography
//! - Numerical fluxes (Rusanov, HLL)
//! - Ghost-state boundary conditions keyed by reference tag
//! - Explicit time integration (forward Euler, RK2)
//! - Point probes and exact-solution error norms
//! - CSV output through injected sinks

pub mod boundary;
pub mod config;
pub mod equations;
pub mod error;
pub mod flux;
pub mod io;
pub mod mesh;
pub mod probe;
pub mod scenario;
pub mod solver;
pub mod source;
pub mod time;
pub mod types;

// Re-export main types for convenience
pub use boundary::{
    BcContext, BoundaryCondition, BoundaryTable, ImposedStateBc, ReflectiveBc, TransmissiveBc,
};
pub use config::SimulationConfig;
pub use equations::ShallowWater1D;
pub use error::{ConfigError, SolverError};
pub use flux::{hll_flux, numerical_flux, rusanov_flux, FluxScheme};
pub use io::{
    CsvProbeWriter, CsvSolutionWriter, MemoryProbeSink, MemorySolutionSink, NullSink, ProbeSink,
    SolutionSink,
};
pub use mesh::{Edge, Mesh1D, Topography};
pub use probe::{Probe, ProbeSample, ProbeSet};
pub use scenario::{ritter_solution, Scenario};
pub use solver::{
    compute_dt, compute_max_wave_speed, compute_residual, l1_error, l2_error, ProgressReporter,
    Residual, ResidualConfig, SweDiagnostics, SweSolution, SweState,
};
#[cfg(feature = "parallel")]
pub use solver::compute_residual_parallel;
pub use source::{ManningFriction, SourceTerm};
pub use time::{Simulation, SolveStats, StepSize, TimeScheme};
pub use types::{BoundaryRef, CellIndex, EdgeIndex};
