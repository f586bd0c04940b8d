//! Finite-volume solver core: solution storage, the spatial operator,
//! error norms and runtime diagnostics.

mod diagnostics;
mod norms;
mod residual;
mod state;

pub use diagnostics::{ProgressReporter, SweDiagnostics};
pub use norms::{l1_error, l2_error};
pub use residual::{compute_dt, compute_max_wave_speed, compute_residual, Residual, ResidualConfig};
pub use state::{SweSolution, SweState};

#[cfg(feature = "parallel")]
pub use residual::compute_residual_parallel;
