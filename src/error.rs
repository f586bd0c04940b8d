//! Error types for configuration and runtime failures.
//!
//! Configuration problems are caught before any stepping begins;
//! numerical blow-up is detected after each step and is terminal.

use crate::types::BoundaryRef;
use thiserror::Error;

/// Fatal configuration error, reported before the time loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A boundary edge carries a reference tag with no configured
    /// boundary condition.
    #[error("no boundary condition configured for boundary {0}")]
    MissingBoundaryCondition(BoundaryRef),

    /// Unknown time-scheme name in the configuration.
    #[error("unsupported time scheme '{0}' (expected 'ExplicitEuler' or 'RK2')")]
    UnknownTimeScheme(String),

    /// Unknown scenario name in the configuration.
    #[error("unsupported scenario '{0}'")]
    UnknownScenario(String),

    /// Non-positive fixed time step or CFL number.
    #[error("step size must be positive, got {0}")]
    NonPositiveStep(f64),

    /// Final time precedes initial time.
    #[error("final time {final_time} is before initial time {initial_time}")]
    InvalidTimeSpan { initial_time: f64, final_time: f64 },
}

/// Runtime solver error.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Configuration problem detected late (missing boundary condition
    /// during a residual evaluation).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// NaN or Inf appeared in the solution state after a step.
    /// The run cannot continue; there are no retries.
    #[error("non-finite value in solution state at t = {time} (step {step})")]
    NonFinite { time: f64, step: usize },

    /// Failure in an injected persistence channel.
    #[error("output channel error: {0}")]
    Sink(#[from] std::io::Error),
}
