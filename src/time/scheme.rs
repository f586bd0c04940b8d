//! Explicit time-stepping schemes.
//!
//! A scheme advances the cell averages by one step of size dt using
//! evaluations of the semi-discrete rate dq/dt supplied by the caller.
//! Both schemes are explicit and rely on the CFL bound for stability.

use crate::error::ConfigError;
use crate::solver::SweSolution;

/// Selectable time-stepping scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeScheme {
    /// Forward Euler, first order
    #[default]
    ExplicitEuler,
    /// Heun's method (two-stage Runge-Kutta), second order
    Rk2,
}

impl TimeScheme {
    /// Look up a scheme by configuration name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "ExplicitEuler" => Ok(TimeScheme::ExplicitEuler),
            "RK2" => Ok(TimeScheme::Rk2),
            other => Err(ConfigError::UnknownTimeScheme(other.to_string())),
        }
    }

    /// Configuration name of this scheme.
    pub fn name(&self) -> &'static str {
        match self {
            TimeScheme::ExplicitEuler => "ExplicitEuler",
            TimeScheme::Rk2 => "RK2",
        }
    }

    /// Formal order of accuracy.
    pub fn order(&self) -> usize {
        match self {
            TimeScheme::ExplicitEuler => 1,
            TimeScheme::Rk2 => 2,
        }
    }

    /// Advance the solution in place from `time` to `time + dt`.
    ///
    /// `rhs` evaluates the spatial operator at a given state and time.
    pub fn step<F>(
        &self,
        q: &mut SweSolution,
        dt: f64,
        time: f64,
        rhs: &mut F,
    ) -> Result<(), ConfigError>
    where
        F: FnMut(&SweSolution, f64) -> Result<SweSolution, ConfigError>,
    {
        match self {
            TimeScheme::ExplicitEuler => {
                // q^{n+1} = q^n + dt k1
                let k1 = rhs(q, time)?;
                q.axpy(dt, &k1);
            }
            TimeScheme::Rk2 => {
                // Heun: q* = q^n + dt k1
                //       q^{n+1} = q^n + dt (k1 + k2)/2, k2 = rhs(q*, t + dt)
                let k1 = rhs(q, time)?;
                let mut q_star = q.clone();
                q_star.axpy(dt, &k1);
                let k2 = rhs(&q_star, time + dt)?;

                q.axpy(0.5 * dt, &k1);
                q.axpy(0.5 * dt, &k2);
            }
        }
        Ok(())
    }
}
