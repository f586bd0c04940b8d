//! 1D Shallow Water (Saint-Venant) equations.
//!
//! ∂h/∂t + ∂(hu)/∂x = 0                          (mass conservation)
//! ∂(hu)/∂t + ∂(hu² + gh²/2)/∂x = -gh ∂B/∂x      (momentum conservation)
//!
//! where h is the water depth, hu the discharge, g the gravitational
//! acceleration and B the bed elevation. The bed-slope source term is
//! applied by the spatial operator, not by the flux function.

use crate::solver::SweState;

/// 1D shallow water equations.
///
/// State vector: q = [h, hu]
/// Flux: f(q) = [hu, hu²/h + gh²/2]
#[derive(Clone, Debug)]
pub struct ShallowWater1D {
    /// Gravitational acceleration (default 9.81 m/s²)
    pub g: f64,
    /// Minimum depth for wet/dry treatment (default 1e-6)
    pub h_min: f64,
}

impl ShallowWater1D {
    /// Create shallow water equations with the given gravity.
    pub fn new(g: f64) -> Self {
        Self { g, h_min: 1e-6 }
    }

    /// Create with a custom minimum depth threshold.
    pub fn with_h_min(g: f64, h_min: f64) -> Self {
        Self { g, h_min }
    }

    /// Standard gravity (9.81 m/s²).
    pub fn standard() -> Self {
        Self::new(9.81)
    }

    /// Physical flux f(q) = [hu, hu²/h + gh²/2].
    ///
    /// Dry cells carry no flux.
    pub fn flux(&self, q: &SweState) -> SweState {
        if q.h <= self.h_min {
            return SweState::zero();
        }

        let u = q.hu / q.h;
        SweState::new(q.hu, q.hu * u + 0.5 * self.g * q.h * q.h)
    }

    /// Wave celerity c = sqrt(gh).
    pub fn celerity(&self, h: f64) -> f64 {
        (self.g * h.max(0.0)).sqrt()
    }

    /// Maximum absolute wave speed |u| + c, used for the CFL bound.
    pub fn max_wave_speed(&self, q: &SweState) -> f64 {
        if q.h <= self.h_min {
            return 0.0;
        }

        let u = q.velocity(self.h_min);
        u.abs() + self.celerity(q.h)
    }

    /// Eigenvalues of the flux Jacobian: [u - c, u + c].
    pub fn eigenvalues(&self, q: &SweState) -> [f64; 2] {
        if q.h <= self.h_min {
            return [0.0, 0.0];
        }

        let u = q.hu / q.h;
        let c = self.celerity(q.h);
        [u - c, u + c]
    }

    /// Froude number Fr = |u| / c.
    pub fn froude(&self, q: &SweState) -> f64 {
        let c = self.celerity(q.h);
        if c > 1e-10 {
            q.velocity(self.h_min).abs() / c
        } else {
            0.0
        }
    }
}

impl Default for ShallowWater1D {
    fn default() -> Self {
        Self::standard()
    }
}
