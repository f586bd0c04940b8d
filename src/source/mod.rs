//! Source terms.
//!
//! Source terms modify the residual of the semi-discrete system:
//! dq/dt = -(flux balance)/measure + S(q, x, t)
//!
//! The bed-slope gravity source is built into the spatial operator
//! (it needs the topography gradient); everything else plugs in
//! through the [`SourceTerm`] trait.

use crate::solver::SweState;

/// A pointwise source term evaluated per cell.
pub trait SourceTerm: Send + Sync {
    /// Evaluate the source contribution at one cell.
    ///
    /// # Arguments
    /// * `state` - Current state (h, hu) in the cell
    /// * `position` - Cell center coordinate
    /// * `time` - Current simulation time
    fn evaluate(&self, state: &SweState, position: f64, time: f64) -> SweState;

    /// Name of this source term for diagnostics.
    fn name(&self) -> &'static str;
}

/// Manning bottom friction.
///
/// S = (0, -g n² |u| u h^{-1/3})
///
/// The Manning coefficient n (s/m^{1/3}) depends on bed roughness:
/// smooth concrete n ≈ 0.012, natural channels n ≈ 0.03-0.05.
/// Friction becomes stiff as h -> 0, so the coefficient is capped at
/// its value at the wet threshold.
#[derive(Clone, Debug)]
pub struct ManningFriction {
    /// Gravitational acceleration
    pub g: f64,
    /// Manning coefficient (s/m^{1/3})
    pub manning_n: f64,
    /// Minimum depth for the friction calculation
    pub h_min: f64,
}

impl ManningFriction {
    /// Create a new Manning friction source.
    pub fn new(g: f64, manning_n: f64) -> Self {
        Self {
            g,
            manning_n,
            h_min: 1e-6,
        }
    }

    /// Friction coefficient C_f = g n² h^{-1/3}, capped near dry cells.
    pub fn friction_coefficient(&self, h: f64) -> f64 {
        let h_eff = h.max(self.h_min);
        self.g * self.manning_n * self.manning_n / h_eff.powf(1.0 / 3.0)
    }
}

impl SourceTerm for ManningFriction {
    fn evaluate(&self, state: &SweState, _position: f64, _time: f64) -> SweState {
        if state.h < self.h_min {
            return SweState::zero();
        }

        let u = state.hu / state.h;
        let s_hu = -self.friction_coefficient(state.h) * u.abs() * u;
        SweState::new(0.0, s_hu)
    }

    fn name(&self) -> &'static str {
        "manning-friction"
    }
}
