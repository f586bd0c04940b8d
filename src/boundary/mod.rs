//! Boundary conditions.
//!
//! Boundary conditions specify how to compute the "ghost" state outside
//! the domain for flux evaluation at boundary edges. Each boundary edge
//! carries a reference tag; the [`BoundaryTable`] maps tags to
//! conditions and is validated against the mesh before any stepping.
//!
//! | BC type | Description |
//! |---------|-------------|
//! | [`ReflectiveBc`] | Solid wall: zero normal mass flux |
//! | [`TransmissiveBc`] | Zero-gradient outflow |
//! | [`ImposedStateBc`] | Prescribed constant state (inlet/forcing) |

mod conditions;
mod table;

pub use conditions::{ImposedStateBc, ReflectiveBc, TransmissiveBc};
pub use table::BoundaryTable;

use crate::solver::SweState;

/// Context for boundary condition evaluation.
///
/// Provides everything needed to compute the ghost state at a
/// boundary edge.
#[derive(Clone, Copy, Debug)]
pub struct BcContext {
    /// Current simulation time
    pub time: f64,
    /// Physical position of the boundary edge
    pub position: f64,
    /// State in the interior cell adjacent to the edge
    pub interior: SweState,
    /// Outward unit normal (-1 at the left boundary, +1 at the right)
    pub normal: f64,
}

/// A boundary condition producing ghost states.
pub trait BoundaryCondition: Send + Sync {
    /// Compute the ghost state just outside the domain.
    fn ghost_state(&self, ctx: &BcContext) -> SweState;

    /// Human-readable name for diagnostics.
    fn name(&self) -> &'static str;
}
