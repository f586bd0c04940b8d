//! Built-in boundary condition implementations.

use super::{BcContext, BoundaryCondition};
use crate::solver::SweState;

/// Reflective (wall) boundary condition.
///
/// Mirror state with reversed discharge:
/// - h_ghost = h_interior
/// - hu_ghost = -hu_interior
///
/// This guarantees zero mass flux through the boundary, so a basin
/// closed by reflective walls conserves total mass exactly (up to
/// floating-point roundoff).
#[derive(Clone, Copy, Debug, Default)]
pub struct ReflectiveBc;

impl BoundaryCondition for ReflectiveBc {
    fn ghost_state(&self, ctx: &BcContext) -> SweState {
        SweState::new(ctx.interior.h, -ctx.interior.hu)
    }

    fn name(&self) -> &'static str {
        "reflective"
    }
}

/// Transmissive (zero-gradient) boundary condition.
///
/// The ghost state copies the interior state, letting waves leave the
/// domain without reflection. Exact only for waves hitting the
/// boundary head-on, which is always the case in 1D.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransmissiveBc;

impl BoundaryCondition for TransmissiveBc {
    fn ghost_state(&self, ctx: &BcContext) -> SweState {
        ctx.interior
    }

    fn name(&self) -> &'static str {
        "transmissive"
    }
}

/// Imposed-value boundary condition.
///
/// The ghost state is a prescribed constant, typically an upstream
/// discharge or a fixed water level. Note that for subcritical flow
/// only part of the imposed state is felt by the interior; the
/// numerical flux does the characteristic selection.
#[derive(Clone, Copy, Debug)]
pub struct ImposedStateBc {
    /// Prescribed exterior state
    pub state: SweState,
}

impl ImposedStateBc {
    /// Impose the conserved state (h, hu).
    pub fn new(h: f64, hu: f64) -> Self {
        Self {
            state: SweState::new(h, hu),
        }
    }
}

impl BoundaryCondition for ImposedStateBc {
    fn ghost_state(&self, _ctx: &BcContext) -> SweState {
        self.state
    }

    fn name(&self) -> &'static str {
        "imposed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(interior: SweState) -> BcContext {
        BcContext {
            time: 0.0,
            position: 0.0,
            interior,
            normal: -1.0,
        }
    }

    #[test]
    fn test_reflective_mirrors_discharge() {
        let bc = ReflectiveBc;
        let ghost = bc.ghost_state(&ctx(SweState::new(2.0, 1.5)));

        assert!((ghost.h - 2.0).abs() < 1e-14);
        assert!((ghost.hu + 1.5).abs() < 1e-14);
    }

    #[test]
    fn test_transmissive_copies_interior() {
        let bc = TransmissiveBc;
        let interior = SweState::new(1.3, -0.4);
        assert_eq!(bc.ghost_state(&ctx(interior)), interior);
    }

    #[test]
    fn test_imposed_ignores_interior() {
        let bc = ImposedStateBc::new(3.0, 0.2);
        let ghost = bc.ghost_state(&ctx(SweState::new(1.0, -5.0)));

        assert!((ghost.h - 3.0).abs() < 1e-14);
        assert!((ghost.hu - 0.2).abs() < 1e-14);
    }

    #[test]
    fn test_names() {
        assert_eq!(ReflectiveBc.name(), "reflective");
        assert_eq!(TransmissiveBc.name(), "transmissive");
        assert_eq!(ImposedStateBc::new(1.0, 0.0).name(), "imposed");
    }
}
