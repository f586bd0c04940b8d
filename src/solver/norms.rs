//! Discrete error norms against an exact solution.
//!
//! Both norms compare cell averages to the exact solution evaluated at
//! cell centers and weight by the cell measure:
//!
//!   L1 = Σ_k |q_k - q_exact(x_k)| |Ω_k|
//!   L2 = sqrt(Σ_k (q_k - q_exact(x_k))² |Ω_k|)
//!
//! One value per conserved component, [h, hu].

use crate::mesh::Mesh1D;
use crate::solver::{SweSolution, SweState};
use crate::types::CellIndex;

/// Measure-weighted L1 error per component.
pub fn l1_error<F>(q: &SweSolution, mesh: &Mesh1D, exact: F) -> [f64; 2]
where
    F: Fn(f64) -> SweState,
{
    let mut err = [0.0; 2];
    for k in CellIndex::iter(mesh.n_cells()) {
        let diff = q.get(k) - exact(mesh.cell_center(k));
        let w = mesh.cell_measure(k);
        err[0] += diff.h.abs() * w;
        err[1] += diff.hu.abs() * w;
    }
    err
}

/// Measure-weighted L2 error per component.
pub fn l2_error<F>(q: &SweSolution, mesh: &Mesh1D, exact: F) -> [f64; 2]
where
    F: Fn(f64) -> SweState,
{
    let mut err = [0.0; 2];
    for k in CellIndex::iter(mesh.n_cells()) {
        let diff = q.get(k) - exact(mesh.cell_center(k));
        let w = mesh.cell_measure(k);
        err[0] += diff.h * diff.h * w;
        err[1] += diff.hu * diff.hu * w;
    }
    [err[0].sqrt(), err[1].sqrt()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_error_against_itself() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 8);
        let mut q = SweSolution::zeros(8);
        q.set_from_function(&mesh, |x| SweState::new(1.0 + x, 0.5 * x));

        let exact = |x: f64| SweState::new(1.0 + x, 0.5 * x);
        assert_eq!(l1_error(&q, &mesh, exact), [0.0, 0.0]);
        assert_eq!(l2_error(&q, &mesh, exact), [0.0, 0.0]);
    }

    #[test]
    fn test_constant_offset() {
        // q - exact = (0.5, -0.25) everywhere on a unit domain:
        // L1 = |offset|, L2 = |offset| as well (unit total measure).
        let mesh = Mesh1D::uniform(0.0, 1.0, 10);
        let mut q = SweSolution::zeros(10);
        q.set_from_function(&mesh, |_| SweState::new(1.5, -0.25));

        let exact = |_: f64| SweState::new(1.0, 0.0);
        let l1 = l1_error(&q, &mesh, exact);
        let l2 = l2_error(&q, &mesh, exact);

        assert!((l1[0] - 0.5).abs() < 1e-14);
        assert!((l1[1] - 0.25).abs() < 1e-14);
        assert!((l2[0] - 0.5).abs() < 1e-14);
        assert!((l2[1] - 0.25).abs() < 1e-14);
    }

    #[test]
    fn test_measure_weighting_on_graded_mesh() {
        // Error only in the wide cell; the norm must scale with its
        // measure, not the cell count.
        let mesh = Mesh1D::from_vertices(vec![0.0, 0.1, 0.2, 1.0]);
        let mut q = SweSolution::zeros(3);
        q.set_from_function(&mesh, |_| SweState::new(1.0, 0.0));
        q.set(CellIndex::new(2), SweState::new(2.0, 0.0));

        let exact = |_: f64| SweState::new(1.0, 0.0);
        let l1 = l1_error(&q, &mesh, exact);
        let l2 = l2_error(&q, &mesh, exact);

        assert!((l1[0] - 0.8).abs() < 1e-14);
        assert!((l2[0] - 0.8_f64.sqrt()).abs() < 1e-14);
    }
}
