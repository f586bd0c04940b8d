//! Solution state for the 1D shallow water system.
//!
//! The conserved variables are (h, hu):
//! - h = water depth
//! - hu = discharge (depth times velocity)

use std::ops::{Add, Mul, Sub};

use crate::mesh::Mesh1D;
use crate::types::CellIndex;

/// Shallow water state at a single cell: (h, hu).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SweState {
    /// Water depth h (non-negative under a stable configuration)
    pub h: f64,
    /// Discharge hu = h * u
    pub hu: f64,
}

impl SweState {
    /// Create a new state.
    pub fn new(h: f64, hu: f64) -> Self {
        Self { h, hu }
    }

    /// Create a state from primitive variables (h, u).
    pub fn from_primitives(h: f64, u: f64) -> Self {
        Self { h, hu: h * u }
    }

    /// Zero state (dry cell).
    pub fn zero() -> Self {
        Self { h: 0.0, hu: 0.0 }
    }

    /// Compute velocity u = hu / h, returning 0 for a dry cell.
    pub fn velocity(&self, h_min: f64) -> f64 {
        if self.h > h_min {
            self.hu / self.h
        } else {
            0.0
        }
    }

    /// Check if this state is "dry" (h below the wet threshold).
    pub fn is_dry(&self, h_min: f64) -> bool {
        self.h < h_min
    }

    /// Both components are finite (no NaN/Inf).
    pub fn is_finite(&self) -> bool {
        self.h.is_finite() && self.hu.is_finite()
    }

    /// Convert to array representation [h, hu].
    pub fn to_array(&self) -> [f64; 2] {
        [self.h, self.hu]
    }

    /// Create from array representation [h, hu].
    pub fn from_array(arr: [f64; 2]) -> Self {
        Self {
            h: arr[0],
            hu: arr[1],
        }
    }
}

impl Add for SweState {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            h: self.h + other.h,
            hu: self.hu + other.hu,
        }
    }
}

impl Sub for SweState {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            h: self.h - other.h,
            hu: self.hu - other.hu,
        }
    }
}

impl Mul<f64> for SweState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            h: self.h * scalar,
            hu: self.hu * scalar,
        }
    }
}

impl Mul<SweState> for f64 {
    type Output = SweState;

    fn mul(self, state: SweState) -> SweState {
        state * self
    }
}

/// Cell-averaged solution for the whole mesh.
///
/// Stores the two conserved variables in interleaved layout:
/// `data[k * 2 + var]` for cell k and variable var. Interleaving keeps
/// both variables of a cell on the same cache line during edge sweeps.
#[derive(Clone, Debug)]
pub struct SweSolution {
    /// Cell values in interleaved layout
    pub data: Vec<f64>,
    /// Number of cells
    pub n_cells: usize,
}

impl SweSolution {
    /// Create a solution initialized to zero.
    pub fn zeros(n_cells: usize) -> Self {
        Self {
            data: vec![0.0; n_cells * 2],
            n_cells,
        }
    }

    /// Get the state in cell k.
    #[inline]
    pub fn get(&self, k: CellIndex) -> SweState {
        let base = k.as_usize() * 2;
        SweState::new(self.data[base], self.data[base + 1])
    }

    /// Set the state in cell k.
    #[inline]
    pub fn set(&mut self, k: CellIndex, state: SweState) {
        let base = k.as_usize() * 2;
        self.data[base] = state.h;
        self.data[base + 1] = state.hu;
    }

    /// Initialize from a state function of the cell-center coordinate.
    pub fn set_from_function<F>(&mut self, mesh: &Mesh1D, f: F)
    where
        F: Fn(f64) -> SweState,
    {
        for k in CellIndex::iter(mesh.n_cells()) {
            self.set(k, f(mesh.cell_center(k)));
        }
    }

    /// Scale all values by a constant: self <- c * self.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &Self) {
        assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * *b;
        }
    }

    /// Maximum absolute value across both variables.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// Minimum depth across the domain.
    pub fn min_depth(&self) -> f64 {
        let mut min_h = f64::INFINITY;
        for k in CellIndex::iter(self.n_cells) {
            min_h = min_h.min(self.get(k).h);
        }
        min_h
    }

    /// All values are finite (no NaN/Inf).
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}
