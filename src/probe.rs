//! Point probes.
//!
//! A probe records the state at a fixed physical position over time.
//! Probe positions are resolved to owning cells once, against the
//! immutable mesh, before the time loop starts; sampling during the
//! run is then a plain indexed read.

use crate::mesh::Mesh1D;
use crate::solver::{SweSolution, SweState};
use crate::types::CellIndex;

/// A probe request: an identifier and a physical position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    /// User-chosen identifier, carried through to the output
    pub id: u32,
    /// Physical position to sample
    pub position: f64,
}

impl Probe {
    /// Create a new probe.
    pub fn new(id: u32, position: f64) -> Self {
        Self { id, position }
    }
}

/// One probe reading at a given time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeSample {
    /// Probe identifier
    pub id: u32,
    /// Probe position
    pub position: f64,
    /// Cell-averaged state of the owning cell
    pub state: SweState,
}

/// A set of probes with their positions resolved to cells.
#[derive(Clone, Debug, Default)]
pub struct ProbeSet {
    probes: Vec<Probe>,
    cells: Vec<CellIndex>,
}

impl ProbeSet {
    /// Resolve probe positions against the mesh.
    ///
    /// Each probe resolves to the cell containing its position, or to
    /// the nearest boundary cell when the position lies outside the
    /// domain. A probe exactly on an interior vertex samples the cell
    /// on the left of that vertex; resolution is deterministic, so
    /// repeated calls on the same mesh give the same cells.
    pub fn resolve(probes: Vec<Probe>, mesh: &Mesh1D) -> Self {
        let cells = probes
            .iter()
            .map(|probe| mesh.locate_cell(probe.position))
            .collect();
        Self { probes, cells }
    }

    /// Sample all probes from the current solution.
    pub fn sample(&self, q: &SweSolution) -> Vec<ProbeSample> {
        self.probes
            .iter()
            .zip(self.cells.iter())
            .map(|(probe, &cell)| ProbeSample {
                id: probe.id,
                position: probe.position,
                state: q.get(cell),
            })
            .collect()
    }

    /// Number of probes.
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Cell owning each probe, in probe order.
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }
}
