//! 1D finite-volume mesh.
//!
//! A 1D mesh partitions an interval [x_min, x_max] into cells (control
//! volumes). Each cell is bounded by two edges; an edge either separates
//! two cells or lies on the domain boundary, in which case it carries a
//! boundary reference tag that selects a boundary condition.

use crate::types::{BoundaryRef, CellIndex, EdgeIndex};

/// The two sides of an edge along the +x axis.
///
/// Every edge has a unit normal pointing in +x; the flux across an edge
/// is positive when mass flows from the left cell into the right cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Physical position of the edge
    pub position: f64,
    /// Cell on the -x side (None at the left domain boundary)
    pub left: Option<CellIndex>,
    /// Cell on the +x side (None at the right domain boundary)
    pub right: Option<CellIndex>,
    /// Boundary reference tag (Some iff exactly one adjacent cell)
    pub boundary_ref: Option<BoundaryRef>,
}

impl Edge {
    /// Whether this edge lies on the domain boundary.
    pub fn is_boundary(&self) -> bool {
        self.boundary_ref.is_some()
    }
}

/// 1D mesh of an interval.
///
/// Immutable after construction; the solver, probes and error norms all
/// read from it but never write back.
#[derive(Clone)]
pub struct Mesh1D {
    /// Cell vertices: vertices[k] is the left endpoint of cell k
    /// (length n_cells + 1)
    vertices: Vec<f64>,
    /// Edge table (length n_cells + 1)
    edges: Vec<Edge>,
}

impl Mesh1D {
    /// Default reference tag for the left boundary edge.
    pub const LEFT_REF: BoundaryRef = BoundaryRef(1);
    /// Default reference tag for the right boundary edge.
    pub const RIGHT_REF: BoundaryRef = BoundaryRef(2);

    /// Create a uniform mesh of [x_min, x_max] with the default
    /// boundary tags (1 on the left, 2 on the right).
    pub fn uniform(x_min: f64, x_max: f64, n_cells: usize) -> Self {
        Self::uniform_with_refs(x_min, x_max, n_cells, Self::LEFT_REF, Self::RIGHT_REF)
    }

    /// Create a uniform mesh with explicit boundary tags.
    pub fn uniform_with_refs(
        x_min: f64,
        x_max: f64,
        n_cells: usize,
        left_ref: BoundaryRef,
        right_ref: BoundaryRef,
    ) -> Self {
        assert!(n_cells > 0, "need at least one cell");
        assert!(x_max > x_min, "x_max must be greater than x_min");

        let dx = (x_max - x_min) / n_cells as f64;
        let vertices: Vec<f64> = (0..=n_cells).map(|i| x_min + i as f64 * dx).collect();
        Self::from_vertices_with_refs(vertices, left_ref, right_ref)
    }

    /// Create a (possibly graded) mesh from an ascending vertex list.
    pub fn from_vertices(vertices: Vec<f64>) -> Self {
        Self::from_vertices_with_refs(vertices, Self::LEFT_REF, Self::RIGHT_REF)
    }

    /// Create a mesh from an ascending vertex list with explicit
    /// boundary tags.
    pub fn from_vertices_with_refs(
        vertices: Vec<f64>,
        left_ref: BoundaryRef,
        right_ref: BoundaryRef,
    ) -> Self {
        assert!(vertices.len() >= 2, "need at least one cell");
        assert!(
            vertices.windows(2).all(|w| w[1] > w[0]),
            "vertices must be strictly increasing"
        );

        let n_cells = vertices.len() - 1;
        let edges: Vec<Edge> = (0..=n_cells)
            .map(|e| {
                let left = if e > 0 { Some(CellIndex::new(e - 1)) } else { None };
                let right = if e < n_cells { Some(CellIndex::new(e)) } else { None };
                let boundary_ref = if e == 0 {
                    Some(left_ref)
                } else if e == n_cells {
                    Some(right_ref)
                } else {
                    None
                };
                Edge {
                    position: vertices[e],
                    left,
                    right,
                    boundary_ref,
                }
            })
            .collect();

        Self { vertices, edges }
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Number of edges (n_cells + 1).
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Left endpoint of the domain.
    pub fn x_min(&self) -> f64 {
        self.vertices[0]
    }

    /// Right endpoint of the domain.
    pub fn x_max(&self) -> f64 {
        *self.vertices.last().unwrap()
    }

    /// Measure (length) of cell k.
    #[inline]
    pub fn cell_measure(&self, k: CellIndex) -> f64 {
        self.vertices[k.as_usize() + 1] - self.vertices[k.as_usize()]
    }

    /// Center coordinate of cell k.
    #[inline]
    pub fn cell_center(&self, k: CellIndex) -> f64 {
        0.5 * (self.vertices[k.as_usize()] + self.vertices[k.as_usize() + 1])
    }

    /// The two edges bounding cell k, in (left, right) order.
    #[inline]
    pub fn cell_edges(&self, k: CellIndex) -> (EdgeIndex, EdgeIndex) {
        (EdgeIndex::new(k.as_usize()), EdgeIndex::new(k.as_usize() + 1))
    }

    /// Edge data for edge e.
    #[inline]
    pub fn edge(&self, e: EdgeIndex) -> &Edge {
        &self.edges[e.as_usize()]
    }

    /// Iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Distinct boundary reference tags present in the mesh.
    pub fn boundary_refs(&self) -> Vec<BoundaryRef> {
        let mut refs: Vec<BoundaryRef> =
            self.edges.iter().filter_map(|e| e.boundary_ref).collect();
        refs.sort();
        refs.dedup();
        refs
    }

    /// Smallest cell measure (for CFL step bounds).
    pub fn min_measure(&self) -> f64 {
        CellIndex::iter(self.n_cells())
            .map(|k| self.cell_measure(k))
            .fold(f64::INFINITY, f64::min)
    }

    /// Total domain length.
    pub fn length(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    /// Locate the cell owning the physical position x.
    ///
    /// Positions outside the domain clamp to the first/last cell.
    /// Tie-break: a position exactly on an interior vertex resolves to
    /// the cell on the left of that vertex (the lower-indexed cell).
    pub fn locate_cell(&self, x: f64) -> CellIndex {
        if x <= self.x_min() {
            return CellIndex::new(0);
        }
        if x >= self.x_max() {
            return CellIndex::new(self.n_cells() - 1);
        }

        // partition_point: first vertex >= x, so an exact vertex hit
        // lands on the cell to its left.
        let i = self.vertices.partition_point(|&v| v < x);
        CellIndex::new(i - 1)
    }

    /// Whether x lies inside the closed domain interval.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}
