//! Mesh representation.
//!
//! Static control-volume geometry and connectivity, immutable once
//! built. The bed topography lives alongside the mesh because both are
//! fixed spatial data the solver only reads.

mod mesh1d;
mod topography;

pub use mesh1d::{Edge, Mesh1D};
pub use topography::Topography;
