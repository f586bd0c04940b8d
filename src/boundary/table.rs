//! Boundary-condition table keyed by reference tag.

use std::collections::HashMap;

use super::BoundaryCondition;
use crate::error::ConfigError;
use crate::mesh::Mesh1D;
use crate::types::BoundaryRef;

/// Maps boundary reference tags to boundary conditions.
///
/// Built from the configuration's `reference -> type` entries and
/// validated against the mesh before the time loop starts: an edge
/// tag with no entry is a fatal [`ConfigError`].
#[derive(Default)]
pub struct BoundaryTable {
    conditions: HashMap<BoundaryRef, Box<dyn BoundaryCondition>>,
}

impl BoundaryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a condition to a reference tag (builder style).
    pub fn with(mut self, tag: BoundaryRef, bc: impl BoundaryCondition + 'static) -> Self {
        self.insert(tag, bc);
        self
    }

    /// Bind a condition to a reference tag.
    pub fn insert(&mut self, tag: BoundaryRef, bc: impl BoundaryCondition + 'static) {
        self.conditions.insert(tag, Box::new(bc));
    }

    /// Look up the condition for a tag.
    pub fn get(&self, tag: BoundaryRef) -> Option<&dyn BoundaryCondition> {
        self.conditions.get(&tag).map(|b| b.as_ref())
    }

    /// Look up the condition for a tag, as a configuration error when
    /// missing.
    pub fn require(&self, tag: BoundaryRef) -> Result<&dyn BoundaryCondition, ConfigError> {
        self.get(tag)
            .ok_or(ConfigError::MissingBoundaryCondition(tag))
    }

    /// Check that every boundary tag in the mesh has a condition.
    pub fn validate(&self, mesh: &Mesh1D) -> Result<(), ConfigError> {
        for tag in mesh.boundary_refs() {
            self.require(tag)?;
        }
        Ok(())
    }
}
