//! Physical model for the conservation law.

mod shallow_water;

pub use shallow_water::ShallowWater1D;
