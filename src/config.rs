//! Simulation configuration.
//!
//! Collects every knob of a run in one builder-style struct. The
//! [`Simulation`](crate::time::Simulation) constructor validates it
//! against the mesh and boundary table before any stepping happens.

use crate::flux::FluxScheme;
use crate::mesh::Topography;
use crate::probe::Probe;
use crate::scenario::Scenario;
use crate::time::{StepSize, TimeScheme};

/// Configuration for a shallow-water run.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Gravitational acceleration
    pub gravity: f64,
    /// Wet/dry depth threshold
    pub h_min: f64,
    /// Interface flux scheme
    pub flux: FluxScheme,
    /// Time-stepping scheme
    pub scheme: TimeScheme,
    /// Initial condition (and exact-solution rule when available)
    pub scenario: Scenario,
    /// Bed elevation
    pub topography: Topography,
    /// Initial simulation time
    pub initial_time: f64,
    /// Final simulation time
    pub final_time: f64,
    /// Step-size rule
    pub step: StepSize,
    /// Write a snapshot every N steps (the initial and final states
    /// are always written)
    pub save_every: usize,
    /// Point probes, sampled every step
    pub probes: Vec<Probe>,
    /// Manning roughness coefficient; None disables bottom friction
    pub manning_n: Option<f64>,
    /// Progress report interval in percent; None silences reporting
    pub report_interval_pct: Option<u32>,
}

impl SimulationConfig {
    /// Configuration with conventional defaults: g = 9.81, Rusanov
    /// flux, explicit Euler, CFL 0.5, flat bottom, one second of
    /// simulated time, a snapshot every 10 steps.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            gravity: 9.81,
            h_min: 1e-6,
            flux: FluxScheme::default(),
            scheme: TimeScheme::default(),
            scenario,
            topography: Topography::default(),
            initial_time: 0.0,
            final_time: 1.0,
            step: StepSize::Cfl(0.5),
            save_every: 10,
            probes: Vec::new(),
            manning_n: None,
            report_interval_pct: None,
        }
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.gravity = g;
        self
    }

    /// Set the interface flux scheme.
    pub fn with_flux(mut self, flux: FluxScheme) -> Self {
        self.flux = flux;
        self
    }

    /// Set the time-stepping scheme.
    pub fn with_scheme(mut self, scheme: TimeScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the bed topography.
    pub fn with_topography(mut self, topography: Topography) -> Self {
        self.topography = topography;
        self
    }

    /// Set the simulated time span.
    pub fn with_time_span(mut self, initial_time: f64, final_time: f64) -> Self {
        self.initial_time = initial_time;
        self.final_time = final_time;
        self
    }

    /// Set the step-size rule.
    pub fn with_step(mut self, step: StepSize) -> Self {
        self.step = step;
        self
    }

    /// Set the snapshot frequency (in steps).
    pub fn with_save_every(mut self, save_every: usize) -> Self {
        self.save_every = save_every;
        self
    }

    /// Add a probe.
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probes.push(probe);
        self
    }

    /// Enable Manning bottom friction.
    pub fn with_manning_friction(mut self, manning_n: f64) -> Self {
        self.manning_n = Some(manning_n);
        self
    }

    /// Enable progress reporting every `pct` percent.
    pub fn with_progress_reports(mut self, pct: u32) -> Self {
        self.report_interval_pct = Some(pct);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
            .with_gravity(10.0)
            .with_flux(FluxScheme::Hll)
            .with_scheme(TimeScheme::Rk2)
            .with_time_span(0.0, 2.0)
            .with_step(StepSize::Fixed(1e-3))
            .with_save_every(5)
            .with_probe(Probe::new(1, 0.5));

        assert!((config.gravity - 10.0).abs() < 1e-14);
        assert_eq!(config.flux, FluxScheme::Hll);
        assert_eq!(config.scheme, TimeScheme::Rk2);
        assert_eq!(config.save_every, 5);
        assert_eq!(config.probes.len(), 1);
        assert!(config.manning_n.is_none());
    }
}
