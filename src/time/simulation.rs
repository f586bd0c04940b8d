//! Time loop driver.
//!
//! [`Simulation`] owns the solution and walks it from the initial to
//! the final time. Construction validates the whole configuration
//! (time span, step rule, boundary table), resolves probe positions
//! and sets the initial condition, so a constructed simulation is
//! always ready to step; "stepping before initialization" is
//! unrepresentable.

use crate::boundary::BoundaryTable;
use crate::config::SimulationConfig;
use crate::equations::ShallowWater1D;
use crate::error::{ConfigError, SolverError};
use crate::io::{ProbeSink, SolutionSink};
use crate::mesh::Mesh1D;
use crate::probe::ProbeSet;
use crate::solver::{
    compute_dt, compute_residual, l1_error, l2_error, ProgressReporter, ResidualConfig,
    SweDiagnostics, SweSolution, SweState,
};
use crate::source::ManningFriction;

/// Step-size rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepSize {
    /// Constant step, chosen by the user
    Fixed(f64),
    /// Adaptive step from the CFL bound with the given CFL number
    Cfl(f64),
}

/// Summary of a completed run.
#[derive(Clone, Debug)]
pub struct SolveStats {
    /// Number of time steps taken
    pub n_steps: usize,
    /// Time actually reached (equals the configured final time)
    pub final_time: f64,
    /// Smallest step taken
    pub min_dt: f64,
    /// Largest step taken
    pub max_dt: f64,
    /// Snapshots written to the solution sink
    pub frames_written: usize,
}

/// A validated, initialized shallow-water run.
///
/// `Debug` is implemented by hand: the boundary table holds trait
/// objects, so it only reports the run's bookkeeping.
pub struct Simulation {
    mesh: Mesh1D,
    config: SimulationConfig,
    boundaries: BoundaryTable,
    equation: ShallowWater1D,
    friction: Option<ManningFriction>,
    probes: ProbeSet,
    q: SweSolution,
    time: f64,
    step_count: usize,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("n_cells", &self.mesh.n_cells())
            .field("scenario", &self.config.scenario.name())
            .field("time", &self.time)
            .field("step_count", &self.step_count)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Validate the configuration against the mesh and set the initial
    /// condition.
    pub fn new(
        mesh: Mesh1D,
        config: SimulationConfig,
        boundaries: BoundaryTable,
    ) -> Result<Self, ConfigError> {
        if config.final_time < config.initial_time {
            return Err(ConfigError::InvalidTimeSpan {
                initial_time: config.initial_time,
                final_time: config.final_time,
            });
        }
        match config.step {
            StepSize::Fixed(dt) if dt <= 0.0 => return Err(ConfigError::NonPositiveStep(dt)),
            StepSize::Cfl(number) if number <= 0.0 => {
                return Err(ConfigError::NonPositiveStep(number))
            }
            _ => {}
        }
        boundaries.validate(&mesh)?;

        let probes = ProbeSet::resolve(config.probes.clone(), &mesh);
        let equation = ShallowWater1D::with_h_min(config.gravity, config.h_min);
        let friction = config
            .manning_n
            .map(|n| ManningFriction::new(config.gravity, n));

        let mut q = SweSolution::zeros(mesh.n_cells());
        let scenario = config.scenario.clone();
        let topography = config.topography.clone();
        q.set_from_function(&mesh, |x| scenario.initial_state(x, &topography));

        let time = config.initial_time;
        Ok(Self {
            mesh,
            config,
            boundaries,
            equation,
            friction,
            probes,
            q,
            time,
            step_count: 0,
        })
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Current solution (cell averages).
    pub fn solution(&self) -> &SweSolution {
        &self.q
    }

    /// The mesh the run lives on.
    pub fn mesh(&self) -> &Mesh1D {
        &self.mesh
    }

    /// The equations of motion.
    pub fn equation(&self) -> &ShallowWater1D {
        &self.equation
    }

    /// Step size the rule currently prescribes, before final-time
    /// clamping. Infinite for a motionless dry domain under CFL.
    pub fn proposed_dt(&self) -> f64 {
        match self.config.step {
            StepSize::Fixed(dt) => dt,
            StepSize::Cfl(number) => compute_dt(&self.q, &self.mesh, &self.equation, number),
        }
    }

    /// Advance the solution by one step of size dt.
    ///
    /// Checks the state for NaN/Inf afterwards; a non-finite state is
    /// terminal.
    pub fn one_step(&mut self, dt: f64) -> Result<(), SolverError> {
        let mesh = &self.mesh;
        let equation = &self.equation;
        let boundaries = &self.boundaries;
        let topography = &self.config.topography;
        let flux = self.config.flux;
        let friction = self.friction.as_ref();
        let scheme = self.config.scheme;

        let mut rhs = |state: &SweSolution, t: f64| -> Result<SweSolution, ConfigError> {
            let mut rc =
                ResidualConfig::new(equation, flux, boundaries).with_topography(topography);
            if let Some(f) = friction {
                rc = rc.with_source(f);
            }
            Ok(compute_residual(state, mesh, &rc, t)?.rate)
        };

        scheme.step(&mut self.q, dt, self.time, &mut rhs)?;

        self.time += dt;
        self.step_count += 1;

        if !self.q.all_finite() {
            return Err(SolverError::NonFinite {
                time: self.time,
                step: self.step_count,
            });
        }
        Ok(())
    }

    /// Run to the final time, writing snapshots and probe series.
    ///
    /// The initial state is always written, intermediate snapshots
    /// every `save_every` steps, and the final state once unless a
    /// snapshot already captured it. Probes are sampled at the initial
    /// time and after every step. The last step is clamped so the run
    /// lands exactly on the final time.
    pub fn solve<S, P>(
        &mut self,
        solution_sink: &mut S,
        probe_sink: &mut P,
    ) -> Result<SolveStats, SolverError>
    where
        S: SolutionSink + ?Sized,
        P: ProbeSink + ?Sized,
    {
        let final_time = self.config.final_time;
        // Tolerance against accumulated rounding in the time variable
        let eps = 1e-12 * final_time.abs().max(1.0);

        let mut reporter = self
            .config
            .report_interval_pct
            .map(|pct| ProgressReporter::new(final_time - self.time, pct).with_diagnostics());

        let mut frames_written = 0;
        let mut min_dt = f64::INFINITY;
        let mut max_dt: f64 = 0.0;
        let mut last_saved_step = self.step_count;

        solution_sink.write_frame(self.time, &self.mesh, &self.q)?;
        frames_written += 1;
        if !self.probes.is_empty() {
            probe_sink.write_samples(self.time, &self.probes.sample(&self.q))?;
        }

        while self.time < final_time - eps {
            let dt = self.proposed_dt().min(final_time - self.time);
            self.one_step(dt)?;
            min_dt = min_dt.min(dt);
            max_dt = max_dt.max(dt);

            if !self.probes.is_empty() {
                probe_sink.write_samples(self.time, &self.probes.sample(&self.q))?;
            }
            if self.config.save_every > 0 && self.step_count % self.config.save_every == 0 {
                solution_sink.write_frame(self.time, &self.mesh, &self.q)?;
                frames_written += 1;
                last_saved_step = self.step_count;
            }

            if let Some(reporter) = reporter.as_mut() {
                reporter.step();
                let diag = SweDiagnostics::compute(&self.q, &self.mesh, &self.equation);
                reporter.maybe_report(self.time - self.config.initial_time, Some(&diag));
            }
        }

        // The clamped last step lands within rounding of the target;
        // snap so callers see the configured final time exactly.
        self.time = final_time;

        // Final state, unless the last step already saved it or no
        // steps were taken at all.
        if last_saved_step != self.step_count {
            solution_sink.write_frame(self.time, &self.mesh, &self.q)?;
            frames_written += 1;
        }

        if let Some(reporter) = reporter.as_ref() {
            reporter.finish(self.time);
        }

        if !min_dt.is_finite() {
            min_dt = 0.0;
        }

        Ok(SolveStats {
            n_steps: self.step_count,
            final_time: self.time,
            min_dt,
            max_dt,
            frames_written,
        })
    }

    /// Diagnostics of the current state.
    pub fn diagnostics(&self) -> SweDiagnostics {
        SweDiagnostics::compute(&self.q, &self.mesh, &self.equation)
    }

    /// L1 error against the scenario's exact solution at the current
    /// time, per component. None when the scenario has no exact rule.
    pub fn l1_error(&self) -> Option<[f64; 2]> {
        self.with_exact(|q, mesh, f| l1_error(q, mesh, f))
    }

    /// L2 error against the scenario's exact solution at the current
    /// time, per component. None when the scenario has no exact rule.
    pub fn l2_error(&self) -> Option<[f64; 2]> {
        self.with_exact(|q, mesh, f| l2_error(q, mesh, f))
    }

    fn with_exact<G>(&self, norm: G) -> Option<[f64; 2]>
    where
        G: Fn(&SweSolution, &Mesh1D, &dyn Fn(f64) -> SweState) -> [f64; 2],
    {
        if !self.config.scenario.has_exact_solution() {
            return None;
        }
        let scenario = &self.config.scenario;
        let t = self.time;
        let g = self.equation.g;
        let topo = &self.config.topography;
        let exact = move |x: f64| {
            scenario
                .exact_state(x, t, g, topo)
                .unwrap_or_else(SweState::zero)
        };
        Some(norm(&self.q, &self.mesh, &exact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{ReflectiveBc, TransmissiveBc};
    use crate::probe::Probe;
    use crate::scenario::Scenario;

    fn reflective_table() -> BoundaryTable {
        BoundaryTable::new()
            .with(Mesh1D::LEFT_REF, ReflectiveBc)
            .with(Mesh1D::RIGHT_REF, ReflectiveBc)
    }

    #[test]
    fn test_rejects_inverted_time_span() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config =
            SimulationConfig::new(Scenario::StillWater { depth: 1.0 }).with_time_span(1.0, 0.5);

        let err = Simulation::new(mesh, config, reflective_table()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeSpan { .. }));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
            .with_step(StepSize::Fixed(0.0));

        let err = Simulation::new(mesh, config, reflective_table()).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveStep(_)));

        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
            .with_step(StepSize::Cfl(-0.5));
        let err = Simulation::new(mesh, config, reflective_table()).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveStep(_)));
    }

    #[test]
    fn test_rejects_incomplete_boundary_table() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 });
        let table = BoundaryTable::new().with(Mesh1D::LEFT_REF, TransmissiveBc);

        let err = Simulation::new(mesh, config, table).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBoundaryCondition(_)));
    }

    #[test]
    fn test_probe_outside_domain_samples_nearest_boundary_cell() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
            .with_time_span(0.0, 0.01)
            .with_step(StepSize::Fixed(0.01))
            .with_probe(Probe::new(1, 2.0));

        let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
        let mut probes = crate::io::MemoryProbeSink::new();
        sim.solve(&mut crate::io::NullSink, &mut probes).unwrap();

        // The clamped probe reads the last cell's still-water state
        assert!(!probes.rows.is_empty());
        for &(_, id, state) in &probes.rows {
            assert_eq!(id, 1);
            assert!((state.h - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_initial_condition_applied() {
        let mesh = Mesh1D::uniform(0.0, 10.0, 10);
        let config = SimulationConfig::new(Scenario::DamBreakDry { x0: 5.0, h_left: 1.0 });

        let sim = Simulation::new(mesh, config, reflective_table()).unwrap();
        let q = sim.solution();
        // Cell centers left of the dam are wet, right of it dry
        assert!((q.get(crate::types::CellIndex::new(0)).h - 1.0).abs() < 1e-14);
        assert_eq!(q.get(crate::types::CellIndex::new(9)).h, 0.0);
        assert_eq!(sim.time(), 0.0);
    }

    #[test]
    fn test_zero_span_run_takes_no_steps() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config =
            SimulationConfig::new(Scenario::StillWater { depth: 1.0 }).with_time_span(0.0, 0.0);

        let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
        let mut sink = crate::io::MemorySolutionSink::new();
        let stats = sim.solve(&mut sink, &mut crate::io::NullSink).unwrap();

        assert_eq!(stats.n_steps, 0);
        // Only the initial frame is written when no steps are taken
        assert_eq!(stats.frames_written, 1);
        assert_eq!(sink.frames.len(), 1);
    }

    #[test]
    fn test_debug_output_reports_run_state() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 4);
        let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 });

        let sim = Simulation::new(mesh, config, reflective_table()).unwrap();
        let text = format!("{sim:?}");
        assert!(text.contains("Simulation"));
        assert!(text.contains("step_count"));
    }
}
