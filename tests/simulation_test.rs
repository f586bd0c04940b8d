//! End-to-end simulation driver tests: time-loop bookkeeping, probe
//! and snapshot cadence, CSV output, and blow-up detection.

use saint_venant::{
    BoundaryTable, ConfigError, CsvProbeWriter, CsvSolutionWriter, MemoryProbeSink,
    MemorySolutionSink, Mesh1D, NullSink, Probe, ReflectiveBc, Scenario, Simulation,
    SimulationConfig, SolverError, StepSize, TimeScheme, TransmissiveBc,
};

fn reflective_table() -> BoundaryTable {
    BoundaryTable::new()
        .with(Mesh1D::LEFT_REF, ReflectiveBc)
        .with(Mesh1D::RIGHT_REF, ReflectiveBc)
}

#[test]
fn test_run_lands_exactly_on_final_time() {
    // 0.37 is not a multiple of any CFL step; the last step must be
    // clamped.
    let mesh = Mesh1D::uniform(0.0, 10.0, 30);
    let config = SimulationConfig::new(Scenario::DamBreakWet {
        x0: 5.0,
        h_left: 2.0,
        h_right: 1.0,
    })
    .with_step(StepSize::Cfl(0.45))
    .with_time_span(0.0, 0.37)
    .with_save_every(0);

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let stats = sim.solve(&mut NullSink, &mut NullSink).unwrap();

    // The clamped last step snaps the clock onto the target exactly
    assert_eq!(sim.time(), 0.37);
    assert_eq!(stats.final_time, 0.37);
    assert!(stats.min_dt <= stats.max_dt);
    assert!(stats.n_steps > 0);
}

#[test]
fn test_fixed_step_final_clamp() {
    // dt = 0.1 does not divide 0.25: expect steps 0.1, 0.1, 0.05.
    let mesh = Mesh1D::uniform(0.0, 100.0, 20);
    let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
        .with_step(StepSize::Fixed(0.1))
        .with_time_span(0.0, 0.25)
        .with_save_every(0);

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let stats = sim.solve(&mut NullSink, &mut NullSink).unwrap();

    assert_eq!(stats.n_steps, 3);
    assert!((stats.max_dt - 0.1).abs() < 1e-12);
    assert!((stats.min_dt - 0.05).abs() < 1e-12);
    assert_eq!(sim.time(), 0.25);
}

#[test]
fn test_probe_cadence_and_content() {
    let mesh = Mesh1D::uniform(0.0, 10.0, 20);
    let config = SimulationConfig::new(Scenario::StillWater { depth: 2.0 })
        .with_step(StepSize::Fixed(0.01))
        .with_time_span(0.0, 0.05)
        .with_save_every(0)
        .with_probe(Probe::new(1, 2.5))
        .with_probe(Probe::new(2, 7.5));

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let mut probes = MemoryProbeSink::new();
    let stats = sim.solve(&mut NullSink, &mut probes).unwrap();

    // One row per probe at t0 and after each of the 5 steps
    assert_eq!(stats.n_steps, 5);
    assert_eq!(probes.rows.len(), 2 * 6);

    // Still water: every sample reads the undisturbed state
    for &(_, id, state) in &probes.rows {
        assert!(id == 1 || id == 2);
        assert!((state.h - 2.0).abs() < 1e-12);
        assert!(state.hu.abs() < 1e-12);
    }
    // Rows for one time step come in probe order
    assert_eq!(probes.rows[0].1, 1);
    assert_eq!(probes.rows[1].1, 2);
}

#[test]
fn test_snapshot_cadence() {
    let mesh = Mesh1D::uniform(0.0, 10.0, 20);
    let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
        .with_step(StepSize::Fixed(0.01))
        .with_time_span(0.0, 0.1)
        .with_save_every(4);

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let mut frames = MemorySolutionSink::new();
    let stats = sim.solve(&mut frames, &mut NullSink).unwrap();

    // 10 steps: initial frame, frames after steps 4 and 8, final frame
    assert_eq!(stats.n_steps, 10);
    let times = frames.times();
    assert_eq!(times.len(), 4);
    assert!((times[0] - 0.0).abs() < 1e-12);
    assert!((times[1] - 0.04).abs() < 1e-12);
    assert!((times[2] - 0.08).abs() < 1e-12);
    assert!((times[3] - 0.1).abs() < 1e-12);
}

#[test]
fn test_final_frame_not_duplicated_on_save_boundary() {
    // 8 steps with save_every = 4: the step-8 snapshot is the final
    // state, so no extra final frame is written.
    let mesh = Mesh1D::uniform(0.0, 10.0, 20);
    let config = SimulationConfig::new(Scenario::StillWater { depth: 1.0 })
        .with_step(StepSize::Fixed(0.01))
        .with_time_span(0.0, 0.08)
        .with_save_every(4);

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let mut frames = MemorySolutionSink::new();
    let stats = sim.solve(&mut frames, &mut NullSink).unwrap();

    assert_eq!(stats.n_steps, 8);
    assert_eq!(stats.frames_written, 3);
    let times = frames.times();
    let expected = [0.0, 0.04, 0.08];
    assert_eq!(times.len(), expected.len());
    for (t, e) in times.iter().zip(expected.iter()) {
        assert!((t - e).abs() < 1e-12, "frame at t = {t}, expected {e}");
    }
}

#[test]
fn test_csv_output_end_to_end() {
    let mesh = Mesh1D::uniform(0.0, 10.0, 10);
    let config = SimulationConfig::new(Scenario::DamBreakWet {
        x0: 5.0,
        h_left: 2.0,
        h_right: 1.0,
    })
    .with_step(StepSize::Cfl(0.4))
    .with_time_span(0.0, 0.1)
    .with_save_every(5)
    .with_probe(Probe::new(1, 5.0));

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let mut solution_csv = CsvSolutionWriter::new(Vec::new());
    let mut probe_csv = CsvProbeWriter::new(Vec::new());
    let stats = sim.solve(&mut solution_csv, &mut probe_csv).unwrap();

    let solution_text = String::from_utf8(solution_csv.into_inner()).unwrap();
    let probe_text = String::from_utf8(probe_csv.into_inner()).unwrap();

    let solution_lines: Vec<&str> = solution_text.lines().collect();
    assert_eq!(solution_lines[0], "time,x,h,hu");
    // Header plus 10 cells per written frame
    assert_eq!(solution_lines.len(), 1 + 10 * stats.frames_written);

    let probe_lines: Vec<&str> = probe_text.lines().collect();
    assert_eq!(probe_lines[0], "time,probe,x,h,hu");
    assert_eq!(probe_lines.len(), 1 + stats.n_steps + 1);
}

#[test]
fn test_blow_up_is_detected() {
    // A fixed step far above the CFL bound makes the explicit scheme
    // unstable; the driver must stop with a non-finite error rather
    // than loop on garbage.
    let mesh = Mesh1D::uniform(0.0, 10.0, 50);
    let config = SimulationConfig::new(Scenario::DamBreakWet {
        x0: 5.0,
        h_left: 2.0,
        h_right: 1.0,
    })
    .with_scheme(TimeScheme::ExplicitEuler)
    .with_step(StepSize::Fixed(5.0))
    .with_time_span(0.0, 1000.0)
    .with_save_every(0);

    let mut sim = Simulation::new(mesh, config, reflective_table()).unwrap();
    let err = sim.solve(&mut NullSink, &mut NullSink).unwrap_err();
    match err {
        SolverError::NonFinite { time, step } => {
            assert!(time > 0.0);
            assert!(step > 0);
        }
        other => panic!("expected NonFinite, got {other}"),
    }
}

#[test]
fn test_unknown_names_are_config_errors() {
    assert!(matches!(
        TimeScheme::from_name("LeapFrog"),
        Err(ConfigError::UnknownTimeScheme(_))
    ));
    assert!(matches!(
        Scenario::from_name("Monsoon"),
        Err(ConfigError::UnknownScenario(_))
    ));
}

#[test]
fn test_transmissive_outflow_empties_hump() {
    // A hump radiates outward; with transmissive boundaries the free
    // surface relaxes back towards the base depth.
    let mesh = Mesh1D::uniform(0.0, 10.0, 100);
    let config = SimulationConfig::new(Scenario::GaussianHump {
        x0: 5.0,
        base_depth: 1.0,
        amplitude: 0.2,
        width: 0.5,
    })
    .with_scheme(TimeScheme::Rk2)
    .with_step(StepSize::Cfl(0.4))
    .with_time_span(0.0, 3.0)
    .with_save_every(0);

    let table = BoundaryTable::new()
        .with(Mesh1D::LEFT_REF, TransmissiveBc)
        .with(Mesh1D::RIGHT_REF, TransmissiveBc);

    let mut sim = Simulation::new(mesh, config, table).unwrap();
    let mass_before = sim.diagnostics().total_mass;
    sim.solve(&mut NullSink, &mut NullSink).unwrap();
    let diag = sim.diagnostics();

    // The excess mass of the hump has left the domain
    assert!(diag.total_mass < mass_before);
    assert!((diag.max_depth - 1.0).abs() < 0.05);
    assert!(diag.max_velocity < 0.1);
}
