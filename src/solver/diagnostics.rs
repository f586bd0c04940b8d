//! Runtime diagnostics.
//!
//! Conservation quantities and solution bounds, computed on demand from
//! the cell averages, plus a progress reporter for long runs. None of
//! this feeds back into the solution; it is read-only monitoring.

use crate::equations::ShallowWater1D;
use crate::mesh::Mesh1D;
use crate::solver::SweSolution;
use crate::types::CellIndex;

/// Diagnostic quantities for the 1D shallow water solution.
#[derive(Clone, Debug)]
pub struct SweDiagnostics {
    /// Total water mass, ∫ h dx
    pub total_mass: f64,
    /// Total momentum, ∫ hu dx
    pub total_momentum: f64,
    /// Total energy, ∫ (hu²/2 + gh²/2) dx
    pub total_energy: f64,
    /// Maximum velocity magnitude over wet cells
    pub max_velocity: f64,
    /// Minimum water depth
    pub min_depth: f64,
    /// Maximum water depth
    pub max_depth: f64,
    /// Maximum Froude number over wet cells
    pub max_froude: f64,
}

impl SweDiagnostics {
    /// Compute all diagnostics from the current solution.
    pub fn compute(q: &SweSolution, mesh: &Mesh1D, eq: &ShallowWater1D) -> Self {
        let mut total_mass = 0.0;
        let mut total_momentum = 0.0;
        let mut total_energy = 0.0;
        let mut max_velocity: f64 = 0.0;
        let mut min_depth = f64::INFINITY;
        let mut max_depth: f64 = 0.0;
        let mut max_froude: f64 = 0.0;

        for k in CellIndex::iter(mesh.n_cells()) {
            let state = q.get(k);
            let w = mesh.cell_measure(k);

            total_mass += state.h * w;
            total_momentum += state.hu * w;

            min_depth = min_depth.min(state.h);
            max_depth = max_depth.max(state.h);

            if state.h > eq.h_min {
                let u = state.hu / state.h;
                total_energy += (0.5 * state.hu * u + 0.5 * eq.g * state.h * state.h) * w;
                max_velocity = max_velocity.max(u.abs());
                max_froude = max_froude.max(eq.froude(&state));
            }
        }

        if !min_depth.is_finite() {
            min_depth = 0.0;
        }

        Self {
            total_mass,
            total_momentum,
            total_energy,
            max_velocity,
            min_depth,
            max_depth,
            max_froude,
        }
    }

    /// Single-line summary for progress reports.
    pub fn summary_line(&self) -> String {
        format!(
            "M={:.4e} P={:.4e} E={:.4e} |u|_max={:.3} h=[{:.3},{:.3}] Fr={:.3}",
            self.total_mass,
            self.total_momentum,
            self.total_energy,
            self.max_velocity,
            self.min_depth,
            self.max_depth,
            self.max_froude
        )
    }
}

/// Progress reporter for long-running simulations.
#[derive(Clone, Debug)]
pub struct ProgressReporter {
    /// Wall-clock start
    start_instant: std::time::Instant,
    /// Simulated time span to cover
    total_sim_time: f64,
    /// Last reported progress percentage
    last_reported_pct: u32,
    /// Report interval in percentage points
    report_interval_pct: u32,
    /// Whether to append diagnostics to progress lines
    print_diagnostics: bool,
    /// Time steps taken so far
    n_steps: usize,
}

impl ProgressReporter {
    /// Create a reporter covering `total_sim_time` simulated seconds,
    /// reporting every `report_interval_pct` percent.
    pub fn new(total_sim_time: f64, report_interval_pct: u32) -> Self {
        Self {
            start_instant: std::time::Instant::now(),
            total_sim_time,
            last_reported_pct: 0,
            report_interval_pct: report_interval_pct.max(1),
            print_diagnostics: false,
            n_steps: 0,
        }
    }

    /// Append a diagnostics summary to each progress line.
    pub fn with_diagnostics(mut self) -> Self {
        self.print_diagnostics = true;
        self
    }

    /// Record one time step.
    pub fn step(&mut self) {
        self.n_steps += 1;
    }

    /// Number of steps recorded.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Report progress if the next percentage threshold was crossed.
    ///
    /// Returns true if a report was printed.
    pub fn maybe_report(&mut self, current_time: f64, diag: Option<&SweDiagnostics>) -> bool {
        if self.total_sim_time <= 0.0 {
            return false;
        }
        let pct = ((current_time / self.total_sim_time) * 100.0) as u32;
        let threshold = self.last_reported_pct + self.report_interval_pct;

        if pct >= threshold || (pct >= 100 && self.last_reported_pct < 100) {
            self.report(current_time, diag);
            self.last_reported_pct = (pct / self.report_interval_pct) * self.report_interval_pct;
            true
        } else {
            false
        }
    }

    /// Print a progress line.
    pub fn report(&self, current_time: f64, diag: Option<&SweDiagnostics>) {
        let elapsed = self.start_instant.elapsed().as_secs_f64();
        let pct = (current_time / self.total_sim_time) * 100.0;

        let steps_per_sec = if elapsed > 0.0 {
            self.n_steps as f64 / elapsed
        } else {
            0.0
        };

        print!(
            "[{:>5.1}%] t={:.3}s | elapsed={} | {:.0} steps/s",
            pct,
            current_time,
            format_duration(elapsed),
            steps_per_sec
        );
        if self.print_diagnostics {
            if let Some(d) = diag {
                print!(" | {}", d.summary_line());
            }
        }
        println!();
    }

    /// Print the final summary.
    pub fn finish(&self, final_time: f64) {
        let elapsed = self.start_instant.elapsed().as_secs_f64();
        let steps_per_sec = if elapsed > 0.0 {
            self.n_steps as f64 / elapsed
        } else {
            0.0
        };
        println!(
            "done: t={:.3}s in {} ({} steps, {:.0} steps/s)",
            final_time,
            format_duration(elapsed),
            self.n_steps,
            steps_per_sec
        );
    }
}

/// Format a duration in seconds as a short human-readable string.
fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else if secs < 3600.0 {
        let mins = (secs / 60.0).floor();
        format!("{:.0}m{:.0}s", mins, secs - mins * 60.0)
    } else {
        let hours = (secs / 3600.0).floor();
        let mins = ((secs - hours * 3600.0) / 60.0).floor();
        format!("{:.0}h{:.0}m", hours, mins)
    }
}
