//! Output channels.
//!
//! The time loop never opens files itself: snapshots and probe series
//! go through the [`SolutionSink`] and [`ProbeSink`] traits, injected
//! by the caller. CSV writers cover the common case; the memory sinks
//! keep everything addressable for assertions, and [`NullSink`]
//! discards output for benchmarks.

use std::io::{self, Write};

use crate::mesh::Mesh1D;
use crate::probe::ProbeSample;
use crate::solver::{SweSolution, SweState};
use crate::types::CellIndex;

/// Receives full-field snapshots during a run.
pub trait SolutionSink {
    /// Record the solution at the given time.
    fn write_frame(&mut self, time: f64, mesh: &Mesh1D, q: &SweSolution) -> io::Result<()>;
}

/// Receives probe readings during a run.
pub trait ProbeSink {
    /// Record one row of probe samples at the given time.
    fn write_samples(&mut self, time: f64, samples: &[ProbeSample]) -> io::Result<()>;
}

/// CSV snapshot writer: one `time,x,h,hu` row per cell per frame.
pub struct CsvSolutionWriter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvSolutionWriter<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    /// Consume the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SolutionSink for CsvSolutionWriter<W> {
    fn write_frame(&mut self, time: f64, mesh: &Mesh1D, q: &SweSolution) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "time,x,h,hu")?;
            self.header_written = true;
        }
        for k in CellIndex::iter(mesh.n_cells()) {
            let state = q.get(k);
            writeln!(
                self.writer,
                "{},{},{},{}",
                time,
                mesh.cell_center(k),
                state.h,
                state.hu
            )?;
        }
        self.writer.flush()
    }
}

/// CSV probe writer: one `time,probe,x,h,hu` row per probe per sample.
pub struct CsvProbeWriter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvProbeWriter<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    /// Consume the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProbeSink for CsvProbeWriter<W> {
    fn write_samples(&mut self, time: f64, samples: &[ProbeSample]) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "time,probe,x,h,hu")?;
            self.header_written = true;
        }
        for s in samples {
            writeln!(
                self.writer,
                "{},{},{},{},{}",
                time, s.id, s.position, s.state.h, s.state.hu
            )?;
        }
        Ok(())
    }
}

/// In-memory snapshot sink for tests.
#[derive(Default)]
pub struct MemorySolutionSink {
    /// Recorded (time, solution) frames
    pub frames: Vec<(f64, SweSolution)>,
}

impl MemorySolutionSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Times of the recorded frames.
    pub fn times(&self) -> Vec<f64> {
        self.frames.iter().map(|(t, _)| *t).collect()
    }
}

impl SolutionSink for MemorySolutionSink {
    fn write_frame(&mut self, time: f64, _mesh: &Mesh1D, q: &SweSolution) -> io::Result<()> {
        self.frames.push((time, q.clone()));
        Ok(())
    }
}

/// In-memory probe sink for tests.
#[derive(Default)]
pub struct MemoryProbeSink {
    /// Recorded (time, probe id, state) rows
    pub rows: Vec<(f64, u32, SweState)>,
}

impl MemoryProbeSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProbeSink for MemoryProbeSink {
    fn write_samples(&mut self, time: f64, samples: &[ProbeSample]) -> io::Result<()> {
        for s in samples {
            self.rows.push((time, s.id, s.state));
        }
        Ok(())
    }
}

/// Discards everything. Useful for benchmarks and error-norm runs.
#[derive(Default, Clone, Copy)]
pub struct NullSink;

impl SolutionSink for NullSink {
    fn write_frame(&mut self, _time: f64, _mesh: &Mesh1D, _q: &SweSolution) -> io::Result<()> {
        Ok(())
    }
}

impl ProbeSink for NullSink {
    fn write_samples(&mut self, _time: f64, _samples: &[ProbeSample]) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_solution_frame() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 2);
        let mut q = SweSolution::zeros(2);
        q.set(CellIndex::new(0), SweState::new(1.0, 0.5));
        q.set(CellIndex::new(1), SweState::new(2.0, -0.5));

        let mut sink = CsvSolutionWriter::new(Vec::new());
        sink.write_frame(0.0, &mesh, &q).unwrap();
        sink.write_frame(1.0, &mesh, &q).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Single header, then 2 cells x 2 frames
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "time,x,h,hu");
        assert_eq!(lines[1], "0,0.25,1,0.5");
        assert_eq!(lines[3], "1,0.25,1,0.5");
    }

    #[test]
    fn test_csv_probe_rows() {
        let samples = vec![
            ProbeSample {
                id: 1,
                position: 0.5,
                state: SweState::new(1.5, 0.0),
            },
            ProbeSample {
                id: 2,
                position: 0.75,
                state: SweState::new(1.0, 0.25),
            },
        ];

        let mut sink = CsvProbeWriter::new(Vec::new());
        sink.write_samples(0.1, &samples).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "time,probe,x,h,hu");
        assert_eq!(lines[1], "0.1,1,0.5,1.5,0");
    }

    #[test]
    fn test_memory_sinks_record() {
        let mesh = Mesh1D::uniform(0.0, 1.0, 2);
        let q = SweSolution::zeros(2);

        let mut sol = MemorySolutionSink::new();
        sol.write_frame(0.0, &mesh, &q).unwrap();
        sol.write_frame(0.5, &mesh, &q).unwrap();
        assert_eq!(sol.times(), vec![0.0, 0.5]);

        let mut probes = MemoryProbeSink::new();
        probes
            .write_samples(
                0.0,
                &[ProbeSample {
                    id: 3,
                    position: 0.5,
                    state: SweState::new(1.0, 0.0),
                }],
            )
            .unwrap();
        assert_eq!(probes.rows.len(), 1);
        assert_eq!(probes.rows[0].1, 3);
    }
}
