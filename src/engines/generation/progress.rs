use super::evolution_engine::ProgressCallback;
use super::genome::GenomeId;
use crate::engines::metrics::GenerationStats;
use crate::types::TracePoint;
use std::io::Write;

/// Writes the classic stdout reports: `gen G max M avg A` lines and per-step traces.
pub struct ConsoleProgressCallback<W: Write + Send = std::io::Stdout> {
    out: W,
    stats: bool,
}

impl ConsoleProgressCallback {
    pub fn new(stats: bool) -> Self {
        Self::with_writer(std::io::stdout(), stats)
    }
}

impl<W: Write + Send> ConsoleProgressCallback<W> {
    pub fn with_writer(out: W, stats: bool) -> Self {
        Self { out, stats }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(line) {
            log::warn!("progress output failed: {}", e);
        }
    }
}

/// `id t: x(control) theta_degrees`
pub fn format_trace_line(genome: GenomeId, point: &TracePoint) -> String {
    format!(
        "{} {:4.2}: {:4.2}({:.2}) {:3.1}",
        genome,
        point.time,
        point.state.x,
        point.control,
        point.state.theta_degrees()
    )
}

impl<W: Write + Send> ProgressCallback for ConsoleProgressCallback<W> {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        if self.stats {
            self.emit(format_args!(
                "gen {} max {} avg {}\n",
                stats.generation, stats.max_fitness, stats.avg_fitness
            ));
        }
    }

    fn on_trace(&mut self, generation: usize, genome: GenomeId, trace: &[TracePoint]) {
        self.emit(format_args!("gen {}\n", generation));
        for point in trace {
            let line = format_trace_line(genome, point);
            self.emit(format_args!("{}\n", line));
        }
        self.emit(format_args!("\n"));
    }
}

/// Discards all progress.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _stats: &GenerationStats) {}
}

// For handing progress to another thread
pub struct IpcProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationStats),
    Trace { generation: usize, genome: GenomeId, points: Vec<TracePoint> },
}

impl IpcProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for IpcProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete(stats.clone()));
    }

    fn on_trace(&mut self, generation: usize, genome: GenomeId, trace: &[TracePoint]) {
        let _ = self.sender.send(ProgressMessage::Trace {
            generation,
            genome,
            points: trace.to_vec(),
        });
    }
}
