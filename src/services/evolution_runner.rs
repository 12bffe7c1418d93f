use crate::config::{AppConfig, ConfigBridge};
use crate::engines::generation::evolution_engine::{EvolutionEngine, RunSummary};
use crate::engines::generation::progress::{IpcProgressCallback, ProgressMessage};
use crate::error::{InvpendError, Result};
use crate::visual::Visualizer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Result from a background evolution run
pub type EvolutionResult = Result<RunSummary>;

/// Runs an [`EvolutionEngine`] on its own thread and streams progress back.
pub struct EvolutionRunner {
    handle: Option<JoinHandle<EvolutionResult>>,
    progress_rx: Receiver<ProgressMessage>,
    cancel_flag: Arc<AtomicBool>,
}

impl EvolutionRunner {
    /// Start evolution in a background thread. Configuration errors are
    /// reported here, before the thread is spawned.
    pub fn start(config: AppConfig) -> Result<Self> {
        Self::start_with_visualizer(config, None)
    }

    pub fn start_with_visualizer(
        config: AppConfig,
        visualizer: Option<Box<dyn Visualizer>>,
    ) -> Result<Self> {
        config.validate()?;
        let mut engine = EvolutionEngine::new(ConfigBridge::to_engine_config(&config))?;
        if let Some(visualizer) = visualizer {
            engine = engine.with_visualizer(visualizer);
        }

        let (progress_tx, progress_rx) = channel();
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let thread_cancel = Arc::clone(&cancel_flag);

        let handle = thread::Builder::new()
            .name("evolution".to_string())
            .spawn(move || {
                let callback = IpcProgressCallback::new(progress_tx);
                engine.run_with_cancel(callback, &thread_cancel)
            })?;

        Ok(Self {
            handle: Some(handle),
            progress_rx,
            cancel_flag,
        })
    }

    /// Poll for progress updates (non-blocking)
    pub fn try_recv_progress(&self) -> Option<ProgressMessage> {
        self.progress_rx.try_recv().ok()
    }

    /// Blocking receive; `None` once the run has ended and the queue is drained.
    pub fn recv_progress(&self) -> Option<ProgressMessage> {
        self.progress_rx.recv().ok()
    }

    /// Ask the run to stop before its next generation.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Wait for the run to end and return its summary.
    pub fn wait(mut self) -> EvolutionResult {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| InvpendError::Configuration("evolution already joined".to_string()))?;
        handle.join().unwrap_or_else(|_| {
            Err(InvpendError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "evolution thread panicked",
            )))
        })
    }
}

impl Drop for EvolutionRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}
