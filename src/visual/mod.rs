pub mod terminal;

pub use terminal::TerminalVisualizer;

use crate::error::Result;

/// Display sink for cart-pole state. Purely observational: nothing drawn here
/// feeds back into the simulation.
///
/// `init` and `destroy` bracket a display session; `destroy` must be safe to
/// call when `init` never ran or already failed.
pub trait Visualizer: Send {
    /// `track_width` spans the whole track; positions passed to
    /// [`draw_cart`](Self::draw_cart) are in `[0, track_width]`.
    fn init(&mut self, rod_length: f64, track_width: f64) -> Result<()>;
    fn draw_cart(&mut self, position: f64, angle: f64);
    fn destroy(&mut self);
}

/// Draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn init(&mut self, _rod_length: f64, _track_width: f64) -> Result<()> {
        Ok(())
    }

    fn draw_cart(&mut self, _position: f64, _angle: f64) {}

    fn destroy(&mut self) {}
}
