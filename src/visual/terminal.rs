use super::Visualizer;
use crate::error::{InvpendError, Result};
use std::f64::consts::FRAC_PI_8;
use std::io::Write;

pub const DEFAULT_COLUMNS: usize = 60;

/// Single-line text rendering of the cart and pole, redrawn in place with `\r`.
///
/// ```text
/// [..........................\..............................]  -12.4°
/// ```
pub struct TerminalVisualizer<W: Write + Send = std::io::Stdout> {
    out: W,
    columns: usize,
    track_width: f64,
    active: bool,
}

impl TerminalVisualizer {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), DEFAULT_COLUMNS)
    }
}

impl<W: Write + Send> TerminalVisualizer<W> {
    pub fn new(out: W, columns: usize) -> Self {
        Self {
            out,
            columns,
            track_width: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn column_for(&self, position: f64) -> usize {
        let last = (self.columns - 1) as f64;
        let scaled = (position / self.track_width * last).round();
        scaled.clamp(0.0, last) as usize
    }

    /// Pole glyph for an angle measured from vertical, positive leaning right.
    fn pole_glyph(angle: f64) -> char {
        if angle.abs() < FRAC_PI_8 {
            '|'
        } else if angle.abs() < 3.0 * FRAC_PI_8 {
            if angle > 0.0 { '/' } else { '\\' }
        } else {
            '_'
        }
    }

    pub fn render(&self, position: f64, angle: f64) -> String {
        let column = self.column_for(position);
        let track: String = (0..self.columns)
            .map(|c| if c == column { Self::pole_glyph(angle) } else { '.' })
            .collect();
        format!("[{}] {:+6.1}\u{b0}", track, angle.to_degrees())
    }
}

impl<W: Write + Send> Visualizer for TerminalVisualizer<W> {
    fn init(&mut self, rod_length: f64, track_width: f64) -> Result<()> {
        if self.active {
            return Err(InvpendError::Visualization("display already initialized".to_string()));
        }
        if self.columns < 3 {
            return Err(InvpendError::Visualization(format!(
                "track needs at least 3 columns, got {}",
                self.columns
            )));
        }
        if !(track_width > 0.0) || !(rod_length > 0.0) {
            return Err(InvpendError::Visualization(format!(
                "invalid geometry: rod {} track {}",
                rod_length, track_width
            )));
        }
        self.track_width = track_width;
        self.active = true;
        Ok(())
    }

    fn draw_cart(&mut self, position: f64, angle: f64) {
        if !self.active {
            return;
        }
        let frame = self.render(position, angle);
        let written = write!(self.out, "\r{}", frame).and_then(|_| self.out.flush());
        if let Err(e) = written {
            log::warn!("terminal display write failed: {}", e);
        }
    }

    fn destroy(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = writeln!(self.out).and_then(|_| self.out.flush());
    }
}
