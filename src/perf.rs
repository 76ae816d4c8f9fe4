//! Draw-pass timing statistics.

use std::time::Instant;

use serde::Serialize;

/// Aggregated frame statistics since the previous read.
///
/// `real_fps` and `virtual_fps` are frames-per-second figures: the rate
/// actually achieved over the sample window, and the rate the average pass
/// cost would sustain if drawing continuously.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawStats {
    /// Average milliseconds per draw pass.
    pub avg: f64,
    /// `num_frames * 1000 / elapsed`.
    pub real_fps: f64,
    /// `1000 / avg`.
    pub virtual_fps: f64,
    /// Number of draw passes in the sample window.
    pub num_frames: u32,
    /// Milliseconds since the last read.
    pub elapsed: f64,
}

/// Accumulates per-pass timings; reading resets, so callers can poll at
/// their own cadence.
#[derive(Debug)]
pub(crate) struct PerfTracker {
    total_ms: f64,
    frames: u32,
    since: Instant,
}

impl Default for PerfTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PerfTracker {
    pub fn new() -> Self {
        Self {
            total_ms: 0.0,
            frames: 0,
            since: Instant::now(),
        }
    }

    /// Record one completed draw pass.
    pub fn record(&mut self, elapsed_ms: f64) {
        self.total_ms += elapsed_ms.max(0.0);
        self.frames += 1;
    }

    /// Read the aggregated statistics and reset the accumulators.
    pub fn read(&mut self) -> DrawStats {
        let elapsed = self.since.elapsed().as_secs_f64() * 1000.0;
        let avg = if self.frames == 0 {
            0.0
        } else {
            self.total_ms / f64::from(self.frames)
        };
        let real_fps = if elapsed > 0.0 {
            f64::from(self.frames) * 1000.0 / elapsed
        } else {
            0.0
        };
        let virtual_fps = if avg > 0.0 { 1000.0 / avg } else { 0.0 };
        let stats = DrawStats {
            avg,
            real_fps,
            virtual_fps,
            num_frames: self.frames,
            elapsed,
        };
        self.total_ms = 0.0;
        self.frames = 0;
        self.since = Instant::now();
        stats
    }
}
