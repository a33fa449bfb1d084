//! Frame timing from display-refresh timestamps

use crate::consts::MAX_FRAME_DT;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Turns refresh-callback timestamps (milliseconds) into simulation steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Forget the previous timestamp so the next frame starts from zero.
    /// Call after pauses, restarts and tab switches.
    pub fn reset(&mut self) {
        self.last_time = None;
    }

    /// Seconds since the previous frame, clamped to `0..=MAX_FRAME_DT`.
    /// The first frame after a reset yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);

        // Track frame times for FPS
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }

        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Frames per second over the last window
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
