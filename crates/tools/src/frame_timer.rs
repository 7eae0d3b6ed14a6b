use std::time::Duration;

/// Rolling window of recent frame times, for the FPS readout.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    window: usize,
    next: usize,
}

impl FrameTimer {
    /// Timer averaging over the last `window` frames (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: Vec::with_capacity(window),
            window,
            next: 0,
        }
    }

    pub fn record(&mut self, frame: Duration) {
        if self.samples.len() < self.window {
            self.samples.push(frame);
        } else {
            self.samples[self.next] = frame;
        }
        self.next = (self.next + 1) % self.window;
    }

    /// Frames currently in the window.
    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Frames per second over the window. Zero until a frame is recorded.
    pub fn fps(&self) -> u32 {
        let avg = self.average().as_secs_f64();
        if avg <= 0.0 { 0 } else { (1.0 / avg).round() as u32 }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60)
    }
}
