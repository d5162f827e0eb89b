use std::time::{Duration, Instant};

const REPORT_EVERY: Duration = Duration::from_secs(1);

/// Frame statistics over the last reporting window.
#[derive(Debug)]
pub struct Stats {
    pub frames: u32,
    pub frame_time: Duration,
}

/// Tallies rendered frames and emits a `Stats` once per second.
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
}

impl Default for FpsCounter {
    fn default() -> Self {
        FpsCounter {
            frames: 0,
            window_start: Instant::now(),
        }
    }
}

impl FpsCounter {
    pub fn on_frame(&mut self) -> Option<Stats> {
        self.frames += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed < REPORT_EVERY {
            return None;
        }

        let stats = Stats {
            frames: self.frames,
            frame_time: elapsed / self.frames,
        };

        self.frames = 0;
        self.window_start = Instant::now();

        Some(stats)
    }
}
