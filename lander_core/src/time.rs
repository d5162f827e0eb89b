use std::time::Instant;

/// One physics sub-step, in seconds. Update logic always advances in whole
/// slices of this regardless of rendering frame rate.
pub const FIXED_TIMESTEP: f32 = 0.0166666;

/// Wall-clock delta between consecutive frames, in seconds. The first frame
/// reports zero.
#[derive(Default)]
pub struct Delta {
    last_frame: Option<Instant>,
}

impl Delta {
    pub fn on_frame(&mut self) -> f32 {
        let now = Instant::now();

        let out = match &self.last_frame {
            Some(last_frame) => (now - *last_frame).as_secs_f32(),
            None => 0.0,
        };

        self.last_frame = Some(now);

        out
    }
}

/// Fixed-timestep accumulator: frame deltas go in, whole `FIXED_TIMESTEP`
/// slices come out, leftover time carries into the next frame.
#[derive(Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn push(&mut self, delta_time: f32) {
        self.accumulator += delta_time;
    }

    /// Consumes one slice if a whole one is banked.
    pub fn tick(&mut self) -> bool {
        if self.accumulator >= FIXED_TIMESTEP {
            self.accumulator -= FIXED_TIMESTEP;
            true
        } else {
            false
        }
    }

    pub fn leftover(&self) -> f32 {
        self.accumulator
    }
}
