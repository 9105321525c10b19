//! Fixed-timestep accumulator
//!
//! Banks wall-clock frame time and releases it in constant increments so
//! the simulation advances identically at any frame rate.

use serde::{Deserialize, Serialize};

use crate::consts::FIXED_TIMESTEP;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedTimestep {
    step: f32,
    /// Banked time, always in `[0, step)` between calls
    accumulator: f32,
    /// Cap on steps per frame; the backlog beyond it is dropped
    max_substeps: Option<u32>,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(FIXED_TIMESTEP)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_substeps: None,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: Option<u32>) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fraction of a step currently banked, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Bank `frame_dt` and run `step_fn` once per whole step available.
    /// Returns the number of steps run.
    pub fn advance<F: FnMut(f32)>(&mut self, frame_dt: f32, mut step_fn: F) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step {
            if let Some(max) = self.max_substeps
                && steps >= max
            {
                let dropped = (self.accumulator / self.step).floor() as u32;
                log::warn!("Dropping {} simulation steps to catch up", dropped);
                self.accumulator %= self.step;
                break;
            }

            step_fn(self.step);
            self.accumulator -= self.step;
            steps += 1;
        }

        steps
    }
}
