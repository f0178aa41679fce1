//! Fixed-step time grid.

use serde::Serialize;

use crate::error::{ResponseError, Result};

/// Slack for floating-point noise when counting steps.
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Largest number of intervals a grid may hold.
pub const MAX_STEPS: usize = 1_000_000;

/// Most decimals [`round_time`] keeps; beyond this `f64` has no digits left.
pub const MAX_TIME_DECIMALS: u32 = 15;

/// A uniform sampling grid `t = 0, dt, 2dt, …` covering `[0, t_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeGrid {
    t_max: f64,
    dt: f64,
}

impl TimeGrid {
    /// Create a grid; both `t_max` and `dt` must be positive and finite,
    /// and the grid may hold at most [`MAX_STEPS`] intervals.
    pub fn new(t_max: f64, dt: f64) -> Result<Self> {
        if !(t_max.is_finite() && t_max > 0.0) {
            return Err(ResponseError::invalid_param(format!(
                "t_max must be positive and finite, got {}",
                t_max
            )));
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ResponseError::invalid_param(format!(
                "dt must be positive and finite, got {}",
                dt
            )));
        }
        let steps = step_count(t_max, dt);
        if !(steps.is_finite() && steps <= MAX_STEPS as f64) {
            return Err(ResponseError::invalid_param(format!(
                "t_max/dt = {:e} exceeds the limit of {} steps",
                t_max / dt,
                MAX_STEPS
            )));
        }
        Ok(Self { t_max, dt })
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of intervals, ⌈t_max/dt⌉.
    pub fn steps(&self) -> usize {
        step_count(self.t_max, self.dt) as usize
    }

    /// Number of samples, ⌈t_max/dt⌉ + 1.
    pub fn len(&self) -> usize {
        self.steps() + 1
    }

    /// A grid always holds at least the t = 0 sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Exact (unrounded) time of sample `k`.
    pub fn time(&self, k: usize) -> f64 {
        k as f64 * self.dt
    }

    /// Iterate over exact sample times.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |k| self.time(k))
    }
}

fn step_count(t_max: f64, dt: f64) -> f64 {
    (t_max / dt - STEP_COUNT_EPSILON).ceil().max(0.0)
}

/// Round a time value to a fixed number of decimals for display and lookup.
///
/// `decimals` is capped at [`MAX_TIME_DECIMALS`].
pub fn round_time(t: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(MAX_TIME_DECIMALS) as i32);
    (t * scale).round() / scale
}
