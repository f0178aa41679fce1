//! Fixed-step forward Euler integration for arbitrary inputs.
//!
//! Explicit Euler is only conditionally stable: second-order runs diverge
//! once ωₙ·dt is large. The step is the sampling step; there is no
//! sub-stepping or step control.

use crate::error::{ResponseError, Result};
use crate::expr::InputSignal;

use super::grid::TimeGrid;

/// Read u(t) and reject NaN or infinite values.
fn input_at(input: &dyn InputSignal, t: f64) -> Result<f64> {
    let u = input.value_at(t).map_err(|e| {
        log::trace!("input evaluation failed at t = {}: {}", t, e);
        e
    })?;
    if u.is_finite() {
        Ok(u)
    } else {
        Err(ResponseError::NonFiniteInput { t, value: u })
    }
}

/// Integrate `τ·y' = u(t) - y` from `y0`.
///
/// Returns one value per grid point; the first is `y0`. Stops at the first
/// input failure and discards everything computed so far.
pub fn first_order(
    grid: &TimeGrid,
    time_constant: f64,
    y0: f64,
    input: &dyn InputSignal,
) -> Result<Vec<f64>> {
    let dt = grid.dt();
    let mut values = Vec::with_capacity(grid.len());
    let mut y = y0;
    values.push(y);

    for k in 0..grid.steps() {
        let u = input_at(input, grid.time(k))?;
        y += dt * (-y / time_constant + u / time_constant);
        values.push(y);
    }

    Ok(values)
}

/// Integrate `y'' = ωₙ²(u - y) - 2ζωₙ·y'` from `(y0, 0)`.
///
/// The velocity is updated first and the new velocity moves the position.
pub fn second_order(
    grid: &TimeGrid,
    omega_n: f64,
    zeta: f64,
    y0: f64,
    input: &dyn InputSignal,
) -> Result<Vec<f64>> {
    let dt = grid.dt();
    let mut values = Vec::with_capacity(grid.len());
    let mut y = y0;
    let mut dy = 0.0;
    values.push(y);

    for k in 0..grid.steps() {
        let u = input_at(input, grid.time(k))?;
        let ddy = omega_n * omega_n * (u - y) - 2.0 * zeta * omega_n * dy;
        dy += dt * ddy;
        y += dt * dy;
        values.push(y);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn constant(value: f64) -> impl Fn(f64) -> Result<f64> {
        move |_| Ok(value)
    }

    #[test]
    fn test_first_order_tracks_constant_input() {
        let grid = TimeGrid::new(10.0, 0.01).unwrap();
        let values = first_order(&grid, 1.0, 0.0, &constant(1.0)).unwrap();
        assert_eq!(values.len(), grid.len());
        assert_eq!(values[0], 0.0);
        // Euler lags the exact 1 - e^{-1} by O(dt)
        assert!((values[100] - 0.632).abs() < 5e-3);
        assert!((values[1000] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_second_order_settles_on_input() {
        let grid = TimeGrid::new(40.0, 0.001).unwrap();
        let values = second_order(&grid, 1.0, 0.5, 0.0, &constant(2.0)).unwrap();
        assert!((values[values.len() - 1] - 2.0).abs() < 1e-3);
        let peak = values.iter().cloned().fold(f64::MIN, f64::max);
        assert!(peak > 2.0);
    }

    #[test]
    fn test_evaluates_once_per_interval() {
        let calls = Cell::new(0usize);
        let counting = |_t: f64| -> Result<f64> {
            calls.set(calls.get() + 1);
            Ok(0.0)
        };
        let grid = TimeGrid::new(10.0, 0.05).unwrap();
        first_order(&grid, 1.0, 0.0, &counting).unwrap();
        assert_eq!(calls.get(), 200);
    }

    #[test]
    fn test_first_failure_aborts() {
        let calls = Cell::new(0usize);
        let failing = |t: f64| -> Result<f64> {
            calls.set(calls.get() + 1);
            if t > 0.5 {
                Err(ResponseError::DivisionByZero)
            } else {
                Ok(1.0)
            }
        };
        let grid = TimeGrid::new(10.0, 0.1).unwrap();
        let result = second_order(&grid, 1.0, 0.5, 0.0, &failing);
        assert!(matches!(result, Err(ResponseError::DivisionByZero)));
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let grid = TimeGrid::new(1.0, 0.1).unwrap();
        let result = first_order(&grid, 1.0, 0.0, &constant(f64::NAN));
        assert!(matches!(result, Err(ResponseError::NonFiniteInput { .. })));
    }
}
