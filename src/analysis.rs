//! Characteristic points of a computed response.
//!
//! These annotate a trajectory for plotting: the time constant of a
//! first-order circuit and the first peak of an underdamped RLC circuit.

use std::f64::consts::PI;

use serde::Serialize;

use crate::circuit::SimulationParameters;
use crate::solver::{ResponseSample, TimeGrid};

/// A labelled instant on the response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    /// Time of the marker in seconds
    pub t: f64,
    /// Sample value at that time, if the grid has a point close enough
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    /// t = τ, where a first-order response covers 63.2% of its gap
    TimeConstant,
    /// t = π/ωd, first peak of an underdamped response
    PeakTime,
}

impl MarkerKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TimeConstant => "time constant",
            Self::PeakTime => "peak time",
        }
    }
}

/// Value of the first sample within `tolerance` of `t`.
pub fn sample_near(samples: &[ResponseSample], t: f64, tolerance: f64) -> Option<f64> {
    samples
        .iter()
        .find(|s| (s.t - t).abs() < tolerance)
        .map(|s| s.y)
}

/// Markers for a response sampled on `grid`.
///
/// Sample lookup uses half a grid step as tolerance. Markers outside the
/// simulated window are still reported, with no value.
pub fn markers(
    params: &SimulationParameters,
    grid: &TimeGrid,
    samples: &[ResponseSample],
) -> Vec<Marker> {
    let tolerance = grid.dt() / 2.0;
    let mut out = Vec::new();

    if params.system_type.is_second_order() {
        if let Some(omega_d) = params.damped_frequency().filter(|wd| *wd > 0.0) {
            let t = PI / omega_d;
            out.push(Marker {
                kind: MarkerKind::PeakTime,
                t,
                y: sample_near(samples, t, tolerance),
            });
        }
    } else {
        let t = params.time_constant;
        out.push(Marker {
            kind: MarkerKind::TimeConstant,
            t,
            y: sample_near(samples, t, tolerance),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{map, CircuitSpec, InitialConditions, SystemType};
    use crate::solver::{respond, EngineConfig, InputSpec};

    fn step(spec: &CircuitSpec) -> (SimulationParameters, TimeGrid, Vec<ResponseSample>) {
        let params = map(spec);
        let grid = TimeGrid::new(10.0, 0.05).unwrap();
        let samples = respond(
            &params,
            &InitialConditions::default(),
            &grid,
            &InputSpec::Step,
            &EngineConfig::default(),
        )
        .unwrap();
        (params, grid, samples)
    }

    #[test]
    fn test_time_constant_marker() {
        let (params, grid, samples) = step(&CircuitSpec::default());
        let found = markers(&params, &grid, &samples);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, MarkerKind::TimeConstant);
        assert_eq!(found[0].t, 1.0);
        assert!((found[0].y.unwrap() - 0.632).abs() < 1e-2);
    }

    #[test]
    fn test_peak_marker_only_when_underdamped() {
        let under = CircuitSpec::with_defaults(SystemType::SecondOrderSeriesRlc);
        let (params, grid, samples) = step(&under);
        let found = markers(&params, &grid, &samples);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, MarkerKind::PeakTime);
        assert!(found[0].y.unwrap() > 1.0);

        let over = CircuitSpec::new(SystemType::SecondOrderSeriesRlc, 4.0, 1.0, 1.0, 1.0);
        let (params, grid, samples) = step(&over);
        assert!(markers(&params, &grid, &samples).is_empty());
    }

    #[test]
    fn test_marker_beyond_window_has_no_value() {
        let spec = CircuitSpec::new(SystemType::FirstOrderRc, 100.0, 1.0, 1.0, 1.0);
        let (params, grid, samples) = step(&spec);
        let found = markers(&params, &grid, &samples);
        assert_eq!(found[0].t, 100.0);
        assert_eq!(found[0].y, None);
    }
}
